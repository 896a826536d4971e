use super::common::{after_fixtures, before_fixtures};
use campaign_config::validate::{
    FORMAT_ERROR, validate_campaign_id_format, validate_campaign_id_format_at,
    validate_campaign_link_pair,
};

#[test]
fn empty_campaign_id_has_no_message() {
    let check = validate_campaign_id_format("");
    assert!(!check.valid);
    assert_eq!(check.error, "");
    assert_eq!(check.is_past_date, None);
}

#[test]
fn malformed_campaign_id_has_format_message() {
    let check = validate_campaign_id_format("promo_0042");
    assert!(!check.valid);
    assert_eq!(check.error, FORMAT_ERROR);
}

#[test]
fn past_campaign_id_is_valid_with_flag() {
    let check = validate_campaign_id_format_at("20240101_x_0001", after_fixtures());
    assert!(check.valid);
    assert_eq!(check.is_past_date, Some(true));
    assert_eq!(check.campaign_date.unwrap().to_string(), "2024-01-01");
}

#[test]
fn future_campaign_id_is_not_past() {
    let check = validate_campaign_id_format_at("20250310_x_0001", before_fixtures());
    assert!(check.valid);
    assert_eq!(check.is_past_date, Some(false));
}

#[test]
fn matching_pair_is_ok() {
    let res = validate_campaign_link_pair("20240101_x_0042", "http://site.com/0042-promo");
    assert!(res.ok);
    assert_eq!(res.expected.as_deref(), Some("0042"));
    assert_eq!(res.found.as_deref(), Some("0042"));
}

#[test]
fn mismatched_pair_reports_both_sides() {
    let res = validate_campaign_link_pair("20240101_x_0042", "http://site.com/0099-promo");
    assert!(!res.ok);
    assert_eq!(res.expected.as_deref(), Some("0042"));
    assert_eq!(res.found.as_deref(), Some("0099"));
}

#[test]
fn empty_side_passes_vacuously() {
    assert!(validate_campaign_link_pair("", "http://site.com/0099-promo").ok);
    assert!(validate_campaign_link_pair("20240101_x_0042", "").ok);
    let res = validate_campaign_link_pair("garbage", "");
    assert!(res.ok);
    assert_eq!(res.expected, None);
}
