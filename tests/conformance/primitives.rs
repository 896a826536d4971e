use campaign_config::primitives::{extract_digits_from_campaign_id, extract_digits_from_link};

#[test]
fn campaign_id_four_digit_suffix() {
    assert_eq!(
        extract_digits_from_campaign_id("20240101_promo_0042").as_deref(),
        Some("0042")
    );
}

#[test]
fn campaign_id_two_digit_suffix_is_not_extracted() {
    assert_eq!(extract_digits_from_campaign_id("20240101_promo_42"), None);
}

#[test]
fn campaign_id_three_digit_fallback() {
    assert_eq!(
        extract_digits_from_campaign_id("20240101_promo_042").as_deref(),
        Some("042")
    );
}

#[test]
fn link_uses_last_non_empty_segment() {
    let cases = [
        ("http://site.com/0042-promo", Some("0042")),
        ("http://site.com/x/0042-promo/", Some("0042")),
        ("https://site.com/0042-promo#top", Some("0042")),
        ("http://site.com/0042-promo/details", None),
        ("http://site.com/", None),
        ("http://site.com/123_a", Some("123")),
        ("http://site.com/12-a", None),
    ];
    for (input, expected) in cases {
        assert_eq!(
            extract_digits_from_link(input).as_deref(),
            expected,
            "input: {}",
            input
        );
    }
}
