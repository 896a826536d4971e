use campaign_config::primitives::{extract_digits_from_campaign_id, extract_digits_from_link};
use campaign_config::validate::validate_campaign_link_pair;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn campaign_suffix_is_extracted(
        date in "[0-9]{8}",
        name in "[a-z][a-z0-9_-]{0,10}",
        digits in "[0-9]{3,4}",
    ) {
        let id = format!("{date}_{name}_{digits}");
        prop_assert_eq!(extract_digits_from_campaign_id(&id), Some(digits));
    }

    #[test]
    fn link_code_is_extracted(
        host in "[a-z]{1,10}\\.(com|net|org)",
        dirs in prop::collection::vec("[a-z]{1,6}", 0..3),
        code in "[0-9]{4}",
        slug in "[a-z]{1,10}",
    ) {
        let mut path = dirs.join("/");
        if !path.is_empty() {
            path.push('/');
        }
        let link = format!("http://{host}/{path}{code}-{slug}");
        prop_assert_eq!(extract_digits_from_link(&link), Some(code));
    }

    #[test]
    fn matching_codes_pass_the_pair_check(code in "[0-9]{4}", name in "[a-z]{1,8}") {
        let id = format!("20300101_{name}_{code}");
        let link = format!("http://site.com/{code}-{name}");
        prop_assert!(validate_campaign_link_pair(&id, &link).ok);
    }

    #[test]
    fn differing_codes_fail_the_pair_check(a in 1000u32..10000, b in 1000u32..10000) {
        prop_assume!(a != b);
        let result = validate_campaign_link_pair(
            &format!("20300101_x_{a}"),
            &format!("http://site.com/{b}-x"),
        );
        prop_assert!(!result.ok);
        prop_assert_eq!(result.expected, Some(a.to_string()));
        prop_assert_eq!(result.found, Some(b.to_string()));
    }
}
