#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let id = campaign_config::extract_digits_from_campaign_id(&s);
    let link = campaign_config::extract_digits_from_link(&s);
    for digits in [id, link].into_iter().flatten() {
        assert!(matches!(digits.len(), 3 | 4) && digits.bytes().all(|b| b.is_ascii_digit()));
    }
    let _ = campaign_config::validate_campaign_link_pair(&s, &s);
});
