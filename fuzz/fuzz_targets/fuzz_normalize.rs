#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let once = campaign_config::normalize_krhred_tokens(&s);
    let twice = campaign_config::normalize_krhred_tokens(&once.text);
    if !once.missing_detected && twice.text != once.text {
        panic!(
            "Normalization is not idempotent.\n\
             Input (lossy): {:?}\n\
             Once: {:?}\n\
             Twice: {:?}",
            s.get(..200).unwrap_or(&s),
            once.text,
            twice.text,
        );
    }
});
