#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let mut session = campaign_config::Session::default();
    if session.load_text(&s).is_ok() {
        let _ = session.reference_indicator();
        let _ = session.xml_text();
    }
});
