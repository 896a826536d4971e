#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let doc = match campaign_config::parse(&s) {
        Ok(d) => d,
        Err(_) => return,
    };

    let xml = match campaign_config::serialize(&doc) {
        Ok(x) => x,
        Err(_) => return,
    };

    // A serialized document must parse back to the same tree.
    match campaign_config::parse(&xml) {
        Ok(reparsed) if reparsed == doc => {}
        other => panic!(
            "Roundtrip failure.\n\
             Input (lossy): {:?}\n\
             Serialized XML:\n{}\n\
             Reparse: {:?}",
            s.get(..200).unwrap_or(&s),
            xml.get(..500).unwrap_or(&xml),
            other.map(|_| "different tree"),
        ),
    }
});
