use campaign_config::parse::parse;
use campaign_config::serialize::{serialize, serialize_pretty};
use proptest::prelude::*;

/// Small element trees with attribute values that need escaping.
fn arb_xml() -> impl Strategy<Value = String> {
    let value = "[a-zA-Z0-9 &<>\"']{0,12}";
    let leaf = (value, "[a-z ]{0,10}").prop_map(|(v, text)| {
        let v = v
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;");
        if text.trim().is_empty() {
            format!(r#"<Item value="{v}"/>"#)
        } else {
            format!(r#"<Item value="{v}">{text}</Item>"#)
        }
    });
    prop::collection::vec(leaf, 0..6).prop_map(|items| format!("<Config>{}</Config>", items.concat()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn compact_output_reparses_identically(xml in arb_xml()) {
        let doc = parse(&xml).unwrap();
        let text = serialize(&doc).unwrap();
        prop_assert_eq!(parse(&text).unwrap(), doc);
    }

    #[test]
    fn pretty_output_is_a_fixed_point(xml in arb_xml()) {
        let doc = parse(&xml).unwrap();
        let once = serialize_pretty(&doc).unwrap();
        let reparsed = parse(&once).unwrap();
        prop_assert_eq!(serialize_pretty(&reparsed).unwrap(), once);
        prop_assert_eq!(reparsed.elements_named("Item").len(), doc.elements_named("Item").len());
    }
}
