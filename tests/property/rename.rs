use campaign_config::document::TRACKED_ATTRIBUTES;
use campaign_config::parse::parse;
use proptest::prelude::*;

const OLD: &str = "20300101_old_0042";

/// A document where each tracked attribute holds either the old id or some
/// other value, plus an untracked attribute that always holds the old id.
fn arb_document() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec(any::<bool>(), TRACKED_ATTRIBUTES.len()).prop_map(|flags| {
        let mut xml = String::from("<Config>");
        let mut tracked = 0;
        for ((element, attr), holds_old) in TRACKED_ATTRIBUTES.iter().zip(flags) {
            let value = if holds_old {
                tracked += 1;
                OLD
            } else {
                "other"
            };
            xml.push_str(&format!(r#"<{element} {attr}="{value}" note="{OLD}"/>"#));
        }
        xml.push_str("</Config>");
        (xml, tracked)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn rename_moves_exactly_the_tracked_references(
        (xml, tracked) in arb_document(),
        new_name in "[a-z]{1,8}",
    ) {
        let new_id = format!("20300202_{new_name}_0042");
        let mut doc = parse(&xml).unwrap();
        prop_assert_eq!(doc.count_references(OLD), tracked);

        let written = doc.rename_references(OLD, &new_id);
        prop_assert_eq!(written, tracked);
        prop_assert_eq!(doc.count_references(OLD), 0);
        prop_assert_eq!(doc.count_references(&new_id), tracked);

        let notes = doc
            .root
            .child_elements()
            .filter(|e| e.attr("note") == Some(OLD))
            .count();
        prop_assert_eq!(notes, TRACKED_ATTRIBUTES.len());
    }
}
