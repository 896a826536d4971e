use super::common::{before_fixtures, fixture};
use campaign_config::document::TRACKED_ATTRIBUTES;
use campaign_config::{ConfigDocument, FieldKind, Session};

const OLD_ID: &str = "20250310_spring-sale_0042";
const NEW_ID: &str = "20250411_easter-sale_0042";

fn loaded() -> Session {
    let mut session = Session::default().with_today(before_fixtures());
    session.load_text(&fixture("campaign.xml")).unwrap();
    session
}

/// (element, attribute, value) for every tracked attribute present.
fn tracked_values(doc: &ConfigDocument) -> Vec<(String, String, String)> {
    let mut out = Vec::new();
    doc.root.walk(&mut |e| {
        for (el, attr) in TRACKED_ATTRIBUTES {
            if e.name == *el {
                if let Some(v) = e.attr(attr) {
                    out.push((el.to_string(), attr.to_string(), v.to_string()));
                }
            }
        }
    });
    out
}

#[test]
fn cascading_rename_updates_every_matching_attribute() {
    let mut session = loaded();
    let before = tracked_values(session.document().unwrap());

    session.edit_campaign_id(NEW_ID);
    session.commit_campaign_id().unwrap();

    let after = tracked_values(session.document().unwrap());
    assert_eq!(before.len(), after.len());
    for (old, new) in before.iter().zip(after.iter()) {
        if old.2 == OLD_ID {
            assert_eq!(new.2, NEW_ID, "{}@{} not renamed", old.0, old.1);
        } else {
            assert_eq!(new.2, old.2, "{}@{} should be untouched", old.0, old.1);
        }
    }
}

#[test]
fn cascading_rename_leaves_untracked_attributes_alone() {
    let mut session = loaded();
    session.edit_campaign_id(NEW_ID);
    session.commit_campaign_id().unwrap();

    let doc = session.document().unwrap();
    assert_eq!(doc.first_attr("AudienceModel", "type"), Some("static"));
    assert_eq!(doc.first_attr("Campaign", "channel"), Some("email"));
    assert_eq!(doc.elements_named("Interaction")[1].attr("name"), Some("reminder"));
    assert_eq!(doc.elements_named("FilterValue")[1].attr("value"), Some("west"));
}

#[test]
fn subject_commit_writes_normalized_text() {
    let mut session = loaded();
    session.edit_subject("Hi <krhred_unit_5>");
    let outcome = session.commit_subject().unwrap();
    assert_eq!(outcome.value, "Hi <%[KRHRED_Unit_05]|%>");
    assert_eq!(
        session.document().unwrap().subject(),
        "Hi <%[KRHRED_Unit_05]|%>"
    );
    assert_eq!(session.field(FieldKind::Subject).value, "Hi <%[KRHRED_Unit_05]|%>");
}

#[test]
fn bare_token_blocks_subject_commit() {
    let mut session = loaded();
    session.edit_subject("Hi KRHRED");
    assert!(session.commit_subject().is_err());
    assert_eq!(session.document().unwrap().subject(), "Spring deals for you");
}
