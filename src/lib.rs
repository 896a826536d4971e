//! Validation and commit pipeline for XML email-campaign configs.
//!
//! A campaign config is an XML file whose campaign id, subject line and
//! tracking link are edited by hand. This crate validates those edits and
//! writes them back into the document:
//!
//! ```text
//! parse(xml) → ConfigDocument → Session ─ edit_* → validate_* / normalize_krhred_tokens
//!                                       └ commit_* → ConfigDocument → serialize(doc) → xml
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use campaign_config::FieldKind;
//!
//! let xml = r#"<Config>
//!   <AudienceModel name="20300101_promo_0042"/>
//!   <Campaign name="20300101_promo_0042" audience="20300101_promo_0042"/>
//!   <MessageContent name="20300101_promo_0042" subject="Hi"/>
//!   <MessageBody content="http://site.com/0042-promo"/>
//! </Config>"#;
//!
//! let mut session = campaign_config::load(xml).expect("valid XML");
//! session.edit_campaign_id("20300102_promo_0042");
//! session.commit_campaign_id().expect("valid id");
//! session.edit_subject("Hi krhred_5");
//! session.commit_subject().expect("repairable token");
//!
//! assert_eq!(session.field(FieldKind::Subject).value, "Hi <%[KRHRED_Unit_05]|%>");
//! assert_eq!(session.reference_indicator().to_string(), "4/7");
//! ```

pub mod config;
pub mod document;
pub mod enums;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod primitives;
pub mod serialize;
pub mod session;
pub mod store;
pub mod types;
pub mod validate;

pub use config::EditorConfig;
pub use document::ConfigDocument;
pub use enums::*;
pub use error::*;
pub use session::Session;
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
pub use normalize::normalize_krhred_tokens;
pub use parse::parse;
pub use primitives::{extract_digits_from_campaign_id, extract_digits_from_link};
pub use serialize::{serialize, serialize_pretty};
pub use validate::{validate_campaign_id_format, validate_campaign_link_pair};

/// Convenience entry point: parse `xml` and open a session on it with the
/// default configuration.
///
/// # Errors
///
/// Returns the [`ParseError`] if the text is blank or not well-formed XML.
pub fn load(xml: &str) -> Result<Session, ParseError> {
    load_with(xml, EditorConfig::default())
}

/// Like [`load`], with an explicit configuration.
pub fn load_with(xml: &str, config: EditorConfig) -> Result<Session, ParseError> {
    let doc = parse::parse(xml)?;
    let mut session = Session::new(config);
    session.attach(doc);
    Ok(session)
}
