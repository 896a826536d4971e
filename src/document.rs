//! In-memory campaign config document.
//!
//! A small owned XML tree: enough to read and rewrite attributes on named
//! elements and to write the document back out without losing comments,
//! processing instructions or text.

use serde::{Deserialize, Serialize};

/// Element/attribute pairs that carry the campaign id.
pub const TRACKED_ATTRIBUTES: &[(&str, &str)] = &[
    ("AudienceModel", "name"),
    ("Campaign", "name"),
    ("Campaign", "audience"),
    ("Interaction", "name"),
    ("Interaction", "message"),
    ("MessageContent", "name"),
    ("FilterValue", "value"),
];

pub const AUDIENCE_MODEL: &str = "AudienceModel";
pub const CAMPAIGN: &str = "Campaign";
pub const MESSAGE_CONTENT: &str = "MessageContent";
pub const MESSAGE_BODY: &str = "MessageBody";

/// The `<?xml ...?>` declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlDecl {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standalone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Node {
    Element(Element),
    /// Unescaped character data.
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    DocType(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First element named `name` in document order, including `self`.
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Element> {
        if self.name == name {
            return Some(self);
        }
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                if let Some(found) = e.find_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Visit every element in document order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Element)) {
        f(self);
        for child in self.child_elements() {
            child.walk(f);
        }
    }

    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                e.walk_mut(f);
            }
        }
    }

    /// Concatenated text content of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) | Node::CData(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.text()),
                _ => {}
            }
        }
        out
    }
}

/// A parsed campaign config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<XmlDecl>,
    /// Comments, processing instructions and doctype before the root.
    pub prolog: Vec<Node>,
    pub root: Element,
    /// Comments and processing instructions after the root.
    pub epilog: Vec<Node>,
}

impl ConfigDocument {
    pub fn new(root: Element) -> Self {
        ConfigDocument {
            declaration: None,
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    pub fn find(&self, name: &str) -> Option<&Element> {
        self.root.find(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.root.find_mut(name)
    }

    /// All elements named `name`, in document order.
    pub fn elements_named(&self, name: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.root.walk(&mut |e| {
            if e.name == name {
                out.push(e);
            }
        });
        out
    }

    /// Attribute of the first element named `element`.
    pub fn first_attr(&self, element: &str, attr: &str) -> Option<&str> {
        self.find(element).and_then(|e| e.attr(attr))
    }

    /// Campaign id recorded in the document: `AudienceModel@name`, else
    /// `Campaign@name`, else empty.
    pub fn campaign_id(&self) -> String {
        [(AUDIENCE_MODEL, "name"), (CAMPAIGN, "name")]
            .iter()
            .filter_map(|(el, attr)| self.first_attr(el, attr))
            .find(|v| !v.is_empty())
            .unwrap_or_default()
            .to_string()
    }

    pub fn subject(&self) -> String {
        self.first_attr(MESSAGE_CONTENT, "subject")
            .unwrap_or_default()
            .to_string()
    }

    pub fn link(&self) -> String {
        self.first_attr(MESSAGE_BODY, "content")
            .unwrap_or_default()
            .to_string()
    }

    /// Number of tracked attributes whose value equals `campaign_id`.
    pub fn count_references(&self, campaign_id: &str) -> usize {
        if campaign_id.trim().is_empty() {
            return 0;
        }
        let mut count = 0;
        self.root.walk(&mut |e| {
            count += TRACKED_ATTRIBUTES
                .iter()
                .filter(|(el, attr)| e.name == *el && e.attr(attr) == Some(campaign_id))
                .count();
        });
        count
    }

    /// Rewrite every tracked attribute equal to `old` to `new`.
    ///
    /// Full-document scan; attributes with any other value are untouched.
    /// Returns the number of attributes rewritten.
    pub fn rename_references(&mut self, old: &str, new: &str) -> usize {
        if old.is_empty() {
            return 0;
        }
        let mut renamed = 0;
        self.root.walk_mut(&mut |e| {
            for (el, attr) in TRACKED_ATTRIBUTES {
                if e.name == *el && e.attr(attr) == Some(old) {
                    e.set_attr(attr, new);
                    renamed += 1;
                }
            }
        });
        renamed
    }

    /// Stamp `campaign_id` onto the first `AudienceModel` and `Campaign`.
    /// Used when the document has no campaign id to rename from.
    pub fn seed_campaign_id(&mut self, campaign_id: &str) -> usize {
        let mut written = 0;
        if let Some(model) = self.find_mut(AUDIENCE_MODEL) {
            model.set_attr("name", campaign_id);
            written += 1;
        }
        if let Some(campaign) = self.find_mut(CAMPAIGN) {
            campaign.set_attr("name", campaign_id);
            campaign.set_attr("audience", campaign_id);
            written += 2;
        }
        written
    }
}
