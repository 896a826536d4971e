//! [`ConfigDocument`] → XML text.

use crate::document::{ConfigDocument, Element, Node, XmlDecl};
use crate::error::SerializeError;
use quick_xml::escape::{escape, partial_escape};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Serialize a document, reproducing its text nodes as they were parsed.
pub fn serialize(doc: &ConfigDocument) -> Result<String, SerializeError> {
    let mut out = String::new();
    write_document(&mut out, doc, false).map_err(fmt_error)?;
    Ok(out)
}

/// Serialize a document with one tag per line and two-space indentation.
///
/// Whitespace-only text is dropped; an element whose only content is text
/// stays on one line.
pub fn serialize_pretty(doc: &ConfigDocument) -> Result<String, SerializeError> {
    let mut out = String::new();
    write_document(&mut out, doc, true).map_err(fmt_error)?;
    Ok(out.trim_end().to_string())
}

fn fmt_error(e: std::fmt::Error) -> SerializeError {
    SerializeError {
        message: format!("failed to write XML: {}", e),
    }
}

fn write_document(out: &mut String, doc: &ConfigDocument, pretty: bool) -> std::fmt::Result {
    if let Some(decl) = &doc.declaration {
        write_decl(out, decl)?;
        out.push('\n');
    }
    for node in &doc.prolog {
        write_node(out, node, 0, pretty)?;
        if !pretty {
            out.push('\n');
        }
    }
    if pretty {
        write_element_pretty(out, &doc.root, 0)?;
    } else {
        write_element(out, &doc.root)?;
        out.push('\n');
    }
    for node in &doc.epilog {
        write_node(out, node, 0, pretty)?;
        if !pretty {
            out.push('\n');
        }
    }
    Ok(())
}

fn write_decl(out: &mut String, decl: &XmlDecl) -> std::fmt::Result {
    write!(out, "<?xml version=\"{}\"", decl.version)?;
    if let Some(encoding) = &decl.encoding {
        write!(out, " encoding=\"{}\"", encoding)?;
    }
    if let Some(standalone) = &decl.standalone {
        write!(out, " standalone=\"{}\"", standalone)?;
    }
    out.push_str("?>");
    Ok(())
}

fn write_open_tag(out: &mut String, element: &Element) -> std::fmt::Result {
    write!(out, "<{}", element.name)?;
    for attr in &element.attributes {
        write!(out, " {}=\"{}\"", attr.name, escape(attr.value.as_str()))?;
    }
    Ok(())
}

fn write_element(out: &mut String, element: &Element) -> std::fmt::Result {
    write_open_tag(out, element)?;
    if element.children.is_empty() {
        out.push_str("/>");
        return Ok(());
    }
    out.push('>');
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(out, e)?,
            other => write_leaf(out, other)?,
        }
    }
    write!(out, "</{}>", element.name)
}

fn write_element_pretty(out: &mut String, element: &Element, depth: usize) -> std::fmt::Result {
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    write_open_tag(out, element)?;

    let children: Vec<&Node> = element
        .children
        .iter()
        .filter(|n| !matches!(n, Node::Text(t) if t.trim().is_empty()))
        .collect();

    if children.is_empty() {
        out.push_str("/>\n");
        return Ok(());
    }

    let inline = children
        .iter()
        .all(|n| matches!(n, Node::Text(_) | Node::CData(_)));
    if inline {
        out.push('>');
        for child in children {
            write_leaf(out, child)?;
        }
        writeln!(out, "</{}>", element.name)?;
        return Ok(());
    }

    out.push_str(">\n");
    for child in children {
        write_node(out, child, depth + 1, true)?;
    }
    writeln!(out, "{}</{}>", pad, element.name)
}

fn write_node(out: &mut String, node: &Node, depth: usize, pretty: bool) -> std::fmt::Result {
    match node {
        Node::Element(e) if pretty => write_element_pretty(out, e, depth),
        Node::Element(e) => write_element(out, e),
        Node::Text(t) if pretty => writeln!(out, "{}{}", INDENT.repeat(depth), partial_escape(t.trim())),
        leaf if pretty => {
            out.push_str(&INDENT.repeat(depth));
            write_leaf(out, leaf)?;
            out.push('\n');
            Ok(())
        }
        leaf => write_leaf(out, leaf),
    }
}

fn write_leaf(out: &mut String, node: &Node) -> std::fmt::Result {
    match node {
        Node::Text(t) => write!(out, "{}", partial_escape(t.as_str())),
        Node::CData(t) => write!(out, "<![CDATA[{}]]>", t),
        Node::Comment(t) => write!(out, "<!--{}-->", t),
        Node::ProcessingInstruction(t) => write!(out, "<?{}?>", t),
        Node::DocType(t) => write!(out, "<!DOCTYPE {}>", t),
        Node::Element(e) => write_element(out, e),
    }
}
