use crate::document::{Attribute, ConfigDocument, Element, Node, XmlDecl};
use crate::error::{ParseError, ParseErrorKind};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::borrow::Cow;
use std::fmt::Display;

/// Parse XML text into a [`ConfigDocument`].
///
/// Performs well-formedness checking only. Whether the document contains the
/// elements a commit needs is decided at commit time.
pub fn parse(input: &str) -> Result<ConfigDocument, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::NoRootElement,
            message: "empty input".to_string(),
            line: None,
            column: None,
        });
    }

    let mut reader = Reader::from_str(input);
    let mut declaration = None;
    let mut prolog = Vec::new();
    let mut epilog = Vec::new();
    let mut root: Option<Element> = None;
    // Open elements, innermost last.
    let mut stack: Vec<Element> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| error_at(input, &reader, ParseErrorKind::Syntax, e))?;

        match event {
            Event::Decl(decl) => {
                let version = decl
                    .version()
                    .map_err(|e| error_at(input, &reader, ParseErrorKind::Syntax, e))?;
                let encoding = match decl.encoding() {
                    Some(enc) => Some(
                        utf8(input, &reader, &enc.map_err(|e| {
                            error_at(input, &reader, ParseErrorKind::Syntax, e)
                        })?)?,
                    ),
                    None => None,
                };
                let standalone = match decl.standalone() {
                    Some(sa) => Some(
                        utf8(input, &reader, &sa.map_err(|e| {
                            error_at(input, &reader, ParseErrorKind::Syntax, e)
                        })?)?,
                    ),
                    None => None,
                };
                declaration = Some(XmlDecl {
                    version: utf8(input, &reader, &version)?,
                    encoding,
                    standalone,
                });
            }
            Event::Start(start) => {
                let element = open_element(input, &reader, &start)?;
                if root.is_some() && stack.is_empty() {
                    return Err(error_at(
                        input,
                        &reader,
                        ParseErrorKind::Syntax,
                        "content after the root element",
                    ));
                }
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(input, &reader, &start)?;
                close_element(input, &reader, element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // Name matching is enforced by the reader.
                let Some(element) = stack.pop() else {
                    return Err(error_at(
                        input,
                        &reader,
                        ParseErrorKind::Syntax,
                        "unexpected closing tag",
                    ));
                };
                close_element(input, &reader, element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| error_at(input, &reader, ParseErrorKind::Syntax, e))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Text(value.into_owned())),
                    None if value.trim().is_empty() => {}
                    None => {
                        return Err(error_at(
                            input,
                            &reader,
                            ParseErrorKind::Syntax,
                            "text outside the root element",
                        ));
                    }
                }
            }
            Event::CData(data) => {
                let value = utf8(input, &reader, &data)?;
                let node = Node::CData(value);
                push_misc(input, &reader, node, &mut stack, &root, &mut prolog, &mut epilog)?;
            }
            Event::Comment(comment) => {
                let value = utf8(input, &reader, &comment)?;
                let node = Node::Comment(value);
                push_misc(input, &reader, node, &mut stack, &root, &mut prolog, &mut epilog)?;
            }
            Event::PI(pi) => {
                let value = utf8(input, &reader, &pi)?;
                let node = Node::ProcessingInstruction(value);
                push_misc(input, &reader, node, &mut stack, &root, &mut prolog, &mut epilog)?;
            }
            Event::DocType(doctype) => {
                let value = utf8(input, &reader, &doctype)?;
                prolog.push(Node::DocType(value.trim().to_string()));
            }
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(error_at(
            input,
            &reader,
            ParseErrorKind::UnclosedElement,
            format!("element <{}> is never closed", open.name),
        ));
    }

    let root = root.ok_or_else(|| ParseError {
        kind: ParseErrorKind::NoRootElement,
        message: "document has no root element".to_string(),
        line: None,
        column: None,
    })?;

    Ok(ConfigDocument {
        declaration,
        prolog,
        root,
        epilog,
    })
}

fn open_element(
    input: &str,
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Element, ParseError> {
    let name = utf8(input, reader, start.name().as_ref())?;
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| error_at(input, reader, ParseErrorKind::Syntax, e))?;
        let key = utf8(input, reader, attr.key.as_ref())?;
        if element.attr(&key).is_some() {
            return Err(error_at(
                input,
                reader,
                ParseErrorKind::Syntax,
                format!("duplicate attribute '{}' on <{}>", key, element.name),
            ));
        }
        let value = attr
            .unescape_value()
            .map_err(|e| error_at(input, reader, ParseErrorKind::Syntax, e))?;
        element.attributes.push(Attribute {
            name: key,
            value: value.into_owned(),
        });
    }
    Ok(element)
}

fn close_element(
    input: &str,
    reader: &Reader<&[u8]>,
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(error_at(
                input,
                reader,
                ParseErrorKind::Syntax,
                "more than one root element",
            ));
        }
    }
    Ok(())
}

fn push_misc(
    input: &str,
    reader: &Reader<&[u8]>,
    node: Node,
    stack: &mut [Element],
    root: &Option<Element>,
    prolog: &mut Vec<Node>,
    epilog: &mut Vec<Node>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    match node {
        Node::CData(_) => Err(error_at(
            input,
            reader,
            ParseErrorKind::Syntax,
            "CDATA outside the root element",
        )),
        other if root.is_none() => {
            prolog.push(other);
            Ok(())
        }
        other => {
            epilog.push(other);
            Ok(())
        }
    }
}

fn utf8(input: &str, reader: &Reader<&[u8]>, bytes: &[u8]) -> Result<String, ParseError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_string()),
        Err(e) => Err(error_at(input, reader, ParseErrorKind::Encoding, e)),
    }
}

fn error_at(
    input: &str,
    reader: &Reader<&[u8]>,
    kind: ParseErrorKind,
    cause: impl Display,
) -> ParseError {
    let offset = usize::try_from(reader.buffer_position()).unwrap_or(input.len());
    let (line, column) = line_column(input, offset);
    ParseError {
        kind,
        message: cause.to_string(),
        line: Some(line),
        column: Some(column),
    }
}

/// 1-based line and column of a byte offset.
fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let prefix: Cow<'_, str> = match input.get(..offset.min(input.len())) {
        Some(p) => Cow::Borrowed(p),
        None => String::from_utf8_lossy(&input.as_bytes()[..offset.min(input.len())]),
    };
    let line = prefix.matches('\n').count() + 1;
    let column = prefix.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}
