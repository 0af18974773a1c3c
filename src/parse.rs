//! Icon markup parsing from XML.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::ast::*;
use crate::error::IconError;

/// Parse an SVG string into a Document.
///
/// Declarations, DOCTYPEs, comments and PIs outside the root element are
/// dropped. Whitespace-only text is not kept. Any other content after the
/// root makes the document invalid.
pub fn parse_svg(svg: &str) -> Result<Document, IconError> {
    let mut reader = Reader::from_str(svg);
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                root = Some(parse_element(&mut reader, &start)?);
                break;
            }
            Event::Empty(start) => {
                root = Some(parse_element_start(&start)?);
                break;
            }
            Event::Eof => break,
            // Skip declarations, comments, whitespace and PIs before root
            _ => {}
        }
    }

    let root = root.ok_or_else(|| IconError::InvalidSvg("No root element found".into()))?;
    expect_trailing_misc(&mut reader)?;
    if !root.is("svg") {
        return Err(IconError::InvalidSvg(format!(
            "Root element is <{}>, expected <svg>",
            root.name.full_name()
        )));
    }

    Ok(Document { root })
}

/// Consume everything after the root, allowing only comments, PIs and blank text.
fn expect_trailing_misc(reader: &mut Reader<&[u8]>) -> Result<(), IconError> {
    loop {
        match reader.read_event()? {
            Event::Eof => return Ok(()),
            Event::Comment(_) | Event::PI(_) => {}
            Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => {}
            _ => {
                return Err(IconError::InvalidSvg("Content after root element".into()));
            }
        }
    }
}

fn parse_element(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<Element, IconError> {
    let mut element = parse_element_start(start)?;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                element
                    .children
                    .push(Node::Element(parse_element(reader, &start)?));
            }
            Event::Empty(start) => {
                element
                    .children
                    .push(Node::Element(parse_element_start(&start)?));
            }
            Event::End(_) => break,
            Event::Text(text) => {
                let text = text.unescape()?;
                if !text.trim().is_empty() {
                    element.children.push(Node::Text(text.into_owned()));
                }
            }
            Event::CData(cdata) => {
                element
                    .children
                    .push(Node::CData(String::from_utf8_lossy(&cdata).into_owned()));
            }
            Event::Comment(comment) => {
                element
                    .children
                    .push(Node::Comment(String::from_utf8_lossy(&comment).into_owned()));
            }
            Event::Eof => {
                return Err(IconError::InvalidSvg("Unexpected end of file".into()));
            }
            _ => {}
        }
    }

    Ok(element)
}

fn parse_element_start(start: &BytesStart) -> Result<Element, IconError> {
    let name_bytes = start.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?;

    let mut element = Element {
        name: QName::parse(name),
        attributes: Vec::new(),
        children: Vec::new(),
    };

    for attr in start.attributes() {
        let attr = attr.map_err(|e| IconError::InvalidSvg(format!("Invalid attribute: {}", e)))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        element.set_attr_qualified(QName::parse(key), value.into_owned());
    }

    Ok(element)
}

impl Element {
    fn set_attr_qualified(&mut self, name: QName, value: String) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }
}
