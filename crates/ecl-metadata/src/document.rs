//! Minimal element tree built from quick-xml events.
//!
//! Only what metadata mapping needs is kept per element: its local name, its
//! concatenated descendant text, the raw markup between its tags, and its
//! child elements. Attributes, comments and processing instructions are
//! dropped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::MappingError;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Element {
    local_name: String,
    text: String,
    inner_xml: String,
    children: Vec<Element>,
}

impl Element {
    fn new(local_name: String) -> Self {
        Self {
            local_name,
            ..Self::default()
        }
    }

    pub(crate) fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Concatenated text of all descendants, entities resolved.
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Markup between the start and end tag, exactly as written.
    pub(crate) fn inner_xml(&self) -> &str {
        &self.inner_xml
    }

    /// Immediate children whose local name equals `name`, in document order.
    pub(crate) fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.local_name == name)
    }
}

/// Parse a complete document and return its root element.
pub(crate) fn parse(xml: &str) -> Result<Element, MappingError> {
    let mut reader = Reader::from_str(xml);
    // Open elements with the byte offset where their content starts.
    let mut stack: Vec<(Element, usize)> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(xml_error)?;

        match event {
            Event::Start(start) => {
                let element = Element::new(local_name(&start)?);
                let content_start = reader.buffer_position() as usize;
                stack.push((element, content_start));
            }
            Event::Empty(start) => {
                let element = Element::new(local_name(&start)?);
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let (mut element, content_start) = stack
                    .pop()
                    .ok_or_else(|| MappingError::Xml("unexpected closing tag".into()))?;
                element.inner_xml = xml
                    .get(content_start..before)
                    .unwrap_or_default()
                    .to_string();
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(xml_error)?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(data) => {
                push_text(&mut stack, &String::from_utf8_lossy(&data))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((open, _)) = stack.last() {
        return Err(MappingError::Xml(format!(
            "element '{}' is not closed",
            open.local_name
        )));
    }

    root.ok_or(MappingError::MissingRoot)
}

fn local_name(start: &BytesStart<'_>) -> Result<String, MappingError> {
    let name = start.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_owned)
        .map_err(xml_error)
}

/// Hand a closed element to its parent, or make it the document root.
fn attach(
    stack: &mut [(Element, usize)],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), MappingError> {
    match stack.last_mut() {
        Some((parent, _)) => {
            parent.text.push_str(&element.text);
            parent.children.push(element);
            Ok(())
        }
        None if root.is_some() => Err(MappingError::Xml(format!(
            "second root element '{}'",
            element.local_name
        ))),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}

fn push_text(stack: &mut [(Element, usize)], text: &str) -> Result<(), MappingError> {
    match stack.last_mut() {
        Some((element, _)) => {
            element.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(MappingError::Xml("text outside the root element".into())),
    }
}

fn xml_error(e: impl std::fmt::Display) -> MappingError {
    MappingError::Xml(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_nested_elements() {
        let root = parse("<Meta><A>1</A><B><C>2</C></B><A>3</A></Meta>").unwrap();
        assert_eq!(root.local_name(), "Meta");
        assert_eq!(root.text(), "123");

        let a: Vec<_> = root.children_named("A").map(Element::text).collect();
        assert_eq!(a, ["1", "3"]);

        let b = root.children_named("B").next().unwrap();
        assert_eq!(b.children_named("C").next().unwrap().text(), "2");
    }

    #[test]
    fn local_name_ignores_prefix() {
        let root = parse(
            r#"<m:Meta xmlns:m="urn:meta"><m:Title>x</m:Title><Title>y</Title></m:Meta>"#,
        )
        .unwrap();
        assert_eq!(root.local_name(), "Meta");
        assert_eq!(root.children_named("Title").count(), 2);
    }

    #[test]
    fn inner_xml_is_verbatim() {
        let root = parse("<Meta><Body><p>a &amp; <b>b</b></p></Body></Meta>").unwrap();
        let body = root.children_named("Body").next().unwrap();
        assert_eq!(body.inner_xml(), "<p>a &amp; <b>b</b></p>");
        assert_eq!(body.text(), "a & b");
    }

    #[test]
    fn cdata_and_empty_elements() {
        let root = parse("<?xml version=\"1.0\"?>\n<Meta><A><![CDATA[<x>]]></A><B/></Meta>").unwrap();
        assert_eq!(root.children_named("A").next().unwrap().text(), "<x>");
        let b = root.children_named("B").next().unwrap();
        assert_eq!(b.text(), "");
        assert_eq!(b.inner_xml(), "");
    }

    #[test]
    fn rejects_malformed_documents() {
        assert_matches!(parse("<Meta><A></Meta>"), Err(MappingError::Xml(_)));
        assert_matches!(parse("<Meta><A>"), Err(MappingError::Xml(_)));
        assert_matches!(parse("<A/><B/>"), Err(MappingError::Xml(_)));
        assert_matches!(parse("just text"), Err(MappingError::Xml(_)));
        assert_matches!(parse("   "), Err(MappingError::MissingRoot));
    }
}
