//! A small generic XML tree.
//!
//! Elements keep their attributes and their children in document order. Callers ask
//! for children explicitly as "exactly one" ([`XmlElement::child`]), "at most one"
//! ([`XmlElement::optional_child`]) or "zero or more" ([`XmlElement::children_named`]),
//! and get an [`AdapterError`] naming the dotted element path when the shape is wrong.
//!
//! Clue text in CrosswordCompiler exports may carry `<i>` markup and `<br/>` line
//! breaks. Before parsing, italics are swapped for private-use sentinel characters so
//! they survive as plain text, and breaks become spaces; [`XmlElement::text_content`]
//! puts the italics back as literal `<i>…</i>`.

use crate::errors::AdapterError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

const ITALIC_OPEN: char = '\u{E000}';
const ITALIC_CLOSE: char = '\u{E001}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Local name, without any namespace prefix.
    pub name: String,
    /// Dotted path from the root, e.g. `crossword-compiler.rectangular-puzzle`.
    pub path: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    fn new(name: String, parent_path: Option<&str>) -> Self {
        let path = match parent_path {
            Some(parent) => format!("{parent}.{name}"),
            None => name.clone(),
        };
        XmlElement { name, path, attributes: BTreeMap::new(), children: Vec::new() }
    }

    /// Children called `name`, in document order. They borrow from `self` only.
    pub fn children_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a XmlElement> + 'n
    where
        'a: 'n,
    {
        self.children.iter().filter_map(move |node| match node {
            XmlNode::Element(el) if el.name == name => Some(el),
            _ => None,
        })
    }

    #[must_use]
    pub fn has_child(&self, name: &str) -> bool {
        self.children_named(name).next().is_some()
    }

    /// Zero or one child called `name`.
    pub fn optional_child(&self, name: &str) -> Result<Option<&XmlElement>, AdapterError> {
        let mut found = self.children_named(name);
        let first = found.next();
        let extra = found.count();
        if extra > 0 {
            return Err(AdapterError::DuplicateElement {
                path: format!("{}.{name}", self.path),
                count: extra + 1,
            });
        }
        Ok(first)
    }

    /// Exactly one child called `name`.
    pub fn child(&self, name: &str) -> Result<&XmlElement, AdapterError> {
        self.optional_child(name)?.ok_or_else(|| AdapterError::MissingElement {
            path: format!("{}.{name}", self.path),
        })
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn required_attr(&self, name: &str) -> Result<&str, AdapterError> {
        self.attr(name).ok_or_else(|| AdapterError::MissingAttribute {
            path: self.path.clone(),
            attribute: name.to_string(),
        })
    }

    /// All descendant text, whitespace collapsed, italics restored as `<i>…</i>`.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut raw = String::new();
        self.collect_text(&mut raw);
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed.replace(ITALIC_OPEN, "<i>").replace(ITALIC_CLOSE, "</i>")
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(el) => el.collect_text(out),
            }
        }
    }
}

/// Swap italics for sentinels and drop injected line breaks.
fn protect_markup(text: &str) -> String {
    text.replace("<i>", &ITALIC_OPEN.to_string())
        .replace("</i>", &ITALIC_CLOSE.to_string())
        .replace("<br/>", " ")
        .replace("<br />", " ")
        .replace("<br>", " ")
}

fn start_element(e: &BytesStart<'_>, parent_path: Option<&str>) -> Result<XmlElement, AdapterError> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut element = XmlElement::new(name, parent_path);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| AdapterError::MalformedXml { message: err.to_string() })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let local = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| AdapterError::MalformedXml { message: err.to_string() })?;
        element.attributes.insert(local, value.into_owned());
    }
    Ok(element)
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Parse `text` into a tree rooted at the document element.
pub fn parse_xml(text: &str) -> Result<XmlElement, AdapterError> {
    let protected = protect_markup(text);
    let mut reader = Reader::from_str(&protected);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root = None;

    loop {
        let parent_path = stack.last().map(|el| el.path.clone());
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(start_element(&e, parent_path.as_deref())?),
            Ok(Event::Empty(e)) => {
                let element = start_element(&e, parent_path.as_deref())?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|err| AdapterError::MalformedXml { message: err.to_string() })?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(text.into_owned()));
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                    parent.children.push(XmlNode::Text(text));
                }
            }
            Ok(Event::Eof) => break,
            // declarations, comments, processing instructions, doctype
            Ok(_) => {}
            Err(err) => {
                return Err(AdapterError::MalformedXml {
                    message: format!("at byte {}: {err}", reader.buffer_position()),
                })
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(AdapterError::MalformedXml { message: format!("unclosed element {}", open.path) });
    }
    root.ok_or_else(|| AdapterError::MalformedXml { message: "no root element".to_string() })
}
