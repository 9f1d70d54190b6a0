//! Raw XML tree: the mutable element model every document part is edited through

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

use crate::error::{Error, Result};
use crate::xml::{NodePath, XML_SPACE};

/// Raw XML node
#[derive(Clone, Debug, PartialEq)]
pub enum RawXmlNode {
    /// Element node
    Element(RawXmlElement),
    /// Text node (unescaped)
    Text(String),
    /// CDATA section
    CData(String),
    /// Comment node (kept verbatim)
    Comment(String),
    /// Processing instruction, target and content verbatim
    ProcessingInstruction(String),
}

/// Raw XML element with attributes and children
#[derive(Clone, Debug, PartialEq)]
pub struct RawXmlElement {
    /// Full element name (with prefix, e.g., "w:t")
    pub name: String,
    /// Attributes as (name, value) pairs, values unescaped
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<RawXmlNode>,
    /// Whether this was a self-closing element
    pub self_closing: bool,
}

impl RawXmlElement {
    /// Create a new empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Create a new self-closing element (e.g. `<w:br/>`)
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            self_closing: true,
            ..Self::new(name)
        }
    }

    /// Read a complete element from XML reader (starting after the start tag was read)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut element = Self::from_start(start)?;
        element.self_closing = false;

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let child = Self::from_reader(reader, &e)?;
                    element.children.push(RawXmlNode::Element(child));
                }
                Event::Empty(e) => {
                    element
                        .children
                        .push(RawXmlNode::Element(Self::from_start(&e)?));
                }
                Event::Text(t) => {
                    // Whitespace is content in WordprocessingML, never trimmed
                    let text = t.unescape()?.into_owned();
                    if !text.is_empty() {
                        element.children.push(RawXmlNode::Text(text));
                    }
                }
                Event::CData(c) => {
                    element
                        .children
                        .push(RawXmlNode::CData(String::from_utf8_lossy(&c).into_owned()));
                }
                Event::Comment(c) => {
                    element
                        .children
                        .push(RawXmlNode::Comment(String::from_utf8_lossy(&c).into_owned()));
                }
                Event::PI(p) => {
                    element.children.push(RawXmlNode::ProcessingInstruction(
                        String::from_utf8_lossy(&p).into_owned(),
                    ));
                }
                Event::End(e) => {
                    if e.name().as_ref() == element.name.as_bytes() {
                        break;
                    }
                }
                Event::Eof => {
                    return Err(Error::InvalidDocument(format!(
                        "unexpected EOF inside <{}>",
                        element.name
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(element)
    }

    /// Create from empty element tag
    pub fn from_start(e: &BytesStart) -> Result<Self> {
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            attributes.push((
                String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                attr.unescape_value()?.into_owned(),
            ));
        }

        Ok(Self {
            name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
            self_closing: true,
        })
    }

    /// Write element to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.self_closing {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            for child in &self.children {
                child.write_to(writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        }

        Ok(())
    }

    /// Check the full (prefixed) element name
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Whether `xml:space="preserve"` is set on this element
    pub fn preserves_space(&self) -> bool {
        self.attr(XML_SPACE) == Some("preserve")
    }

    /// Mark this element `xml:space="preserve"`
    pub fn set_preserve_space(&mut self) {
        self.set_attr(XML_SPACE, "preserve");
    }

    /// Concatenated text of the direct text children
    pub fn text(&self) -> String {
        let mut result = String::new();
        for child in &self.children {
            match child {
                RawXmlNode::Text(t) | RawXmlNode::CData(t) => result.push_str(t),
                _ => {}
            }
        }
        result
    }

    /// Replace all direct text children with a single text node
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.children
            .retain(|c| !matches!(c, RawXmlNode::Text(_) | RawXmlNode::CData(_)));
        if !text.is_empty() {
            self.children.push(RawXmlNode::Text(text));
        }
        self.self_closing = false;
    }

    /// Iterate over direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &RawXmlElement> {
        self.children.iter().filter_map(|c| match c {
            RawXmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First direct child element with the given name
    pub fn find_child(&self, name: &str) -> Option<&RawXmlElement> {
        self.child_elements().find(|e| e.is(name))
    }

    /// Get a descendant node of any kind by path; the empty path has no node
    pub fn node_at(&self, path: &NodePath) -> Option<&RawXmlNode> {
        let (last, ancestors) = path.indices().split_last()?;
        self.element_at(&NodePath::from_indices(ancestors.to_vec()))?
            .children
            .get(*last)
    }

    /// Get a descendant element by path (empty path is `self`)
    pub fn element_at(&self, path: &NodePath) -> Option<&RawXmlElement> {
        let mut current = self;
        for &idx in path.indices() {
            current = match current.children.get(idx)? {
                RawXmlNode::Element(e) => e,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Get a descendant element mutably by path (empty path is `self`)
    pub fn element_at_mut(&mut self, path: &NodePath) -> Option<&mut RawXmlElement> {
        let mut current = self;
        for &idx in path.indices() {
            current = match current.children.get_mut(idx)? {
                RawXmlNode::Element(e) => e,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Insert nodes at `index` among the children, returning the index after the last one
    pub fn insert_children(
        &mut self,
        index: usize,
        nodes: impl IntoIterator<Item = RawXmlNode>,
    ) -> usize {
        let before = self.children.len();
        let at = index.min(before);
        self.children.splice(at..at, nodes);
        self.self_closing = false;
        at + (self.children.len() - before)
    }

    /// Detach the child at `index`
    pub fn remove_child(&mut self, index: usize) -> Option<RawXmlNode> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    /// Paths (relative to `self`) of all descendant elements matching `matches`,
    /// in document order. Subtrees whose root satisfies `prune` are skipped.
    pub fn collect_paths<M, P>(&self, matches: M, prune: P) -> Vec<NodePath>
    where
        M: Fn(&RawXmlElement) -> bool,
        P: Fn(&RawXmlElement) -> bool,
    {
        let mut out = Vec::new();
        self.collect_into(&NodePath::root(), &matches, &prune, &mut out);
        out
    }

    fn collect_into<M, P>(&self, base: &NodePath, matches: &M, prune: &P, out: &mut Vec<NodePath>)
    where
        M: Fn(&RawXmlElement) -> bool,
        P: Fn(&RawXmlElement) -> bool,
    {
        for (idx, child) in self.children.iter().enumerate() {
            if let RawXmlNode::Element(e) = child {
                if prune(e) {
                    continue;
                }
                let path = base.child(idx);
                if matches(e) {
                    out.push(path.clone());
                }
                e.collect_into(&path, matches, prune, out);
            }
        }
    }

    /// Visit every element of the subtree, `self` included
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut RawXmlElement)) {
        f(self);
        for child in &mut self.children {
            if let RawXmlNode::Element(e) = child {
                e.visit_mut(f);
            }
        }
    }

    /// Add an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child element
    pub fn with_child(mut self, child: RawXmlElement) -> Self {
        self.children.push(RawXmlNode::Element(child));
        self.self_closing = false;
        self
    }

    /// Add a text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(RawXmlNode::Text(text.into()));
        self.self_closing = false;
        self
    }
}

impl RawXmlNode {
    /// Write node to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            RawXmlNode::Element(e) => e.write_to(writer),
            RawXmlNode::Text(t) => {
                writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(
                    t.as_str(),
                ))))?;
                Ok(())
            }
            RawXmlNode::CData(c) => {
                writer.write_event(Event::CData(BytesCData::new(c.as_str())))?;
                Ok(())
            }
            RawXmlNode::Comment(c) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(c.as_str())))?;
                Ok(())
            }
            RawXmlNode::ProcessingInstruction(p) => {
                writer.write_event(Event::PI(BytesPI::new(p.as_str())))?;
                Ok(())
            }
        }
    }

    /// Borrow as element
    pub fn as_element(&self) -> Option<&RawXmlElement> {
        match self {
            RawXmlNode::Element(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RawXmlElement> for RawXmlNode {
    fn from(e: RawXmlElement) -> Self {
        RawXmlNode::Element(e)
    }
}
