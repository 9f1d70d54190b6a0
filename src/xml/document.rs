//! Whole-part parsing and serialization

use quick_xml::events::{BytesDecl, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

use crate::error::{Error, Result};
use crate::xml::{RawXmlElement, RawXmlNode};

/// XML declaration (`<?xml ...?>`) as read from a part
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// A parsed XML part: declaration, prolog nodes and the root element
#[derive(Clone, Debug, PartialEq)]
pub struct XmlDocument {
    pub declaration: Option<Declaration>,
    /// Comments and whitespace between the declaration and the root
    pub prolog: Vec<RawXmlNode>,
    pub root: RawXmlElement,
}

impl XmlDocument {
    /// Parse a complete XML document
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);

        let mut declaration = None;
        let mut prolog = Vec::new();
        let mut buf = Vec::new();

        let root = loop {
            match reader.read_event_into(&mut buf)? {
                Event::Decl(d) => {
                    let version = String::from_utf8_lossy(&d.version()?).into_owned();
                    let encoding = match d.encoding() {
                        Some(enc) => Some(String::from_utf8_lossy(&enc?).into_owned()),
                        None => None,
                    };
                    let standalone = match d.standalone() {
                        Some(sa) => Some(String::from_utf8_lossy(&sa?).into_owned()),
                        None => None,
                    };
                    declaration = Some(Declaration {
                        version,
                        encoding,
                        standalone,
                    });
                }
                Event::Start(e) => break RawXmlElement::from_reader(&mut reader, &e)?,
                Event::Empty(e) => break RawXmlElement::from_start(&e)?,
                Event::Comment(c) => {
                    prolog.push(RawXmlNode::Comment(String::from_utf8_lossy(&c).into_owned()));
                }
                Event::PI(p) => {
                    prolog.push(RawXmlNode::ProcessingInstruction(
                        String::from_utf8_lossy(&p).into_owned(),
                    ));
                }
                Event::Text(t) => {
                    let text = t.unescape()?.into_owned();
                    if !text.is_empty() {
                        prolog.push(RawXmlNode::Text(text));
                    }
                }
                Event::Eof => {
                    return Err(Error::InvalidDocument("no root element".into()));
                }
                _ => {}
            }
            buf.clear();
        };

        Ok(Self {
            declaration,
            prolog,
            root,
        })
    }

    /// Serialize back to a string
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        if let Some(decl) = &self.declaration {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
        }
        for node in &self.prolog {
            node.write_to(&mut writer)?;
        }
        self.root.write_to(&mut writer)?;

        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes).map_err(|e| e.utf8_error())?)
    }
}
