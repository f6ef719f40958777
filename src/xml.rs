//! Minimal navigable XML tree over quick-xml events.
//!
//! Slide markup is walked with "all descendants named X" and "attribute Y"
//! queries that cross several nesting levels, which is awkward to express on
//! a streaming reader. Parts are small, so they are materialized into an
//! owned [`XmlNode`] tree first.
//!
//! Element and attribute names are kept exactly as written, prefix included
//! (`p:sp`, `r:embed`).

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};

/// An element node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Qualified tag name, e.g. `a:p`
    pub name: String,
    /// Attributes in document order, names qualified
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<XmlNode>,
    /// Character data directly inside this element
    pub text: String,
    /// Position among the parent's element children (0 for the root)
    pub index: usize,
}

impl XmlNode {
    fn from_start(start: &BytesStart<'_>, index: usize) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
            index,
        })
    }

    /// Attribute value by qualified name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute parsed as an integer; missing or malformed values yield `None`.
    pub fn attr_i64(&self, name: &str) -> Option<i64> {
        self.attr(name).and_then(|v| v.trim().parse::<i64>().ok())
    }

    /// Direct child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All descendant elements (excluding `self`) with the given name, in
    /// document order.
    pub fn descendants(&self, name: &str) -> Vec<&XmlNode> {
        let mut out = Vec::new();
        self.collect_descendants(name, &mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect_descendants(name, out);
        }
    }

    /// First descendant (excluding `self`) with the given name, in document order.
    pub fn first_descendant(&self, name: &str) -> Option<&XmlNode> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.first_descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated character data of this element and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Parse an XML document into its root element.
///
/// Mismatched or unclosed tags and documents without a root element are
/// rejected with [`Error::XmlParse`].
pub fn parse(xml: &str) -> Result<XmlNode> {
    let mut reader = quick_xml::Reader::from_str(xml);
    // a:t runs carry significant whitespace
    reader.config_mut().trim_text(false);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if root.is_some() {
                    return Err(Error::XmlParse("content after root element".to_string()));
                }
                let index = stack.last().map_or(0, |p| p.children.len());
                stack.push(XmlNode::from_start(&e, index)?);
            }
            Ok(Event::Empty(e)) => {
                let index = stack.last().map_or(0, |p| p.children.len());
                let node = XmlNode::from_start(&e, index)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None if root.is_none() => root = Some(node),
                    None => {
                        return Err(Error::XmlParse("content after root element".to_string()))
                    }
                }
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| Error::XmlParse("unbalanced end tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root = Some(node),
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(node) = stack.last_mut() {
                    let text = e.unescape()?;
                    node.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::XmlParse(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| Error::XmlParse("document has no root element".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree() {
        let root = parse(
            r#"<?xml version="1.0"?>
<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
  <p:sp><p:txBody><a:p><a:r><a:t>Hello &amp; bye</a:t></a:r></a:p></p:txBody></p:sp>
  <p:pic><p:blipFill><a:blip r:embed="rId2"/></p:blipFill></p:pic>
</p:spTree></p:cSld></p:sld>"#,
        )
        .unwrap();

        assert_eq!(root.name, "p:sld");
        let shapes = root.descendants("p:sp");
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].text_content().trim(), "Hello & bye");

        let blip = root.first_descendant("a:blip").unwrap();
        assert_eq!(blip.attr("r:embed"), Some("rId2"));
        assert_eq!(blip.attr("embed"), None);
    }

    #[test]
    fn test_sibling_index() {
        let root = parse("<t><a/><b></b><c/></t>").unwrap();
        let indices: Vec<usize> = root.children.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(root.child("c").map(|c| c.index), Some(2));
    }

    #[test]
    fn test_descendants_document_order() {
        let root = parse("<r><a:p n=\"1\"><a:p n=\"2\"/></a:p><a:p n=\"3\"/></r>").unwrap();
        let order: Vec<&str> = root
            .descendants("a:p")
            .iter()
            .filter_map(|n| n.attr("n"))
            .collect();
        assert_eq!(order, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_whitespace_preserved() {
        let root = parse("<a:t> two  spaces </a:t>").unwrap();
        assert_eq!(root.text, " two  spaces ");
    }

    #[test]
    fn test_attr_i64() {
        let root = parse(r#"<a:off x="914400" y="oops"/>"#).unwrap();
        assert_eq!(root.attr_i64("x"), Some(914400));
        assert_eq!(root.attr_i64("y"), None);
        assert_eq!(root.attr_i64("z"), None);
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(parse("<a><b></a>"), Err(Error::XmlParse(_))));
        assert!(matches!(parse("<a><b>"), Err(Error::XmlParse(_))));
        assert!(matches!(parse(""), Err(Error::XmlParse(_))));
        assert!(matches!(parse("<a/><b/>"), Err(Error::XmlParse(_))));
    }
}
