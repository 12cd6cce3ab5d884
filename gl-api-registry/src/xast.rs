use std::io::Read;
use xml::attribute::OwnedAttribute;
use xml::reader::XmlEvent;
use xml::reader::Result as XmlResult;
use crate::{ ParseError, ParseResult, XmlParse };
use crate::xml_iter::{ next_root_element, registry_reader };

#[derive(Debug, Clone)]
pub enum Content {
    Comment(String),
    Text(String),
    Child(Node),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub attributes: Vec<OwnedAttribute>,
    pub contents: Vec<Content>,
}

impl Node {
    pub fn new(name: String, attributes: Vec<OwnedAttribute>) -> Node {
        Node {
            name: name,
            attributes: attributes,
            contents: Vec::new(),
        }
    }

    /// Reads a whole document and returns its root element.
    pub fn parse_document<R: Read>(source: R) -> ParseResult<Node> {
        let mut events = registry_reader(source).into_iter();
        match next_root_element(&mut events)? {
            Some((name, attributes)) => Node::parse(&mut events, name, attributes),
            None => Err(ParseError::MissingRoot),
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter()
            .find(|attr| attr.name.local_name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    pub fn require_attribute(&self, name: &'static str) -> ParseResult<&str> {
        self.get_attribute(name).ok_or_else(|| ParseError::MissingAttribute {
            element: self.name.clone(),
            attribute: name,
        })
    }

    pub fn children(&self) -> impl Iterator<Item=&Node> {
        self.contents.iter().filter_map(|c| match c {
            &Content::Child(ref n) => Some(n),
            _ => None,
        })
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item=&'a Node> + 'a {
        self.children().filter(move |c| c.name == name)
    }

    pub fn get_child(&self, name: &str) -> Option<&Node> {
        self.children().find(|c| c.name == name)
    }

    pub fn require_child(&self, name: &'static str) -> ParseResult<&Node> {
        self.get_child(name).ok_or_else(|| ParseError::MissingChild {
            element: self.name.clone(),
            child: name,
        })
    }

    /// Text that comes before the first child element. Comments do not interrupt it.
    pub fn leading_text(&self) -> String {
        let mut ret = String::new();
        for c in &self.contents {
            match c {
                &Content::Text(ref s) => ret.push_str(s),
                &Content::Comment(_) => {},
                &Content::Child(_) => break,
            }
        }
        ret
    }

    /// Flattens mixed content into one string.
    ///
    /// Text of this node is kept verbatim. A child element whose tag appears in
    /// `substitutes` is replaced by the given string; any other child contributes only
    /// its own leading text. Text following a child is always kept.
    pub fn flatten_text(&self, substitutes: &[(&str, &str)]) -> String {
        let mut ret = String::new();
        for c in &self.contents {
            match c {
                &Content::Text(ref s) => ret.push_str(s),
                &Content::Comment(_) => {},
                &Content::Child(ref child) => {
                    match substitutes.iter().find(|&&(tag, _)| tag == child.name) {
                        Some(&(_, replacement)) => ret.push_str(replacement),
                        None => ret.push_str(&child.leading_text()),
                    }
                },
            }
        }
        ret
    }

    /// Names of the direct children with tag `tag` that carry a `name` attribute, in
    /// document order.
    pub fn child_names(&self, tag: &str) -> Vec<String> {
        self.children_named(tag)
            .filter_map(|c| c.get_attribute("name"))
            .map(String::from)
            .collect()
    }

    fn push_text(&mut self, s: String) {
        if let Some(&mut Content::Text(ref mut last)) = self.contents.last_mut() {
            last.push_str(&s);
            return;
        }
        self.contents.push(Content::Text(s));
    }
}

impl XmlParse for Node {
    /// Consumes events up to and including the end of the element, and no further.
    fn parse<It: Iterator<Item=XmlResult<XmlEvent>>>(events: It, name: String, attributes: Vec<OwnedAttribute>) -> ParseResult<Node> {
        // Open elements, innermost last. The first entry is the element being parsed.
        let mut node_stack: Vec<Node> = vec![Node::new(name, attributes)];
        for e in events {
            match e? {
                XmlEvent::StartElement { name, attributes, .. } => {
                    node_stack.push(Node::new(name.local_name, attributes));
                },
                XmlEvent::EndElement { .. } => {
                    let child = node_stack.pop().ok_or(ParseError::UnexpectedEof)?;
                    match node_stack.last_mut() {
                        Some(parent) => parent.contents.push(Content::Child(child)),
                        None => return Ok(child),
                    }
                },
                XmlEvent::Characters(s) | XmlEvent::Whitespace(s) | XmlEvent::CData(s) => {
                    let node = node_stack.last_mut().ok_or(ParseError::UnexpectedEof)?;
                    node.push_text(s);
                },
                XmlEvent::Comment(s) => {
                    let node = node_stack.last_mut().ok_or(ParseError::UnexpectedEof)?;
                    node.contents.push(Content::Comment(s));
                },
                _ => {},
            }
        }
        Err(ParseError::UnexpectedEof)
    }
}
