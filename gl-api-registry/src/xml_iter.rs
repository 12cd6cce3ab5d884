//! Event-level helpers for reading the registry with `xml-rs`.

use std::io::Read;
use xml::attribute::OwnedAttribute;
use xml::reader::{EventReader, ParserConfig, XmlEvent};
use xml::reader::Result as XmlResult;

/// Creates an event reader configured for the registry.
///
/// Whitespace and CDATA are reported as plain characters, since type and parameter
/// declarations are literal source text where every space counts.
pub fn registry_reader<R: Read>(source: R) -> EventReader<R> {
    let config = ParserConfig::new()
        .whitespace_to_characters(true)
        .cdata_to_characters(true)
        .coalesce_characters(true)
        .ignore_comments(false);
    EventReader::new_with_config(source, config)
}

/// Advances past the prolog to the start of the document element, returning its name and
/// attributes. `Ok(None)` means the document ended without one.
pub fn next_root_element<It: Iterator<Item=XmlResult<XmlEvent>>>(events: &mut It) -> XmlResult<Option<(String, Vec<OwnedAttribute>)>> {
    for e in events {
        match e? {
            XmlEvent::StartElement { name, attributes, .. } => {
                return Ok(Some((name.local_name, attributes)));
            },
            XmlEvent::EndDocument => break,
            _ => {},
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_element_follows_prolog_and_comments() {
        let doc = "<?xml version=\"1.0\"?>\n<!-- header -->\n<registry kind=\"gl\"/>";
        let mut events = registry_reader(doc.as_bytes()).into_iter();
        let (name, attributes) = next_root_element(&mut events).unwrap().unwrap();
        assert_eq!(name, "registry");
        assert_eq!(attributes[0].value, "gl");
    }

    #[test]
    fn whitespace_is_reported_as_text() {
        let events: Vec<XmlEvent> = registry_reader("<a>  <b/></a>".as_bytes())
            .into_iter()
            .map(|e| e.unwrap())
            .collect();
        assert!(events.iter().any(|e| match e {
            &XmlEvent::Characters(ref s) => s == "  ",
            _ => false,
        }));
    }
}
