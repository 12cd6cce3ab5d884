//! Reads the OpenGL API registry (`gl.xml`) and selects the subset of types, enums and
//! commands a loader needs for a given version, profile and extension list.
//!
//! ```no_run
//! extern crate gl_api_registry;
//!
//! use gl_api_registry::{ parse_profile, Registry };
//! use std::fs::File;
//!
//! let (version, extensions) = parse_profile("profile.txt").unwrap();
//! let registry = Registry::from_reader(File::open("gl.xml").unwrap(), &version).unwrap();
//! let output = registry.generate(&extensions).unwrap();
//! println!("{}", output.enums);
//! ```

extern crate xml;
extern crate regex;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate thiserror;

mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod profile;
pub mod resolver;
pub mod xast;
pub mod xml_iter;

use std::collections::{ HashMap, HashSet };
use std::io::Read;
use xml::attribute::OwnedAttribute;
use xml::reader::XmlEvent;
use xml::reader::Result as XmlResult;

pub use error::{ ParseError, ParseResult, ProfileError, ResolveError };
pub use model::{ ApiSubset, Command, Enum, Function, Type };
pub use output::{ FunctionGroup, GeneratedOutput };
pub use profile::{ parse_profile, parse_profile_str, Api, ExtensionRequest, GlProfile, Version };

use xast::Node;

/// Types that can be built from the events inside one element.
pub trait XmlParse: Sized {
    /// `events` must be positioned just after the start of the element called `name`.
    fn parse<It: Iterator<Item=XmlResult<XmlEvent>>>(events: It, name: String, attributes: Vec<OwnedAttribute>) -> ParseResult<Self>;
}

/// Entity tables of a registry document, filtered for one version.
#[derive(Debug, Clone)]
pub struct Registry {
    pub version: Version,
    pub types: Vec<Type>,
    pub enums: HashMap<String, Enum>,
    pub commands: HashMap<String, Command>,
    /// One subset per applicable feature, in registry order.
    pub features: Vec<ApiSubset>,
    /// Every extension, keyed by its registry name.
    pub extensions: HashMap<String, ApiSubset>,
}

impl Registry {
    pub fn new<It: Iterator<Item=XmlResult<XmlEvent>>>(mut events: It, version: &Version) -> ParseResult<Registry> {
        let root = match xml_iter::next_root_element(&mut events)? {
            Some((name, attributes)) => Node::parse(&mut events, name, attributes)?,
            None => return Err(ParseError::MissingRoot),
        };
        Registry::from_document(&root, version)
    }

    pub fn from_reader<R: Read>(source: R, version: &Version) -> ParseResult<Registry> {
        let root = Node::parse_document(source)?;
        Registry::from_document(&root, version)
    }

    pub fn from_document(root: &Node, version: &Version) -> ParseResult<Registry> {
        let api = version.api().as_str();
        Ok(Registry {
            version: *version,
            types: parser::parse_types(root, api)?,
            enums: parser::parse_enums(root, api)?,
            commands: parser::parse_commands(root)?,
            features: parser::parse_features(root, version)?,
            extensions: parser::parse_extensions(root)?,
        })
    }

    /// Feature subsets followed by one subset per known requested extension.
    pub fn subsets(&self, extensions: &[ExtensionRequest]) -> Vec<ApiSubset> {
        let mut subsets = self.features.clone();
        subsets.extend(resolver::extension_subsets(&self.extensions, extensions));
        subsets
    }

    /// Resolves dependencies and assembles the passthrough, enum and function outputs.
    pub fn generate(&self, extensions: &[ExtensionRequest]) -> Result<GeneratedOutput, ResolveError> {
        let subsets = self.subsets(extensions);

        let required_types = resolver::resolve_type_dependencies(&subsets, &self.types, &self.commands)?;
        let enum_values = resolver::resolve_enum_values(&subsets, &self.enums)?;

        let mut emitted = HashSet::new();
        Ok(GeneratedOutput {
            passthru: output::generate_passthru(&required_types, &self.types),
            enums: output::generate_enums(&subsets, &enum_values),
            functions: output::generate_functions(&subsets, &self.commands, &mut emitted),
        })
    }
}
