use std::io;
use thiserror::Error;

/// Errors raised while reading a profile description.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Error ({file}): {source}")]
    Io {
        file: String,
        #[source]
        source: io::Error,
    },
    #[error("Syntax Error ({file}:{line}): {text}")]
    Syntax { file: String, line: usize, text: String },
    #[error("Error ({file}:{line}): Duplicate version statement")]
    DuplicateVersion { file: String, line: usize },
    #[error("Error ({file}:{line}): Duplicate extension statement `{name}`")]
    DuplicateExtension { file: String, line: usize, name: String },
    #[error("Error ({file}): No version statement")]
    MissingVersion { file: String },
}

impl ProfileError {
    /// Line number the error was reported on, if it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match *self {
            ProfileError::Syntax { line, .. }
            | ProfileError::DuplicateVersion { line, .. }
            | ProfileError::DuplicateExtension { line, .. } => Some(line),
            _ => None,
        }
    }
}

/// Errors raised while turning the registry document into entity tables.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML error: {0}")]
    Xml(#[from] xml::reader::Error),
    #[error("unexpected end of registry document")]
    UnexpectedEof,
    #[error("registry document has no root element")]
    MissingRoot,
    #[error("<{element}> is missing the `{attribute}` attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },
    #[error("<{element}> has no <{child}> child")]
    MissingChild { element: String, child: &'static str },
    #[error("feature {feature} has an invalid version number `{number}`")]
    InvalidVersionNumber { feature: String, number: String },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// A subset references something the parsed tables do not contain.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("GL_{subset} requires unknown command {name}")]
    UnknownCommand { subset: String, name: String },
    #[error("GL_{subset} requires unknown enum {name}")]
    UnknownEnum { subset: String, name: String },
}
