use std::io;
use std::path::PathBuf;
use gl_api_registry::{ ParseError, ProfileError, ResolveError };
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("failed to parse registry: {0}")]
    Registry(#[from] ParseError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to download {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to render {template}: {message}")]
    Render { template: String, message: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = ::std::result::Result<T, GenerateError>;
