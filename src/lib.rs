//! Generates OpenGL loader sources from the API registry.
//!
//! A profile description picks the version and extensions, the registry is downloaded (or
//! reused when fresh), and every `*.template` in the template directory is rendered with
//! the selected types, enums and functions.

extern crate gl_api_registry;
extern crate glob;
#[macro_use]
extern crate log;
extern crate minijinja;
extern crate reqwest;
extern crate serde;
extern crate thiserror;

pub mod error;
pub mod options;
pub mod spec_cache;
pub mod template;

use std::fs::File;
use std::io::BufReader;
use gl_api_registry::{ parse_profile, Registry };

pub use error::{ GenerateError, Result };
pub use options::GeneratorOptions;
pub use spec_cache::{ Fetcher, HttpFetcher };
pub use template::{ JinjaEngine, Namespace, TemplateEngine };

/// Runs the whole pipeline for `options`. Returns `(generated, total)` file counts.
pub fn run<F: Fetcher + ?Sized, E: TemplateEngine + ?Sized>(options: &GeneratorOptions, fetcher: &F, engine: &E) -> Result<(usize, usize)> {
    let (version, extensions) = parse_profile(&options.profile)?;
    info!("Generating loader for {}", version);

    let spec_path = spec_cache::ensure_spec(options, fetcher)?;
    let registry = Registry::from_reader(BufReader::new(File::open(&spec_path)?), &version)?;
    let output = registry.generate(&extensions)?;

    let namespace = Namespace {
        passthru: &output.passthru,
        functions: &output.functions,
        enums: &output.enums,
        options: options,
        version: &version,
        extensions: &extensions,
    };
    template::generate_source(options, engine, &namespace)
}
