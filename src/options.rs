use std::path::PathBuf;

/// Registry file kept in the cache directory.
pub const SPEC_FILE_NAME: &'static str = "gl.xml";
/// Where the registry file is downloaded from.
pub const SPEC_URL: &'static str = "http://www.opengl.org/registry/api/";
/// A cached registry older than this many hours is downloaded again.
pub const SPEC_MAX_AGE_HOURS: u64 = 3 * 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Profile description to generate for.
    pub profile: PathBuf,
    /// Directory holding the `*.template` files.
    pub template_dir: PathBuf,
    /// Directory the rendered files are written to.
    pub outdir: PathBuf,
    /// Directory the registry is cached in.
    pub spec_dir: PathBuf,
    /// Download the registry even when the cached copy is fresh.
    pub download: bool,
}

impl GeneratorOptions {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(profile: P, outdir: Q) -> GeneratorOptions {
        GeneratorOptions {
            profile: profile.into(),
            template_dir: PathBuf::from("templates"),
            outdir: outdir.into(),
            spec_dir: PathBuf::from("spec"),
            download: false,
        }
    }

    pub fn spec_path(&self) -> PathBuf {
        self.spec_dir.join(SPEC_FILE_NAME)
    }
}
