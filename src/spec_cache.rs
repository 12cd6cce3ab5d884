//! Local copy of the registry document.

use std::fs;
use std::io;
use std::path::{ Path, PathBuf };
use std::time::{ Duration, SystemTime };
use crate::error::{ GenerateError, Result };
use crate::options::{ GeneratorOptions, SPEC_FILE_NAME, SPEC_MAX_AGE_HOURS, SPEC_URL };

/// Downloads a URL to a file.
pub trait Fetcher {
    fn fetch(&self, url: &str, dest: &Path) -> io::Result<()>;
}

/// Fetches over HTTP with a blocking `reqwest` client.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

fn to_io_error(e: reqwest::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> io::Result<()> {
        let response = reqwest::blocking::get(url)
            .and_then(|r| r.error_for_status())
            .map_err(to_io_error)?;
        let body = response.bytes().map_err(to_io_error)?;
        fs::write(dest, &body)
    }
}

pub fn max_age() -> Duration {
    Duration::from_secs(SPEC_MAX_AGE_HOURS * 60 * 60)
}

/// Whether `path` has to be downloaded: when forced, when it does not exist, or when it
/// was last modified more than `max_age` ago.
pub fn needs_refresh(path: &Path, force: bool, max_age: Duration) -> bool {
    if force {
        return true;
    }
    let modified = match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(_) => return true,
    };
    match SystemTime::now().duration_since(modified) {
        Ok(age) => age > max_age,
        // Modified in the future.
        Err(_) => false,
    }
}

/// Makes sure a usable registry sits at `options.spec_path()` and returns that path.
pub fn ensure_spec<F: Fetcher + ?Sized>(options: &GeneratorOptions, fetcher: &F) -> Result<PathBuf> {
    fs::create_dir_all(&options.spec_dir)?;
    let path = options.spec_path();

    if needs_refresh(&path, options.download, max_age()) {
        let url = format!("{}{}", SPEC_URL, SPEC_FILE_NAME);
        info!("Downloading {}", url);
        fetcher.fetch(&url, &path).map_err(|e| GenerateError::Fetch {
            url: url.clone(),
            source: e,
        })?;
    } else {
        debug!("using cached {}", path.display());
    }

    Ok(path)
}
