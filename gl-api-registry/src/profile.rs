//! Profile descriptions: which API version to target and which extensions to load.
//!
//! ```text
//! # comment
//! version 3.3 core
//! extension ARB_debug_output optional
//! extension EXT_texture_filter_anisotropic required
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use regex::Regex;
use crate::ProfileError;

lazy_static! {
    static ref COMMENT_PATTERN: Regex = Regex::new(r"^(?:#.*|\s*)$").unwrap();
    static ref VERSION_PATTERN: Regex =
        Regex::new(r"^version\s+(\d)\.(\d)\s*(core|compatibility|es|)\s*$").unwrap();
    static ref EXTENSION_PATTERN: Regex =
        Regex::new(r"^extension\s+(\w+)\s+(required|optional)\s*$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Api {
    Gl,
    Gles1,
    Gles2,
}

impl Api {
    /// The `api` attribute value the registry uses for this API.
    pub fn as_str(self) -> &'static str {
        match self {
            Api::Gl => "gl",
            Api::Gles1 => "gles1",
            Api::Gles2 => "gles2",
        }
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desktop GL profile. Always `Unspecified` for the ES APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlProfile {
    Unspecified,
    Core,
    Compatibility,
}

impl GlProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            GlProfile::Unspecified => "",
            GlProfile::Core => "core",
            GlProfile::Compatibility => "compatibility",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    api: Api,
    major: u32,
    minor: u32,
    profile: GlProfile,
}

impl Version {
    pub fn new(api: Api, major: u32, minor: u32, profile: GlProfile) -> Version {
        let profile = match api {
            Api::Gl => profile,
            _ => GlProfile::Unspecified,
        };
        Version {
            api: api,
            major: major,
            minor: minor,
            profile: profile,
        }
    }

    /// Builds a version from the trailing qualifier of a `version` statement.
    ///
    /// `es` selects GLES1 for major version 1 and GLES2 otherwise; anything else is a
    /// desktop GL profile.
    pub fn from_qualifier(major: u32, minor: u32, qualifier: &str) -> Version {
        match qualifier {
            "es" if major == 1 => Version::new(Api::Gles1, major, minor, GlProfile::Unspecified),
            "es" => Version::new(Api::Gles2, major, minor, GlProfile::Unspecified),
            "core" => Version::new(Api::Gl, major, minor, GlProfile::Core),
            "compatibility" => Version::new(Api::Gl, major, minor, GlProfile::Compatibility),
            _ => Version::new(Api::Gl, major, minor, GlProfile::Unspecified),
        }
    }

    pub fn api(&self) -> Api {
        self.api
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn profile(&self) -> GlProfile {
        self.profile
    }

    /// `major * 10 + minor`, comparable against feature numbers.
    pub fn int_value(&self) -> u32 {
        10 * self.major + self.minor
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.api {
            Api::Gl => write!(f, "OpenGL {}.{} {}", self.major, self.minor, self.profile.as_str()),
            _ => write!(f, "OpenGL ES {}.{}", self.major, self.minor),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRequest {
    pub name: String,
    pub required: bool,
}

pub fn parse_profile<P: AsRef<Path>>(path: P) -> Result<(Version, Vec<ExtensionRequest>), ProfileError> {
    let path = path.as_ref();
    let file = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| ProfileError::Io {
        file: file.clone(),
        source: e,
    })?;
    parse_profile_str(&text, &file)
}

/// Parses profile text. `file` only labels error messages.
pub fn parse_profile_str(text: &str, file: &str) -> Result<(Version, Vec<ExtensionRequest>), ProfileError> {
    let mut version: Option<Version> = None;
    let mut extensions: Vec<ExtensionRequest> = Vec::new();
    let mut extension_set: HashSet<&str> = HashSet::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;

        if COMMENT_PATTERN.is_match(line) {
            continue;
        }

        if let Some(caps) = VERSION_PATTERN.captures(line) {
            if version.is_some() {
                return Err(ProfileError::DuplicateVersion {
                    file: file.to_owned(),
                    line: line_no,
                });
            }
            // Single digits, always in range.
            let major = caps[1].parse().unwrap_or(0);
            let minor = caps[2].parse().unwrap_or(0);
            version = Some(Version::from_qualifier(major, minor, &caps[3]));
            continue;
        }

        if let Some(caps) = EXTENSION_PATTERN.captures(line) {
            let name = caps.get(1).map_or("", |m| m.as_str());
            if !extension_set.insert(name) {
                return Err(ProfileError::DuplicateExtension {
                    file: file.to_owned(),
                    line: line_no,
                    name: name.to_owned(),
                });
            }
            extensions.push(ExtensionRequest {
                name: name.to_owned(),
                required: &caps[2] == "required",
            });
            continue;
        }

        return Err(ProfileError::Syntax {
            file: file.to_owned(),
            line: line_no,
            text: line.to_owned(),
        });
    }

    match version {
        Some(version) => Ok((version, extensions)),
        None => Err(ProfileError::MissingVersion { file: file.to_owned() }),
    }
}
