//! Output filename templates
//!
//! The downloader fills in `%(title)s`, `%(ext)s` and `%(playlist_index)s`
//! itself; all we decide is which pattern to use and where it goes.

use std::fmt;
use std::path::{Path, MAIN_SEPARATOR};

use crate::config::JobConfig;

/// Loose playlist check: the marker may appear anywhere in the URL,
/// including inside an unrelated query value.
pub fn is_collection(url: &str, config: &JobConfig) -> bool {
    url.contains(config.collection_marker.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTemplate {
    /// `<dir>/<title>.<ext>`
    Single(String),
    /// `<dir>/<playlist index>-<title>.<ext>`
    Collection(String),
}

impl OutputTemplate {
    pub fn for_url(directory: &Path, url: &str, config: &JobConfig) -> Self {
        let dir = directory.to_string_lossy();
        let dir = dir.trim_end_matches(['/', '\\']);

        if is_collection(url, config) {
            Self::Collection(format!(
                "{}{}{}",
                dir, MAIN_SEPARATOR, config.collection_template
            ))
        } else {
            Self::Single(format!("{}{}{}", dir, MAIN_SEPARATOR, config.single_template))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Single(t) | Self::Collection(t) => t.as_str(),
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Single(t) | Self::Collection(t) => t,
        }
    }
}

impl fmt::Display for OutputTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
