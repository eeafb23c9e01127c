use std::{fmt::Display, path::PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::util::paths::path_to_name;

/// Where a resource identifier resolves to: a path under the content
/// root, or a remote URL.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum ResourcePath {
    Local(PathBuf),
    Url(String),
}

const URL_REGEX_SPEC: &str = r"^(http|https)://(.+)$";

impl From<&str> for ResourcePath {
    fn from(value: &str) -> Self {
        static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(URL_REGEX_SPEC).unwrap());

        use ResourcePath::*;

        if URL_REGEX.is_match(value) {
            Url(value.to_string())
        } else {
            Local(value.into())
        }
    }
}

impl From<String> for ResourcePath {
    fn from(value: String) -> Self {
        ResourcePath::from(value.as_str())
    }
}

impl ResourcePath {
    /// Short name used in log lines and failure reports.
    pub fn name(&self) -> String {
        use ResourcePath::*;
        match self {
            Local(path) => path_to_name(&path.display().to_string()).to_string(),
            Url(url) => path_to_name(url).to_string(),
        }
    }
}

impl Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ResourcePath::*;
        match self {
            Local(path) => f.write_fmt(format_args!("[local resource: {}]", path.display())),
            Url(url) => f.write_fmt(format_args!("[url: {url}]")),
        }
    }
}
