//! Include/exclude glob descriptions and glob construction from podspec patterns.
//!
//! Podspec file patterns use shell-style braces (`*.{h,m}`) and often name a
//! directory or a bare wildcard. Bazel globs need one concrete pattern per
//! extension, so patterns are expanded here against an allowed extension set.
//! Nothing touches the filesystem: the downstream build evaluates the globs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::merge::Merge;

/// Header extensions accepted for header attributes.
pub const HEADER_FILE_TYPES: &[&str] = &["h", "hh", "hpp", "hxx", "ipp", "tpp"];

/// Extensions accepted for `srcs` (headers included).
pub const SOURCE_FILE_TYPES: &[&str] = &[
    "h", "hh", "hpp", "hxx", "ipp", "tpp", "c", "cc", "cpp", "cxx", "c++", "m", "mm", "s", "S",
    "swift",
];

/// Resource directories Bazel must glob into rather than list.
pub const RESOURCE_DIRECTORY_TYPES: &[&str] =
    &["xcassets", "xcdatamodeld", "lproj", "scnassets", "atlas"];

/// A set of include globs minus a set of exclude globs.
///
/// Excludes that match nothing in the includes are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePattern {
    pub include: BTreeSet<String>,
    #[serde(default)]
    pub exclude: BTreeSet<String>,
}

impl FilePattern {
    pub fn new(include: BTreeSet<String>, exclude: BTreeSet<String>) -> Self {
        Self { include, exclude }
    }

    /// A pattern with no excludes.
    pub fn include_only(include: BTreeSet<String>) -> Self {
        Self {
            include,
            exclude: BTreeSet::new(),
        }
    }

    /// Build from matched includes and excludes, dropping any include that
    /// is also excluded verbatim.
    pub fn from_matches(include: BTreeSet<String>, exclude: BTreeSet<String>) -> Self {
        let include = include.difference(&exclude).cloned().collect();
        Self { include, exclude }
    }

    /// A pattern without includes selects nothing.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }
}

impl Merge for FilePattern {
    fn merge(self, other: Self) -> Self {
        Self {
            include: self.include.merge(other.include),
            exclude: self.exclude.merge(other.exclude),
        }
    }
}

/// Expand shell-style braces: `a/*.{h,m}` becomes `a/*.h` and `a/*.m`.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close) = pattern[open..].find('}').map(|i| open + i) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    pattern[open + 1..close]
        .split(',')
        .flat_map(|alt| expand_braces(&format!("{prefix}{alt}{suffix}")))
        .collect()
}

/// The extension of the last path component, if it has one.
pub fn extension(pattern: &str) -> Option<&str> {
    let last = last_component(pattern);
    let dot = last.rfind('.')?;
    // `.git` is a hidden name, not an extension
    if dot == 0 {
        return None;
    }
    Some(&last[dot + 1..])
}

fn last_component(pattern: &str) -> &str {
    let trimmed = pattern.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Turn one podspec pattern into globs restricted to `file_types`.
fn pattern_for_types(pattern: &str, file_types: &[&str]) -> Vec<String> {
    let pattern = pattern.trim_end_matches('/');
    let last = last_component(pattern);

    match extension(pattern) {
        Some("*") => {
            let stem = &pattern[..pattern.len() - 1];
            file_types.iter().map(|t| format!("{stem}{t}")).collect()
        }
        Some(ext) if file_types.contains(&ext) => vec![pattern.to_string()],
        Some(_) => Vec::new(),
        None if last == "**" => file_types
            .iter()
            .map(|t| format!("{pattern}/*.{t}"))
            .collect(),
        None if last.ends_with('*') => file_types
            .iter()
            .map(|t| format!("{pattern}.{t}"))
            .collect(),
        None => file_types
            .iter()
            .map(|t| format!("{pattern}/**/*.{t}"))
            .collect(),
    }
}

/// Expand `patterns` into globs whose extension is in `file_types`.
pub fn extract_files<'a>(
    patterns: impl IntoIterator<Item = &'a String>,
    file_types: &[&str],
) -> BTreeSet<String> {
    patterns
        .into_iter()
        .flat_map(|p| expand_braces(p))
        .flat_map(|p| pattern_for_types(&p, file_types))
        .collect()
}

/// Expand resource patterns into globs.
///
/// A trailing `**` matches every file beneath it; resource directories
/// such as asset catalogs are globbed recursively.
pub fn extract_resources<'a>(patterns: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
    patterns
        .into_iter()
        .flat_map(|p| expand_braces(p))
        .map(|p| {
            let p = p.trim_end_matches('/').to_string();
            if last_component(&p) == "**" {
                format!("{p}/*")
            } else if extension(&p).is_some_and(|ext| RESOURCE_DIRECTORY_TYPES.contains(&ext)) {
                format!("{p}/**")
            } else {
                p
            }
        })
        .collect()
}
