//! Global build options.
//!
//! Options are stored as TOML (`podbuild.toml`). Every key is optional and
//! unknown keys are ignored, so older and newer option files both load.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::XcFrameworkSlice;
use crate::error::{OptionsError, Result};

/// Immutable configuration passed into every target assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildOptions {
    /// Minimum iOS version used when a spec declares none.
    pub ios_platform: String,
    /// Request dynamic linking for targets that have sources.
    pub link_dynamic: bool,
    /// Prefix of labels for other pods (e.g. `//Pods`).
    pub deps_prefix: String,
    /// Label template for other pods. Placeholders: `{prefix}`, `{pod}`,
    /// `{subspec}`.
    pub dependency_template: String,
    /// Separator between a pod name and a subspec in dependency names.
    pub subspec_separator: String,
    /// Vendored frameworks known to be dynamic (paths or file names).
    pub dynamic_frameworks: Vec<String>,
    /// Slices of vendored XCFrameworks, keyed by path.
    pub xcframeworks: BTreeMap<String, Vec<XcFrameworkSlice>>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            ios_platform: "13.0".into(),
            link_dynamic: false,
            deps_prefix: "//Pods".into(),
            dependency_template: "{prefix}/{pod}".into(),
            subspec_separator: "/".into(),
            dynamic_frameworks: Vec::new(),
            xcframeworks: BTreeMap::new(),
        }
    }
}

/// Load options from a TOML file.
pub fn load_options_toml(path: &Path) -> Result<BuildOptions> {
    if !path.exists() {
        return Err(OptionsError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_options_toml(&content)
}

/// Parse options from a TOML string.
pub fn parse_options_toml(toml_str: &str) -> Result<BuildOptions> {
    let options: BuildOptions = toml::from_str(toml_str)?;
    Ok(options)
}

/// Serialize options to pretty TOML.
pub fn options_to_toml(options: &BuildOptions) -> Result<String> {
    let toml_str = toml::to_string_pretty(options)?;
    Ok(toml_str)
}
