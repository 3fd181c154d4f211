//! `podbuild config`: build option loading and the default options file.

use std::path::Path;

use anyhow::{Context, Result};
use podbuild_targets::{load_options_toml, options_to_toml, BuildOptions};
use tracing::debug;

/// Load options from `path`, or the defaults when no file is given.
pub fn load(path: Option<&Path>) -> Result<BuildOptions> {
    match path {
        Some(path) => {
            let options = load_options_toml(path)
                .with_context(|| format!("loading build options from {}", path.display()))?;
            debug!(path = %path.display(), "loaded build options");
            Ok(options)
        }
        None => Ok(BuildOptions::default()),
    }
}

/// The default options rendered as TOML.
pub fn default_toml() -> Result<String> {
    options_to_toml(&BuildOptions::default()).context("serializing default options")
}
