//! `podbuild generate`: emit the `apple_framework` target for one podspec.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use podbuild_core::load_spec_json;
use podbuild_targets::{AppleFramework, AssemblyContext, BuildOptions};
use tracing::{debug, info};

use crate::OutputFormat;

/// Inputs of one `generate` invocation.
pub struct Request<'a> {
    pub podspec: &'a Path,
    pub subspecs: &'a [String],
    pub deps: &'a [String],
    pub info_plists: &'a [String],
    pub format: OutputFormat,
}

/// Assemble the target and render it in the requested format.
pub fn run(request: &Request<'_>, options: &BuildOptions) -> Result<String> {
    let spec = load_spec_json(request.podspec)
        .with_context(|| format!("loading podspec {}", request.podspec.display()))?;

    let known: BTreeSet<String> = spec
        .flatten_subspecs()
        .into_iter()
        .map(|(path, _)| path)
        .collect();
    let separator = options.subspec_separator.as_str();
    for requested in request.subspecs {
        let path = spec
            .local_subspec_path(requested, separator)
            .unwrap_or_else(|| requested.clone());
        if !known.contains(&path) {
            bail!("{} has no subspec named '{requested}'", spec.name);
        }
    }

    let subspecs = spec.select_subspecs(request.subspecs, separator);
    debug!(
        pod = %spec.name,
        selected = ?subspecs.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        "subspecs selected"
    );

    let deps: BTreeSet<String> = request.deps.iter().cloned().collect();
    let ctx = AssemblyContext::new(options);
    let mut framework = AppleFramework::assemble(&spec, &subspecs, &deps, &ctx);
    for plist in request.info_plists {
        framework.add_info_plist(plist);
    }

    match request.format {
        OutputFormat::Starlark => Ok(framework.build_file().render()),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&framework).context("serializing target record")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write `text` to `output`, or to stdout when no path is given.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote BUILD file");
            Ok(())
        }
        None => {
            print!("{text}");
            Ok(())
        }
    }
}
