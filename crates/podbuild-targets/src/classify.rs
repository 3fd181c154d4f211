//! Classification of vendored binaries.
//!
//! Vendored paths are partitioned by extension. `.xcframework` bundles are
//! read through the probe; `.framework` bundles are static or dynamic per the
//! probe, and dynamic ones are re-wrapped as single-slice XCFrameworks so
//! that consumers only see one dynamic representation. The plain dynamic
//! framework set is therefore always empty. Unknown extensions are dropped.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use podbuild_core::pattern::extension;
use podbuild_core::{Platform, PlatformValue};
use podbuild_starlark::{StarlarkNode, ToStarlark};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::options::BuildOptions;
use crate::probe::LinkageProbe;

/// How a slice's binary links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    Static,
    Dynamic,
}

/// How a slice's binary is packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Packaging {
    Framework,
    Library,
}

impl Linkage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Linkage::Static => "static",
            Linkage::Dynamic => "dynamic",
        }
    }
}

impl Packaging {
    pub fn as_str(&self) -> &'static str {
        match self {
            Packaging::Framework => "framework",
            Packaging::Library => "library",
        }
    }
}

/// One platform/architecture slice of an XCFramework.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct XcFrameworkSlice {
    /// Slice directory name, e.g. `ios-arm64_x86_64-simulator`.
    pub identifier: String,
    pub platform: Platform,
    /// `simulator` or `maccatalyst`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_variant: Option<String>,
    pub supported_archs: Vec<String>,
    /// Binary path relative to the slice directory.
    pub path: String,
    pub linkage: Linkage,
    pub packaging: Packaging,
}

/// A normalized cross-platform binary bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XcFramework {
    pub name: String,
    pub path: String,
    pub slices: Vec<XcFrameworkSlice>,
}

fn bundle_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

impl XcFramework {
    /// Read an `.xcframework` through the probe.
    pub fn from_xcframework(
        path: &str,
        probe: &dyn LinkageProbe,
        options: &BuildOptions,
    ) -> Option<Self> {
        let slices = probe.xcframework_slices(path, options)?;
        Some(Self {
            name: bundle_name(path),
            path: path.to_string(),
            slices,
        })
    }

    /// Wrap a dynamic single-platform framework as a one-slice bundle.
    pub fn from_dynamic_framework(
        path: &str,
        platform: Platform,
        probe: &dyn LinkageProbe,
        options: &BuildOptions,
    ) -> Option<Self> {
        let archs = probe.framework_archs(path, options);
        if archs.is_empty() {
            return None;
        }
        let file_name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
            .to_string();
        Some(Self {
            name: bundle_name(path),
            path: path.to_string(),
            slices: vec![XcFrameworkSlice {
                identifier: format!("{platform}-{}", archs.join("_")),
                platform,
                platform_variant: None,
                supported_archs: archs,
                path: file_name,
                linkage: Linkage::Dynamic,
                packaging: Packaging::Framework,
            }],
        })
    }
}

impl ToStarlark for XcFrameworkSlice {
    fn to_starlark(&self) -> StarlarkNode {
        let mut build_type = BTreeMap::new();
        build_type.insert("linkage", self.linkage.as_str());
        build_type.insert("packaging", self.packaging.as_str());

        StarlarkNode::Dict(vec![
            (StarlarkNode::str("identifier"), self.identifier.to_starlark()),
            (StarlarkNode::str("platform"), self.platform.as_str().to_starlark()),
            (
                StarlarkNode::str("platform_variant"),
                StarlarkNode::str(self.platform_variant.clone().unwrap_or_default()),
            ),
            (StarlarkNode::str("supported_archs"), self.supported_archs.to_starlark()),
            (StarlarkNode::str("path"), self.path.to_starlark()),
            (
                StarlarkNode::str("build_type"),
                StarlarkNode::Dict(
                    build_type
                        .into_iter()
                        .map(|(k, v)| (StarlarkNode::str(k), StarlarkNode::str(v)))
                        .collect(),
                ),
            ),
        ])
    }
}

impl ToStarlark for XcFramework {
    fn to_starlark(&self) -> StarlarkNode {
        StarlarkNode::Dict(vec![
            (StarlarkNode::str("name"), self.name.to_starlark()),
            (StarlarkNode::str("slices"), self.slices.to_starlark()),
        ])
    }
}

/// The kind assigned to one vendored artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum VendoredArtifact {
    StaticLibrary(String),
    StaticFramework(String),
    /// Not produced by [`classify`]: dynamic frameworks are wrapped as
    /// [`XcFramework`]s instead.
    DynamicFramework(String),
    XcFramework(XcFramework),
}

/// Classified artifacts grouped by output attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedArtifacts {
    pub xcframeworks: Vec<XcFramework>,
    pub static_frameworks: BTreeSet<String>,
    pub dynamic_frameworks: BTreeSet<String>,
    pub static_libraries: BTreeSet<String>,
}

impl ClassifiedArtifacts {
    pub fn is_empty(&self) -> bool {
        self.xcframeworks.is_empty()
            && self.static_frameworks.is_empty()
            && self.dynamic_frameworks.is_empty()
            && self.static_libraries.is_empty()
    }
}

impl FromIterator<VendoredArtifact> for ClassifiedArtifacts {
    fn from_iter<I: IntoIterator<Item = VendoredArtifact>>(iter: I) -> Self {
        let mut out = Self::default();
        for artifact in iter {
            match artifact {
                VendoredArtifact::StaticLibrary(p) => {
                    out.static_libraries.insert(p);
                }
                VendoredArtifact::StaticFramework(p) => {
                    out.static_frameworks.insert(p);
                }
                VendoredArtifact::DynamicFramework(p) => {
                    out.dynamic_frameworks.insert(p);
                }
                VendoredArtifact::XcFramework(x) => out.xcframeworks.push(x),
            }
        }
        out
    }
}

/// Classify one platform's vendored frameworks and libraries.
///
/// Output order: XCFrameworks, then frameworks (wrapped dynamic ones
/// included), then libraries, each in path order.
pub fn classify(
    frameworks: &BTreeSet<String>,
    libraries: &BTreeSet<String>,
    platform: Platform,
    probe: &dyn LinkageProbe,
    options: &BuildOptions,
) -> Vec<VendoredArtifact> {
    let mut out = Vec::new();

    for path in frameworks.iter().filter(|p| extension(p) == Some("xcframework")) {
        match XcFramework::from_xcframework(path, probe, options) {
            Some(x) => out.push(VendoredArtifact::XcFramework(x)),
            None => warn!(path = %path, "unreadable xcframework dropped"),
        }
    }

    for path in frameworks {
        match extension(path) {
            Some("xcframework") => {}
            Some("framework") if probe.is_dynamic(path, options) => {
                match XcFramework::from_dynamic_framework(path, platform, probe, options) {
                    Some(x) => out.push(VendoredArtifact::XcFramework(x)),
                    None => warn!(path = %path, "dynamic framework without archs dropped"),
                }
            }
            Some("framework") => out.push(VendoredArtifact::StaticFramework(path.clone())),
            _ => debug!(path = %path, "vendored framework with unknown extension skipped"),
        }
    }

    for path in libraries {
        match extension(path) {
            Some("a") => out.push(VendoredArtifact::StaticLibrary(path.clone())),
            _ => debug!(path = %path, "vendored library with unknown extension skipped"),
        }
    }

    out
}

/// Classify every platform slot of the collected vendored paths.
///
/// The default slot is classified for [`Platform::PRIMARY`].
pub fn classify_artifacts(
    frameworks: &PlatformValue<BTreeSet<String>>,
    libraries: &PlatformValue<BTreeSet<String>>,
    probe: &dyn LinkageProbe,
    options: &BuildOptions,
) -> PlatformValue<ClassifiedArtifacts> {
    frameworks
        .zip(libraries)
        .map_with_platform(|platform, (frameworks, libraries)| {
            let platform = platform.unwrap_or(Platform::PRIMARY);
            classify(&frameworks, &libraries, platform, probe, options)
                .into_iter()
                .collect()
        })
}
