//! The linkage probe: the injected capability that inspects vendored binaries.
//!
//! Assembly only asks questions; reading Mach-O headers or `Info.plist`
//! files is left to the implementation. Answers must be deterministic for a
//! given path.

use std::path::Path;

use crate::classify::XcFrameworkSlice;
use crate::options::BuildOptions;

/// Questions asked about vendored artifacts during classification.
pub trait LinkageProbe {
    /// Whether the framework at `path` links dynamically.
    fn is_dynamic(&self, path: &str, options: &BuildOptions) -> bool;

    /// Slices embedded in the `.xcframework` at `path`, or `None` if the
    /// bundle cannot be read.
    fn xcframework_slices(&self, path: &str, options: &BuildOptions)
        -> Option<Vec<XcFrameworkSlice>>;

    /// Architectures of the single-platform framework at `path`.
    fn framework_archs(&self, _path: &str, _options: &BuildOptions) -> Vec<String> {
        vec!["arm64".into()]
    }
}

/// A probe answering from [`BuildOptions`] alone.
///
/// A framework is dynamic if its path or file name is listed in
/// `dynamic-frameworks`; XCFramework slices come from `xcframeworks`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredProbe;

impl LinkageProbe for ConfiguredProbe {
    fn is_dynamic(&self, path: &str, options: &BuildOptions) -> bool {
        let file_name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path);
        options
            .dynamic_frameworks
            .iter()
            .any(|listed| listed == path || listed == file_name)
    }

    fn xcframework_slices(
        &self,
        path: &str,
        options: &BuildOptions,
    ) -> Option<Vec<XcFrameworkSlice>> {
        options.xcframeworks.get(path).cloned()
    }
}
