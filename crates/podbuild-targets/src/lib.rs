//! Bazel target assembly for pod specifications.
//!
//! Turns a [`Specification`](podbuild_core::Specification) and its selected
//! subspecs into one `apple_framework` target:
//! - **Options:** global build configuration loaded from TOML
//! - **Classification:** vendored binaries sorted into static libraries,
//!   static frameworks, and XCFrameworks via an injected linkage probe
//! - **Dependencies:** pod dependency names resolved into Bazel labels
//! - **Flags:** compiler and linker flags from the podspec's xcconfig
//! - **Framework:** the assembled target record and its AST emission

pub mod classify;
pub mod deps;
pub mod error;
pub mod flags;
pub mod framework;
pub mod options;
pub mod probe;

pub use classify::{
    classify, classify_artifacts, ClassifiedArtifacts, Linkage, Packaging, VendoredArtifact,
    XcFramework, XcFrameworkSlice,
};
pub use deps::{bazel_label, DependencyResolver};
pub use error::{OptionsError, Result};
pub use flags::{CompilerFlags, FlagExtractor, PodTargetFlags};
pub use framework::{
    resolve_module_name, resolve_platforms, resolve_swift_version, swift_version_from,
    AppleFramework, AssemblyContext,
};
pub use options::{load_options_toml, options_to_toml, parse_options_toml, BuildOptions};
pub use probe::{ConfiguredProbe, LinkageProbe};
