//! Core data model for translating pod specifications into Bazel targets.
//!
//! - **Platforms:** the known Apple platform ids and [`PlatformValue`], a value
//!   with a default and per-platform overrides
//! - **Merge:** the combine rule used when accumulating attributes
//! - **Patterns:** include/exclude glob descriptions and glob construction
//! - **Specification:** the pod spec tree and attribute collection across subspecs

pub mod error;
pub mod merge;
pub mod parse;
pub mod pattern;
pub mod platform;
pub mod spec;

pub use error::{Result, SpecError};
pub use merge::Merge;
pub use parse::{load_spec_json, parse_spec_json, spec_to_json};
pub use pattern::{extract_files, extract_resources, FilePattern};
pub use platform::{Platform, PlatformValue};
pub use spec::{SpecAttributes, Specification};
