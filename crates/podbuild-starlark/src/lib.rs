//! Starlark syntax tree for generated BUILD files.
//!
//! [`StarlarkNode`] is the closed node set needed to declare a target:
//! literals, lists, sets, dicts, calls with named arguments, binary
//! expressions, and `select()` conditionals. [`ToStarlark`] converts model
//! values into nodes and [`BuildFile`] renders them as text.

pub mod convert;
pub mod node;
pub mod render;

pub use convert::{platform_condition, ToStarlark, DEFAULT_CONDITION};
pub use node::{Argument, StarlarkNode};
pub use render::{render, BuildFile};
