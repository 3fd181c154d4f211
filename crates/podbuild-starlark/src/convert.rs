//! Conversions from model values into Starlark nodes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use podbuild_core::{FilePattern, Platform, PlatformValue};

use crate::node::{Argument, StarlarkNode};

/// The `select()` key matching any configuration.
pub const DEFAULT_CONDITION: &str = "//conditions:default";

/// The `select()` key matching one Apple platform.
pub fn platform_condition(platform: Platform) -> String {
    format!("@build_bazel_rules_ios//rules/apple_platform:{platform}")
}

/// Conversion into a Starlark node.
pub trait ToStarlark {
    fn to_starlark(&self) -> StarlarkNode;
}

impl ToStarlark for StarlarkNode {
    fn to_starlark(&self) -> StarlarkNode {
        self.clone()
    }
}

impl ToStarlark for str {
    fn to_starlark(&self) -> StarlarkNode {
        StarlarkNode::str(self)
    }
}

impl ToStarlark for String {
    fn to_starlark(&self) -> StarlarkNode {
        StarlarkNode::str(self.as_str())
    }
}

impl ToStarlark for bool {
    fn to_starlark(&self) -> StarlarkNode {
        StarlarkNode::Bool(*self)
    }
}

impl ToStarlark for i64 {
    fn to_starlark(&self) -> StarlarkNode {
        StarlarkNode::Int(*self)
    }
}

/// `None` converts to [`StarlarkNode::Empty`] so the argument is omitted.
impl<T: ToStarlark> ToStarlark for Option<T> {
    fn to_starlark(&self) -> StarlarkNode {
        match self {
            Some(value) => value.to_starlark(),
            None => StarlarkNode::Empty,
        }
    }
}

impl<T: ToStarlark> ToStarlark for Vec<T> {
    fn to_starlark(&self) -> StarlarkNode {
        StarlarkNode::List(self.iter().map(ToStarlark::to_starlark).collect())
    }
}

impl<T: ToStarlark> ToStarlark for BTreeSet<T> {
    fn to_starlark(&self) -> StarlarkNode {
        StarlarkNode::Set(self.iter().map(ToStarlark::to_starlark).collect())
    }
}

/// Entries whose value converts to [`StarlarkNode::Empty`] are left out.
impl<K: Display, V: ToStarlark> ToStarlark for BTreeMap<K, V> {
    fn to_starlark(&self) -> StarlarkNode {
        StarlarkNode::Dict(
            self.iter()
                .filter_map(|(k, v)| match v.to_starlark() {
                    StarlarkNode::Empty => None,
                    value => Some((StarlarkNode::str(k.to_string()), value)),
                })
                .collect(),
        )
    }
}

/// `glob(include, exclude = [...])`; an empty include converts to
/// [`StarlarkNode::Empty`].
impl ToStarlark for FilePattern {
    fn to_starlark(&self) -> StarlarkNode {
        if self.include.is_empty() {
            return StarlarkNode::Empty;
        }
        let mut args: Vec<Argument> = vec![StarlarkNode::positional(as_list(&self.include))];
        if !self.exclude.is_empty() {
            args.push(StarlarkNode::named("exclude", as_list(&self.exclude)));
        }
        StarlarkNode::call("glob", args)
    }
}

fn as_list(items: &BTreeSet<String>) -> StarlarkNode {
    StarlarkNode::List(items.iter().map(StarlarkNode::str).collect())
}

/// A uniform value converts to its default. Otherwise a `select()` keyed
/// by platform, with the default under [`DEFAULT_CONDITION`].
impl<T: ToStarlark + PartialEq> ToStarlark for PlatformValue<T> {
    fn to_starlark(&self) -> StarlarkNode {
        let overrides: Vec<(&Platform, &T)> = self
            .overrides
            .iter()
            .filter(|(_, value)| **value != self.default)
            .collect();
        if overrides.is_empty() {
            return self.default.to_starlark();
        }

        let branch = |value: &T| match value.to_starlark() {
            StarlarkNode::Empty => StarlarkNode::None,
            node => node,
        };
        let mut branches: Vec<(String, StarlarkNode)> = overrides
            .into_iter()
            .map(|(platform, value)| (platform_condition(*platform), branch(value)))
            .collect();
        branches.push((DEFAULT_CONDITION.to_string(), branch(&self.default)));
        StarlarkNode::Select(branches)
    }
}
