//! Starlark AST node kinds.

use serde::Serialize;

/// A function-call argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Argument {
    Positional { value: StarlarkNode },
    Named { name: String, value: StarlarkNode },
}

impl Argument {
    /// The argument's value node.
    pub fn value(&self) -> &StarlarkNode {
        match self {
            Argument::Positional { value } | Argument::Named { value, .. } => value,
        }
    }
}

/// A node of the Starlark subset used in BUILD files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum StarlarkNode {
    /// No value. Named arguments holding it are omitted from calls.
    Empty,
    /// The `None` literal.
    None,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<StarlarkNode>),
    /// An unordered collection; rendered as a sorted, duplicate-free list.
    Set(Vec<StarlarkNode>),
    /// Key/value pairs in insertion order.
    Dict(Vec<(StarlarkNode, StarlarkNode)>),
    Call {
        name: String,
        args: Vec<Argument>,
    },
    /// A binary expression such as `lhs + rhs`.
    Expr {
        lhs: Box<StarlarkNode>,
        op: String,
        rhs: Box<StarlarkNode>,
    },
    /// `select({condition: value, ...})`.
    Select(Vec<(String, StarlarkNode)>),
    /// A `load("module", "symbol", ...)` statement.
    Load {
        module: String,
        symbols: Vec<String>,
    },
}

impl StarlarkNode {
    pub fn str(value: impl Into<String>) -> Self {
        StarlarkNode::Str(value.into())
    }

    pub fn call(name: impl Into<String>, args: Vec<Argument>) -> Self {
        StarlarkNode::Call {
            name: name.into(),
            args,
        }
    }

    pub fn positional(value: StarlarkNode) -> Argument {
        Argument::Positional { value }
    }

    pub fn named(name: impl Into<String>, value: StarlarkNode) -> Argument {
        Argument::Named {
            name: name.into(),
            value,
        }
    }

    pub fn load(module: impl Into<String>, symbols: &[&str]) -> Self {
        StarlarkNode::Load {
            module: module.into(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// `self + rhs`.
    pub fn add(self, rhs: StarlarkNode) -> Self {
        StarlarkNode::Expr {
            lhs: Box::new(self),
            op: "+".into(),
            rhs: Box::new(rhs),
        }
    }

    /// Empty values are dropped from call arguments.
    ///
    /// [`Empty`](Self::Empty), an empty string, and empty collections are
    /// empty. Literals, calls, expressions and selects never are.
    pub fn is_empty(&self) -> bool {
        match self {
            StarlarkNode::Empty => true,
            StarlarkNode::Str(s) => s.is_empty(),
            StarlarkNode::List(items) | StarlarkNode::Set(items) => items.is_empty(),
            StarlarkNode::Dict(entries) => entries.is_empty(),
            _ => false,
        }
    }

    /// A call with every empty named argument removed.
    pub fn call_omitting_empty(name: impl Into<String>, args: Vec<Argument>) -> Self {
        let args = args
            .into_iter()
            .filter(|arg| match arg {
                Argument::Positional { .. } => true,
                Argument::Named { value, .. } => !value.is_empty(),
            })
            .collect();
        StarlarkNode::call(name, args)
    }

    /// The named argument `name`, if this is a call that has it.
    pub fn argument(&self, name: &str) -> Option<&StarlarkNode> {
        let StarlarkNode::Call { args, .. } = self else {
            return None;
        };
        args.iter().find_map(|arg| match arg {
            Argument::Named { name: n, value } if n == name => Some(value),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values() {
        assert!(StarlarkNode::Empty.is_empty());
        assert!(StarlarkNode::str("").is_empty());
        assert!(StarlarkNode::List(vec![]).is_empty());
        assert!(StarlarkNode::Set(vec![]).is_empty());
        assert!(StarlarkNode::Dict(vec![]).is_empty());

        assert!(!StarlarkNode::Bool(false).is_empty());
        assert!(!StarlarkNode::None.is_empty());
        assert!(!StarlarkNode::Select(vec![]).is_empty());
        assert!(!StarlarkNode::call("glob", vec![]).is_empty());
    }

    #[test]
    fn call_omitting_empty_drops_only_empty_named_args() {
        let call = StarlarkNode::call_omitting_empty(
            "rule",
            vec![
                StarlarkNode::positional(StarlarkNode::List(vec![])),
                StarlarkNode::named("name", StarlarkNode::str("Foo")),
                StarlarkNode::named("srcs", StarlarkNode::List(vec![])),
                StarlarkNode::named("flag", StarlarkNode::Bool(false)),
                StarlarkNode::named("data", StarlarkNode::Empty),
            ],
        );
        let StarlarkNode::Call { args, .. } = &call else {
            panic!("expected a call");
        };
        assert_eq!(args.len(), 3);
        assert_eq!(call.argument("name"), Some(&StarlarkNode::str("Foo")));
        assert_eq!(call.argument("flag"), Some(&StarlarkNode::Bool(false)));
        assert!(call.argument("srcs").is_none());
        assert!(call.argument("data").is_none());
    }

    #[test]
    fn add_builds_binary_expression() {
        let expr = StarlarkNode::str("a").add(StarlarkNode::str("b"));
        assert!(matches!(expr, StarlarkNode::Expr { ref op, .. } if op == "+"));
    }
}
