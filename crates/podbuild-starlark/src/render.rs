//! Rendering Starlark nodes as BUILD file text.
//!
//! Output is deterministic: 4-space indentation, one call argument per line
//! for calls with named arguments, and trailing commas in multi-line
//! collections.

use std::collections::BTreeSet;
use std::fmt;

use crate::node::{Argument, StarlarkNode};

const INDENT: &str = "    ";

/// An ordered list of top-level statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildFile {
    pub statements: Vec<StarlarkNode>,
}

impl BuildFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: StarlarkNode) {
        self.statements.push(statement);
    }

    /// Render every statement, separated by blank lines.
    pub fn render(&self) -> String {
        let mut out = self
            .statements
            .iter()
            .map(render)
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        out
    }
}

impl fmt::Display for BuildFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render a single node at top level.
pub fn render(node: &StarlarkNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn is_scalar(node: &StarlarkNode) -> bool {
    matches!(
        node,
        StarlarkNode::None | StarlarkNode::Bool(_) | StarlarkNode::Int(_) | StarlarkNode::Str(_)
    )
}

fn newline(out: &mut String, indent: usize) {
    out.push('\n');
    out.push_str(&INDENT.repeat(indent));
}

fn write_items(out: &mut String, items: &[StarlarkNode], indent: usize) {
    match items {
        [] => out.push_str("[]"),
        [single] if is_scalar(single) => {
            out.push('[');
            write_node(out, single, indent);
            out.push(']');
        }
        _ => {
            out.push('[');
            for item in items {
                newline(out, indent + 1);
                write_node(out, item, indent + 1);
                out.push(',');
            }
            newline(out, indent);
            out.push(']');
        }
    }
}

fn write_dict<'a>(
    out: &mut String,
    entries: impl ExactSizeIterator<Item = (StarlarkNode, &'a StarlarkNode)>,
    indent: usize,
) {
    if entries.len() == 0 {
        out.push_str("{}");
        return;
    }
    out.push('{');
    for (key, value) in entries {
        newline(out, indent + 1);
        write_node(out, &key, indent + 1);
        out.push_str(": ");
        write_node(out, value, indent + 1);
        out.push(',');
    }
    newline(out, indent);
    out.push('}');
}

fn write_argument(out: &mut String, arg: &Argument, indent: usize) {
    match arg {
        Argument::Positional { value } => write_node(out, value, indent),
        Argument::Named { name, value } => {
            out.push_str(name);
            out.push_str(" = ");
            write_node(out, value, indent);
        }
    }
}

fn write_node(out: &mut String, node: &StarlarkNode, indent: usize) {
    match node {
        StarlarkNode::Empty => {}
        StarlarkNode::None => out.push_str("None"),
        StarlarkNode::Bool(true) => out.push_str("True"),
        StarlarkNode::Bool(false) => out.push_str("False"),
        StarlarkNode::Int(n) => out.push_str(&n.to_string()),
        StarlarkNode::Str(s) => out.push_str(&quote(s)),
        StarlarkNode::List(items) => write_items(out, items, indent),
        StarlarkNode::Set(items) => {
            // dedupe on rendered text so mixed node kinds order stably
            let unique: BTreeSet<(String, usize)> = items
                .iter()
                .enumerate()
                .map(|(i, item)| (render(item), i))
                .collect();
            let mut seen = BTreeSet::new();
            let sorted: Vec<StarlarkNode> = unique
                .into_iter()
                .filter(|(text, _)| seen.insert(text.clone()))
                .map(|(_, i)| items[i].clone())
                .collect();
            write_items(out, &sorted, indent);
        }
        StarlarkNode::Dict(entries) => {
            write_dict(out, entries.iter().map(|(k, v)| (k.clone(), v)), indent)
        }
        StarlarkNode::Call { name, args } => {
            out.push_str(name);
            out.push('(');
            let multiline =
                args.len() > 1 && args.iter().any(|a| matches!(a, Argument::Named { .. }));
            if multiline {
                for arg in args {
                    newline(out, indent + 1);
                    write_argument(out, arg, indent + 1);
                    out.push(',');
                }
                newline(out, indent);
            } else {
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_argument(out, arg, indent);
                }
            }
            out.push(')');
        }
        StarlarkNode::Expr { lhs, op, rhs } => {
            write_node(out, lhs, indent);
            out.push(' ');
            out.push_str(op);
            out.push(' ');
            write_node(out, rhs, indent);
        }
        StarlarkNode::Select(branches) => {
            out.push_str("select(");
            write_dict(
                out,
                branches.iter().map(|(k, v)| (StarlarkNode::str(k.as_str()), v)),
                indent,
            );
            out.push(')');
        }
        StarlarkNode::Load { module, symbols } => {
            out.push_str("load(");
            out.push_str(&quote(module));
            for symbol in symbols {
                out.push_str(", ");
                out.push_str(&quote(symbol));
            }
            out.push(')');
        }
    }
}
