//! Canonical surface syntax
//!
//! Every node prints back to template source with normalized spacing: one space inside
//! `{% %}` and `{{ }}`, no trim markers, and close tags that do not repeat the opening name.
//! Re-parsing the output yields the same unresolved nodes, which is what the round-trip tests
//! lean on. A resolved `Base` prints its inlined nodes.

use super::node::{Node, Phase};
use super::template::Template;
use std::fmt::{self, Write};

/// Render a node sequence as template source.
pub fn render_nodes<P: Phase>(nodes: &[Node<P>]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_nodes(&mut out, nodes);
    out
}

fn write_nodes<P: Phase>(f: &mut impl Write, nodes: &[Node<P>]) -> fmt::Result {
    for node in nodes {
        write!(f, "{}", node)?;
    }
    Ok(())
}

fn write_path(f: &mut impl Write, path: &str) -> fmt::Result {
    if path.contains('"') {
        write!(f, "'{}'", path)
    } else {
        write!(f, "\"{}\"", path)
    }
}

impl<P: Phase> fmt::Display for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(text) => f.write_str(text),
            Node::Eval(expr) => write!(f, "{{{{ {} }}}}", expr),
            Node::Condition {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "{{% if {} %}}", condition)?;
                write_nodes(f, then_branch)?;
                if let Some(else_branch) = else_branch {
                    f.write_str("{% else %}")?;
                    write_nodes(f, else_branch)?;
                }
                f.write_str("{% endif %}")
            }
            Node::Foreach {
                binder,
                iterable,
                body,
                else_branch,
            } => {
                write!(f, "{{% for {} in {} %}}", binder, iterable)?;
                write_nodes(f, body)?;
                if let Some(else_branch) = else_branch {
                    f.write_str("{% else %}")?;
                    write_nodes(f, else_branch)?;
                }
                f.write_str("{% endfor %}")
            }
            Node::Include(path, _) => {
                f.write_str("{% include ")?;
                write_path(f, path)?;
                f.write_str(" %}")
            }
            Node::Extends(path, _) => {
                f.write_str("{% extends ")?;
                write_path(f, path)?;
                f.write_str(" %}")
            }
            Node::Raw(text) => write!(f, "{{% raw %}}{}{{% endraw %}}", text),
            Node::Base(nodes, _) => write_nodes(f, nodes),
            Node::Block {
                name, scoped, body, ..
            } => {
                if *scoped {
                    write!(f, "{{% block {} scoped %}}", name)?;
                } else {
                    write!(f, "{{% block {} %}}", name)?;
                }
                write_nodes(f, body)?;
                f.write_str("{% endblock %}")
            }
            Node::Super => f.write_str("{{ super() }}"),
            Node::Comment(text) => write!(f, "{{#{}#}}", text),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.base)?;
        write_nodes(f, &self.child)
    }
}
