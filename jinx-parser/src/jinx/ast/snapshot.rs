//! AST Snapshot - a normalized intermediate representation of the node tree
//!
//! The snapshot captures node types, labels, attributes and children in a serializable form,
//! so each output format only deals with presentation. Both phases and flattened
//! [`Template`]s snapshot into the same shape.

use super::node::{Node, Phase};
use super::template::Template;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of a node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Literal", "Block", "Condition")
    pub node_type: String,

    /// The primary label or text content of the node
    pub label: String,

    /// Additional attributes specific to the node type
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Child nodes in the tree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl ToString) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

fn escape(text: &str) -> String {
    text.escape_debug().to_string()
}

/// Groups a branch body under a labelled pseudo node.
fn branch<P: Phase>(label: &str, nodes: &[Node<P>]) -> AstSnapshot {
    AstSnapshot::new("Branch", label).with_children(snapshot_from_nodes(nodes))
}

/// Snapshot one node and everything beneath it.
pub fn snapshot_node<P: Phase>(node: &Node<P>) -> AstSnapshot {
    let node_type = node.node_type();
    match node {
        Node::Literal(text) => AstSnapshot::new(node_type, escape(text)),
        Node::Eval(expr) => AstSnapshot::new(node_type, expr.to_string()),
        Node::Condition {
            condition,
            then_branch,
            else_branch,
        } => {
            let mut children = vec![branch("then", then_branch)];
            children.extend(else_branch.as_deref().map(|nodes| branch("else", nodes)));
            AstSnapshot::new(node_type, condition.to_string()).with_children(children)
        }
        Node::Foreach {
            binder,
            iterable,
            body,
            else_branch,
        } => {
            let mut children = vec![branch("body", body)];
            children.extend(else_branch.as_deref().map(|nodes| branch("else", nodes)));
            AstSnapshot::new(node_type, format!("{} in {}", binder, iterable))
                .with_children(children)
        }
        Node::Include(path, _) | Node::Extends(path, _) => AstSnapshot::new(node_type, path),
        Node::Raw(text) => AstSnapshot::new(node_type, escape(text)),
        Node::Base(nodes, _) => {
            AstSnapshot::new(node_type, "parent").with_children(snapshot_from_nodes(nodes))
        }
        Node::Block {
            defined_in_base,
            name,
            scoped,
            body,
        } => AstSnapshot::new(node_type, name)
            .with_attribute("defined_in_base", defined_in_base)
            .with_attribute("scoped", scoped)
            .with_children(snapshot_from_nodes(body)),
        Node::Super => AstSnapshot::new(node_type, "super()"),
        Node::Comment(text) => AstSnapshot::new(node_type, escape(text.trim())),
    }
}

pub fn snapshot_from_nodes<P: Phase>(nodes: &[Node<P>]) -> Vec<AstSnapshot> {
    nodes.iter().map(snapshot_node).collect()
}

/// Snapshot a node sequence as a single document root.
pub fn snapshot_from_document<P: Phase>(nodes: &[Node<P>]) -> AstSnapshot {
    AstSnapshot::new("Document", P::NAME).with_children(snapshot_from_nodes(nodes))
}

/// Snapshot a flattened template: one `Layer` for `base`, one for `child`.
pub fn snapshot_from_template(template: &Template) -> AstSnapshot {
    AstSnapshot::new("Template", "flattened")
        .with_children(vec![
            AstSnapshot::new("Layer", "base").with_children(snapshot_from_nodes(&template.base)),
            AstSnapshot::new("Layer", "child")
                .with_children(snapshot_from_nodes(&template.child)),
        ])
}
