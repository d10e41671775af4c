//! Phase-tagged template nodes
//!
//! `Node<P>` is shared by both phases. The two file-reference variants carry a
//! `P::Reference` witness and the inlined-parent variant carries a `P::Inlined` witness; each
//! phase makes one of them uninhabited:
//!
//! | variant          | Unresolved | Resolved |
//! |------------------|------------|----------|
//! | `Include`        | yes        | no       |
//! | `Extends`        | yes        | no       |
//! | `Base`           | no         | yes      |
//!
//! So a `Node<Resolved>` holding an `Include` cannot be written down, and the resolver is the
//! only way to get from one phase to the other.

use super::expr::Expr;
use std::convert::Infallible;
use std::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Unresolved {}
    impl Sealed for super::Resolved {}
}

/// Marker trait for the two node phases.
pub trait Phase: fmt::Debug + Clone + PartialEq + Eq + sealed::Sealed {
    /// Witness for `Include` / `Extends`.
    type Reference: fmt::Debug + Clone + PartialEq + Eq;
    /// Witness for `Base`.
    type Inlined: fmt::Debug + Clone + PartialEq + Eq;

    /// Name used in snapshots and diagnostics.
    const NAME: &'static str;
}

/// Straight out of the grammar; may still reference other files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {}

/// After resolution; every file reference has been inlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {}

impl Phase for Unresolved {
    type Reference = ();
    type Inlined = Infallible;
    const NAME: &'static str = "unresolved";
}

impl Phase for Resolved {
    type Reference = Infallible;
    type Inlined = ();
    const NAME: &'static str = "resolved";
}

pub type UnresolvedNode = Node<Unresolved>;
pub type ResolvedNode = Node<Resolved>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<P: Phase> {
    /// Output text.
    Literal(String),
    /// `{{ expr }}`
    Eval(Expr),
    /// `{% if %}` with an optional `{% else %}` branch.
    Condition {
        condition: Expr,
        then_branch: Vec<Node<P>>,
        else_branch: Option<Vec<Node<P>>>,
    },
    /// `{% for binder in iterable %}` with an optional `{% else %}` branch.
    Foreach {
        binder: String,
        iterable: Expr,
        body: Vec<Node<P>>,
        else_branch: Option<Vec<Node<P>>>,
    },
    /// `{% include "path" %}`
    Include(String, P::Reference),
    /// `{% extends "path" %}`
    Extends(String, P::Reference),
    /// Text between `{% raw %}` and `{% endraw %}`, untouched by the grammar.
    Raw(String),
    /// A resolved parent template's nodes.
    Base(Vec<Node<P>>, P::Inlined),
    /// A named, overridable region.
    ///
    /// `defined_in_base` is true when the declaring file had not declared itself a child
    /// through `extends`. The grammar never sets `scoped`.
    Block {
        defined_in_base: bool,
        name: String,
        scoped: bool,
        body: Vec<Node<P>>,
    },
    /// `{{ super() }}`
    Super,
    /// `{# text #}`; kept for fidelity, never rendered.
    Comment(String),
}

impl Node<Unresolved> {
    pub fn include(path: impl Into<String>) -> Self {
        Node::Include(path.into(), ())
    }

    pub fn extends(path: impl Into<String>) -> Self {
        Node::Extends(path.into(), ())
    }
}

impl Node<Resolved> {
    pub fn base(nodes: Vec<Node<Resolved>>) -> Self {
        Node::Base(nodes, ())
    }
}

impl<P: Phase> Node<P> {
    pub fn literal(text: impl Into<String>) -> Self {
        Node::Literal(text.into())
    }

    pub fn block(defined_in_base: bool, name: impl Into<String>, body: Vec<Node<P>>) -> Self {
        Node::Block {
            defined_in_base,
            name: name.into(),
            scoped: false,
            body,
        }
    }

    /// Variant name, as used by snapshots.
    pub fn node_type(&self) -> &'static str {
        match self {
            Node::Literal(_) => "Literal",
            Node::Eval(_) => "Eval",
            Node::Condition { .. } => "Condition",
            Node::Foreach { .. } => "Foreach",
            Node::Include(..) => "Include",
            Node::Extends(..) => "Extends",
            Node::Raw(_) => "Raw",
            Node::Base(..) => "Base",
            Node::Block { .. } => "Block",
            Node::Super => "Super",
            Node::Comment(_) => "Comment",
        }
    }

    /// True for `Include` and `Extends`. Always false for resolved nodes.
    pub fn is_file_reference(&self) -> bool {
        matches!(self, Node::Include(..) | Node::Extends(..))
    }

    /// Direct child sequences of this node, in source order.
    pub fn children(&self) -> Vec<&[Node<P>]> {
        match self {
            Node::Condition {
                then_branch,
                else_branch,
                ..
            } => std::iter::once(then_branch.as_slice())
                .chain(else_branch.as_deref())
                .collect(),
            Node::Foreach {
                body, else_branch, ..
            } => std::iter::once(body.as_slice())
                .chain(else_branch.as_deref())
                .collect(),
            Node::Base(nodes, _) | Node::Block { body: nodes, .. } => vec![nodes.as_slice()],
            _ => Vec::new(),
        }
    }

    /// Pre-order walk over this node and everything beneath it.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node<P>)) {
        visit(self);
        for seq in self.children() {
            for node in seq {
                node.walk(visit);
            }
        }
    }
}
