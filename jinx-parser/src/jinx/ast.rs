//! Abstract syntax for jinx templates
//!
//! Nodes come in two phases. The grammar produces [`UnresolvedNode`]s, which may still point
//! at other files through `Include` and `Extends`. The resolver turns them into
//! [`ResolvedNode`]s, where those variants cannot be constructed at all, and finally flattens
//! an inheritance chain into a [`Template`].

mod display;
mod expr;
mod node;
pub mod snapshot;
mod template;

pub use display::render_nodes;
pub use expr::{Expr, VariablePath};
pub use node::{Node, Phase, Resolved, ResolvedNode, Unresolved, UnresolvedNode};
pub use snapshot::{
    snapshot_from_document, snapshot_from_nodes, snapshot_from_template, AstSnapshot,
};
pub use template::Template;
