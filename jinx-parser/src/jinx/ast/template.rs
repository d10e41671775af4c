//! The flattened result of resolving an inheritance chain

use super::node::{Node, ResolvedNode};

/// A resolved template split into its root layer and the accumulated overrides.
///
/// `base` is the node sequence of the root ancestor. `child` holds the top-level nodes that
/// every descendant placed after its `extends`, nearest-to-root layer first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub base: Vec<ResolvedNode>,
    pub child: Vec<ResolvedNode>,
}

impl Template {
    /// Flatten a resolved top-level sequence.
    ///
    /// Only a leading `Base` node is peeled; anything else makes the sequence the base.
    pub fn from_nodes(nodes: Vec<ResolvedNode>) -> Self {
        let mut nodes = nodes.into_iter();
        match nodes.next() {
            Some(Node::Base(parent, ())) => {
                let mut template = Template::from_nodes(parent);
                template.child.extend(nodes);
                template
            }
            Some(first) => Template {
                base: std::iter::once(first).chain(nodes).collect(),
                child: Vec::new(),
            },
            None => Template::default(),
        }
    }

    /// True when some file in the chain declared itself a child.
    pub fn has_overrides(&self) -> bool {
        !self.child.is_empty()
    }

    /// Top-level blocks declared in `child`, in order.
    pub fn child_blocks(&self) -> impl Iterator<Item = (&str, &[ResolvedNode])> {
        self.child.iter().filter_map(|node| match node {
            Node::Block { name, body, .. } => Some((name.as_str(), body.as_slice())),
            _ => None,
        })
    }
}
