//! Testing utilities for node assertions
//!
//!     Comparing whole node vectors with `assert_eq!` works for small inputs but gets noisy
//!     once bodies nest. The fluent API below walks a sequence one item at a time and reports
//!     failures with a path such as `nodes[1]:then[0]`, so a broken expectation points at
//!     the node that differs.
//!
//!     ```rust,ignore
//!     use jinx_parser::jinx::testing::assert_nodes;
//!
//!     let nodes = parse_str("{% if a %}x{% endif %}").unwrap();
//!     assert_nodes(&nodes)
//!         .item_count(1)
//!         .item(0, |n| {
//!             n.assert_condition()
//!                 .condition("a")
//!                 .then_branch(|b| b.item_count(1).item(0, |n| n.literal("x")));
//!         });
//!     ```
//!
//!     The assertions work for both phases; `assert_base` only makes sense on resolved
//!     sequences and `include`/`extends` only on unresolved ones, but nothing stops a test
//!     from asking.

use crate::jinx::ast::{Expr, Node, Phase, Resolved, Template};

/// Create an assertion builder for a node sequence
pub fn assert_nodes<P: Phase>(nodes: &[Node<P>]) -> NodesAssertion<'_, P> {
    NodesAssertion {
        nodes,
        context: "nodes".to_string(),
    }
}

/// Create an assertion builder for a flattened template
pub fn assert_template(template: &Template) -> TemplateAssertion<'_> {
    TemplateAssertion { template }
}

fn summarize<P: Phase>(nodes: &[Node<P>]) -> String {
    nodes
        .iter()
        .map(|node| node.node_type())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct TemplateAssertion<'a> {
    template: &'a Template,
}

impl<'a> TemplateAssertion<'a> {
    pub fn base<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a, Resolved>),
    {
        assertion(NodesAssertion {
            nodes: &self.template.base,
            context: "base".to_string(),
        });
        self
    }

    pub fn child<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a, Resolved>),
    {
        assertion(NodesAssertion {
            nodes: &self.template.child,
            context: "child".to_string(),
        });
        self
    }

    pub fn no_overrides(self) -> Self {
        assert!(
            self.template.child.is_empty(),
            "child: Expected no overrides, found [{}]",
            summarize(&self.template.child)
        );
        self
    }
}

pub struct NodesAssertion<'a, P: Phase> {
    nodes: &'a [Node<P>],
    context: String,
}

impl<'a, P: Phase> NodesAssertion<'a, P> {
    pub fn item_count(self, expected: usize) -> Self {
        assert_eq!(
            self.nodes.len(),
            expected,
            "{}: Expected {} nodes, found {}: [{}]",
            self.context,
            expected,
            self.nodes.len(),
            summarize(self.nodes)
        );
        self
    }

    pub fn is_empty(self) -> Self {
        self.item_count(0)
    }

    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a, P>),
    {
        assert!(
            index < self.nodes.len(),
            "{}: Node index {} out of bounds ({} nodes)",
            self.context,
            index,
            self.nodes.len()
        );
        assertion(NodeAssertion {
            node: &self.nodes[index],
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Concatenation of every top-level `Literal`, ignoring other nodes.
    pub fn literal_text(self, expected: &str) -> Self {
        let text: String = self
            .nodes
            .iter()
            .filter_map(|node| match node {
                Node::Literal(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(text, expected, "{}: literal text differs", self.context);
        self
    }
}

pub struct NodeAssertion<'a, P: Phase> {
    node: &'a Node<P>,
    context: String,
}

impl<'a, P: Phase> NodeAssertion<'a, P> {
    fn unexpected(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.node.node_type()
        )
    }

    pub fn literal(self, expected: &str) {
        match self.node {
            Node::Literal(text) => {
                assert_eq!(text, expected, "{}: literal text differs", self.context)
            }
            _ => self.unexpected("Literal"),
        }
    }

    pub fn eval(self, expected: &str) {
        match self.node {
            Node::Eval(expr) => assert_eq!(
                expr.to_string(),
                expected,
                "{}: expression differs",
                self.context
            ),
            _ => self.unexpected("Eval"),
        }
    }

    pub fn raw(self, expected: &str) {
        match self.node {
            Node::Raw(text) => assert_eq!(text, expected, "{}: raw text differs", self.context),
            _ => self.unexpected("Raw"),
        }
    }

    pub fn comment(self, expected: &str) {
        match self.node {
            Node::Comment(text) => {
                assert_eq!(text, expected, "{}: comment text differs", self.context)
            }
            _ => self.unexpected("Comment"),
        }
    }

    pub fn is_super(self) {
        if !matches!(self.node, Node::Super) {
            self.unexpected("Super")
        }
    }

    pub fn include(self, expected: &str) {
        match self.node {
            Node::Include(path, _) => {
                assert_eq!(path, expected, "{}: include path differs", self.context)
            }
            _ => self.unexpected("Include"),
        }
    }

    pub fn extends(self, expected: &str) {
        match self.node {
            Node::Extends(path, _) => {
                assert_eq!(path, expected, "{}: extends path differs", self.context)
            }
            _ => self.unexpected("Extends"),
        }
    }

    pub fn assert_condition(self) -> ConditionAssertion<'a, P> {
        match self.node {
            Node::Condition {
                condition,
                then_branch,
                else_branch,
            } => ConditionAssertion {
                condition,
                then_branch,
                else_branch: else_branch.as_deref(),
                context: self.context,
            },
            _ => self.unexpected("Condition"),
        }
    }

    pub fn assert_foreach(self) -> ForeachAssertion<'a, P> {
        match self.node {
            Node::Foreach {
                binder,
                iterable,
                body,
                else_branch,
            } => ForeachAssertion {
                binder,
                iterable,
                body,
                else_branch: else_branch.as_deref(),
                context: self.context,
            },
            _ => self.unexpected("Foreach"),
        }
    }

    pub fn assert_block(self) -> BlockAssertion<'a, P> {
        match self.node {
            Node::Block {
                defined_in_base,
                name,
                scoped,
                body,
            } => BlockAssertion {
                defined_in_base: *defined_in_base,
                name,
                scoped: *scoped,
                body,
                context: self.context,
            },
            _ => self.unexpected("Block"),
        }
    }

    pub fn assert_base(self) -> NodesAssertion<'a, P> {
        match self.node {
            Node::Base(nodes, _) => NodesAssertion {
                nodes,
                context: format!("{}:base", self.context),
            },
            _ => self.unexpected("Base"),
        }
    }
}

pub struct ConditionAssertion<'a, P: Phase> {
    condition: &'a Expr,
    then_branch: &'a [Node<P>],
    else_branch: Option<&'a [Node<P>]>,
    context: String,
}

impl<'a, P: Phase> ConditionAssertion<'a, P> {
    pub fn condition(self, expected: &str) -> Self {
        assert_eq!(
            self.condition.to_string(),
            expected,
            "{}: condition differs",
            self.context
        );
        self
    }

    pub fn then_branch<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a, P>),
    {
        assertion(NodesAssertion {
            nodes: self.then_branch,
            context: format!("{}:then", self.context),
        });
        self
    }

    pub fn else_branch<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a, P>),
    {
        let Some(nodes) = self.else_branch else {
            panic!("{}: Expected an else branch, found none", self.context);
        };
        assertion(NodesAssertion {
            nodes,
            context: format!("{}:else", self.context),
        });
        self
    }

    pub fn no_else(self) -> Self {
        assert!(
            self.else_branch.is_none(),
            "{}: Expected no else branch",
            self.context
        );
        self
    }
}

pub struct ForeachAssertion<'a, P: Phase> {
    binder: &'a str,
    iterable: &'a Expr,
    body: &'a [Node<P>],
    else_branch: Option<&'a [Node<P>]>,
    context: String,
}

impl<'a, P: Phase> ForeachAssertion<'a, P> {
    pub fn binder(self, expected: &str) -> Self {
        assert_eq!(self.binder, expected, "{}: binder differs", self.context);
        self
    }

    pub fn iterable(self, expected: &str) -> Self {
        assert_eq!(
            self.iterable.to_string(),
            expected,
            "{}: iterable differs",
            self.context
        );
        self
    }

    pub fn body<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a, P>),
    {
        assertion(NodesAssertion {
            nodes: self.body,
            context: format!("{}:body", self.context),
        });
        self
    }

    pub fn else_branch<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a, P>),
    {
        let Some(nodes) = self.else_branch else {
            panic!("{}: Expected an else branch, found none", self.context);
        };
        assertion(NodesAssertion {
            nodes,
            context: format!("{}:else", self.context),
        });
        self
    }
}

pub struct BlockAssertion<'a, P: Phase> {
    defined_in_base: bool,
    name: &'a str,
    scoped: bool,
    body: &'a [Node<P>],
    context: String,
}

impl<'a, P: Phase> BlockAssertion<'a, P> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.name, expected, "{}: block name differs", self.context);
        self
    }

    pub fn defined_in_base(self, expected: bool) -> Self {
        assert_eq!(
            self.defined_in_base, expected,
            "{}: defined_in_base differs for block `{}`",
            self.context, self.name
        );
        self
    }

    pub fn scoped(self, expected: bool) -> Self {
        assert_eq!(
            self.scoped, expected,
            "{}: scoped differs for block `{}`",
            self.context, self.name
        );
        self
    }

    pub fn body<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a, P>),
    {
        assertion(NodesAssertion {
            nodes: self.body,
            context: format!("{}:body", self.context),
        });
        self
    }
}
