//! Whitespace-trim engine
//!
//! Every construct starts by capturing the run of whitespace in front of it. That capture is
//! [`Pending`]: it is re-emitted as a `Literal` in front of the construct's node once the
//! construct matches, unless the construct opened with `{%-`, in which case it is dropped.
//! A tag that closes with `-%}` swallows all whitespace after it.
//!
//! Open and close markers are independent: `{%- x %}` trims only the left side, `{% x -%}`
//! only the right. Tags that close a construct (`else`, `endif`, `endblock`, ...) follow the
//! same rules, and their pending whitespace is folded into the body they terminate.

use super::ParserError;
use crate::jinx::ast::{Node, Phase};
use chumsky::prelude::*;

/// Whitespace captured in front of a construct, not yet committed to the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pending(Option<String>);

impl Pending {
    fn from_run(run: String) -> Self {
        if run.is_empty() {
            Pending(None)
        } else {
            Pending(Some(run))
        }
    }

    /// Apply the open marker: `{%-` discards the capture.
    pub fn settle(self, trim_left: bool) -> Self {
        if trim_left {
            Pending(None)
        } else {
            self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The construct's output: the capture as a `Literal`, then `node`.
    pub fn prepend<P: Phase>(self, node: Node<P>) -> Vec<Node<P>> {
        let mut nodes = Vec::with_capacity(2);
        self.append_to(&mut nodes);
        nodes.push(node);
        nodes
    }

    /// Fold the capture into the trailing edge of a body.
    pub fn append_to<P: Phase>(self, nodes: &mut Vec<Node<P>>) {
        if let Some(run) = self.0 {
            nodes.push(Node::Literal(run));
        }
    }

    /// Fold the capture into verbatim text.
    pub fn append_to_text(self, text: &mut String) {
        if let Some(run) = self.0 {
            text.push_str(&run);
        }
    }
}

/// The run of whitespace in front of a construct. Never fails.
pub fn leading_whitespace() -> impl Parser<char, Pending, Error = ParserError> + Clone {
    filter(|c: &char| c.is_whitespace())
        .repeated()
        .collect::<String>()
        .map(Pending::from_run)
}

/// `{%` or `{%-`; yields whether the tag trims to its left.
fn open_marker() -> impl Parser<char, bool, Error = ParserError> + Clone {
    just("{%")
        .ignore_then(just('-').or_not())
        .map(|dash| dash.is_some())
}

/// `%}` or `-%}`; the trimming form also consumes the whitespace that follows.
fn close_marker() -> impl Parser<char, (), Error = ParserError> + Clone {
    just("-%}")
        .ignore_then(text::whitespace())
        .ignored()
        .or(just("%}").ignored())
}

/// A `{% ... %}` tag around `inner`, without the leading capture.
///
/// Yields whether the tag trims left alongside the inner value.
pub fn statement<O, P>(inner: P) -> impl Parser<char, (bool, O), Error = ParserError> + Clone
where
    P: Parser<char, O, Error = ParserError> + Clone,
{
    open_marker()
        .then_ignore(text::whitespace())
        .then(inner)
        .then_ignore(text::whitespace())
        .then_ignore(close_marker())
}

/// A statement tag with its leading capture already settled against the open marker.
pub fn tag<O, P>(inner: P) -> impl Parser<char, (Pending, O), Error = ParserError> + Clone
where
    P: Parser<char, O, Error = ParserError> + Clone,
{
    leading_whitespace()
        .then(statement(inner))
        .map(|(pending, (trim_left, value))| (pending.settle(trim_left), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jinx::ast::UnresolvedNode;

    #[test]
    fn test_plain_tag_keeps_capture() {
        let (pending, ()) = tag(text::keyword("else")).parse("  {% else %}").unwrap();
        assert_eq!(pending, Pending(Some("  ".to_string())));
    }

    #[test]
    fn test_trim_left_discards_capture() {
        let (pending, ()) = tag(text::keyword("else")).parse("\n {%- else %}").unwrap();
        assert!(pending.is_empty());
    }

    #[test]
    fn test_trim_right_swallows_following_whitespace() {
        let parser = tag(text::keyword("else")).then(any().repeated().collect::<String>());
        let ((_, ()), rest) = parser.parse("{% else -%} \n\t next").unwrap();
        assert_eq!(rest, "next");

        let ((_, ()), rest) = parser.parse("{% else %} \n next").unwrap();
        assert_eq!(rest, " \n next");
    }

    #[test]
    fn test_prepend_without_capture() {
        let nodes: Vec<UnresolvedNode> = Pending::default().prepend(Node::Super);
        assert_eq!(nodes, vec![Node::Super]);
    }
}
