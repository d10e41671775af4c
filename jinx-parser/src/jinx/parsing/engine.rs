//! File-level grammar and entry point
//!
//! A file is `[extends] construct*` followed by end of input. Whether the file opened with
//! `extends` is the only state that outlives a single construct: it decides the
//! `defined_in_base` flag of every block in the file. Rather than a mutable flag, the body
//! grammar is built once per state, so one parse never observes another's state.

use super::constructs::{
    block, comment, condition, eval, extends, foreach, include, literal, raw, super_call, Nodes,
};
use super::ParserError;
use crate::jinx::ast::UnresolvedNode;
use crate::jinx::error::SyntaxError;
use chumsky::prelude::*;

/// Per-file grammar state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseState {
    /// False once the file has declared a parent through `extends`.
    pub in_base_template: bool,
}

impl ParseState {
    pub fn base() -> Self {
        Self {
            in_base_template: true,
        }
    }

    pub fn child() -> Self {
        Self {
            in_base_template: false,
        }
    }
}

/// Zero or more constructs, tried in dispatch order.
pub fn nodes(state: ParseState) -> impl Parser<char, Nodes, Error = ParserError> + Clone {
    recursive(move |nodes: Recursive<char, Nodes, ParserError>| {
        choice((
            literal(),
            eval(),
            condition(nodes.clone()),
            foreach(nodes.clone()),
            include(),
            raw(),
            block(nodes, state),
            super_call(),
            comment(),
        ))
        .repeated()
        .map(|groups: Vec<Nodes>| groups.into_iter().flatten().collect::<Nodes>())
    })
}

/// A whole file.
pub fn template() -> impl Parser<char, Nodes, Error = ParserError> + Clone {
    let child = extends()
        .then(nodes(ParseState::child()))
        .map(|(mut head, rest)| {
            head.extend(rest);
            head
        });

    child.or(nodes(ParseState::base())).then_ignore(end())
}

/// Whatever input is left once the construct loop stops, without requiring end of input.
fn unconsumed() -> impl Parser<char, String, Error = ParserError> + Clone {
    let child = extends().then(nodes(ParseState::child())).ignored();

    child
        .or(nodes(ParseState::base()).ignored())
        .ignore_then(any().repeated().collect::<String>())
}

/// Parse one file's text into unresolved nodes.
///
/// No trailing-newline normalization happens here; see
/// [`resolving::normalize`](crate::jinx::resolving::normalize) for the rules applied to
/// loaded files.
pub fn parse_str(source: &str) -> Result<Vec<UnresolvedNode>, SyntaxError> {
    template()
        .parse(source)
        .map_err(|errors| {
            let rest = unconsumed().parse(source).unwrap_or_default();
            SyntaxError::from_simple(source, errors, &rest)
        })
}
