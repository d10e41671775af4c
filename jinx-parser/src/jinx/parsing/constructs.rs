//! One rule per template construct
//!
//! Every rule yields the nodes it contributes to the surrounding sequence: the re-emitted
//! leading whitespace (if any) followed by the construct's own node. Rules with a body take
//! the recursive `nodes` parser for that body.

use super::engine::ParseState;
use super::expressions::{expression, SUPER};
use super::primitives::{identifier, quoted_path};
use super::trim::{leading_whitespace, tag, Pending};
use super::ParserError;
use crate::jinx::ast::{Node, UnresolvedNode};
use chumsky::prelude::*;

/// Output of every construct rule.
pub type Nodes = Vec<UnresolvedNode>;

/// Text up to the next `{`.
///
/// A whitespace run directly in front of a `{` is left for the next construct to capture;
/// whitespace anywhere else, including at end of input, belongs to the literal.
pub fn literal() -> impl Parser<char, Nodes, Error = ParserError> + Clone {
    let plain = filter(|c: &char| *c != '{' && !c.is_whitespace()).map(String::from);
    let inner_space = filter(|c: &char| c.is_whitespace())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .then_ignore(filter(|c: &char| *c != '{').ignored().or(end()).rewind());

    plain.or(inner_space)
        .repeated()
        .at_least(1)
        .map(|pieces: Vec<String>| vec![Node::Literal(pieces.concat())])
        .labelled("literal")
}

/// `{{ expr }}`
pub fn eval() -> impl Parser<char, Nodes, Error = ParserError> + Clone {
    leading_whitespace()
        .then(
            just("{{")
                .ignore_then(expression().padded())
                .then_ignore(just("}}")),
        )
        .map(|(pending, expr)| pending.prepend(Node::Eval(expr)))
}

/// Body of a branch plus the tag that ends it, with the tag's capture folded in.
fn branch_body<T, B>(body: B, terminator: T) -> impl Parser<char, Nodes, Error = ParserError> + Clone
where
    B: Parser<char, Nodes, Error = ParserError> + Clone,
    T: Parser<char, (Pending, ()), Error = ParserError> + Clone,
{
    body.then(terminator).map(|(mut nodes, (pending, ()))| {
        pending.append_to(&mut nodes);
        nodes
    })
}

/// `[{% else %} body]` followed by the construct's end tag.
///
/// Yields the else body (if any) and the capture in front of whichever tag comes first,
/// which belongs to the preceding branch.
fn else_and_end<B>(
    body: B,
    end_keyword: &'static str,
) -> impl Parser<char, (Pending, Option<Nodes>), Error = ParserError> + Clone
where
    B: Parser<char, Nodes, Error = ParserError> + Clone,
{
    let end_tag = tag(text::keyword(end_keyword));
    let with_else = tag(text::keyword("else"))
        .then(branch_body(body, end_tag.clone()))
        .map(|((pending, ()), else_body)| (pending, Some(else_body)));
    let without_else = end_tag.map(|(pending, ())| (pending, None));

    with_else.or(without_else)
}

/// `{% if expr %} ... [{% else %} ...] {% endif %}`
pub fn condition<B>(body: B) -> impl Parser<char, Nodes, Error = ParserError> + Clone
where
    B: Parser<char, Nodes, Error = ParserError> + Clone,
{
    tag(text::keyword("if").ignore_then(expression().padded()))
        .then(body.clone())
        .then(else_and_end(body, "endif"))
        .map(
            |(((pending, condition), mut then_branch), (tail, else_branch))| {
                tail.append_to(&mut then_branch);
                pending.prepend(Node::Condition {
                    condition,
                    then_branch,
                    else_branch,
                })
            },
        )
}

/// `{% for binder in expr %} ... [{% else %} ...] {% endfor %}`
pub fn foreach<B>(body: B) -> impl Parser<char, Nodes, Error = ParserError> + Clone
where
    B: Parser<char, Nodes, Error = ParserError> + Clone,
{
    let header = text::keyword("for")
        .ignore_then(identifier().padded())
        .then_ignore(text::keyword("in"))
        .then(expression().padded());

    tag(header)
        .then(body.clone())
        .then(else_and_end(body, "endfor"))
        .map(
            |(((pending, (binder, iterable)), mut loop_body), (tail, else_branch))| {
                tail.append_to(&mut loop_body);
                pending.prepend(Node::Foreach {
                    binder,
                    iterable,
                    body: loop_body,
                    else_branch,
                })
            },
        )
}

/// `{% include "path" %}`
pub fn include() -> impl Parser<char, Nodes, Error = ParserError> + Clone {
    tag(text::keyword("include").ignore_then(quoted_path().padded()))
        .map(|(pending, path)| pending.prepend(Node::include(path)))
}

/// `{% raw %} ... {% endraw %}`; the interior is not parsed.
pub fn raw() -> impl Parser<char, Nodes, Error = ParserError> + Clone {
    tag(text::keyword("raw"))
        .then(take_until(tag(text::keyword("endraw"))))
        .map(|((pending, ()), (chars, (tail, ())))| {
            let mut text: String = chars.into_iter().collect();
            tail.append_to_text(&mut text);
            pending.prepend(Node::Raw(text))
        })
}

/// `{% extends "path" %}`
///
/// Only valid as the first construct of a file, so whitespace in front of it is dropped
/// rather than emitted ahead of the directive.
pub fn extends() -> impl Parser<char, Nodes, Error = ParserError> + Clone {
    tag(text::keyword("extends").ignore_then(quoted_path().padded()))
        .map(|(_, path)| vec![Node::extends(path)])
}

/// `{% block name %} ... {% endblock [name] %}`
///
/// A named close tag must repeat the opening name.
pub fn block<B>(body: B, state: ParseState) -> impl Parser<char, Nodes, Error = ParserError> + Clone
where
    B: Parser<char, Nodes, Error = ParserError> + Clone,
{
    let open = tag(text::keyword("block").ignore_then(identifier().padded()));
    let close = tag(text::keyword("endblock").ignore_then(identifier().padded().or_not()));

    open.then(body)
        .then(close)
        .try_map(
            move |(((pending, name), mut body), (tail, close_name)), span| {
                if let Some(close_name) = close_name {
                    if close_name != name {
                        return Err(Simple::custom(
                            span,
                            format!("block `{}` closed by `endblock {}`", name, close_name),
                        ));
                    }
                }
                tail.append_to(&mut body);
                Ok(pending.prepend(Node::block(state.in_base_template, name, body)))
            },
        )
}

/// `{{ super() }}`, exactly; no arguments.
pub fn super_call() -> impl Parser<char, Nodes, Error = ParserError> + Clone {
    leading_whitespace()
        .then_ignore(
            just("{{")
                .ignore_then(text::keyword(SUPER).then(just("()")).padded())
                .then_ignore(just("}}")),
        )
        .map(|pending| pending.prepend(Node::Super))
}

/// `{# text #}`, ending at the first `#}`.
pub fn comment() -> impl Parser<char, Nodes, Error = ParserError> + Clone {
    leading_whitespace()
        .then(just("{#").ignore_then(take_until(just("#}"))))
        .map(|(pending, (chars, _))| pending.prepend(Node::Comment(chars.into_iter().collect())))
}
