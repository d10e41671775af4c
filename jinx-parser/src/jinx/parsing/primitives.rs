//! Lexical primitives: identifiers, variable paths and quoted paths

use super::ParserError;
use crate::jinx::ast::VariablePath;
use chumsky::prelude::*;

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn identifier() -> impl Parser<char, String, Error = ParserError> + Clone {
    text::ident().labelled("identifier")
}

/// Dot separated identifiers with no surrounding space, e.g. `page.title`.
pub fn variable() -> impl Parser<char, VariablePath, Error = ParserError> + Clone {
    identifier()
        .separated_by(just('.'))
        .at_least(1)
        .map(VariablePath::new)
        .labelled("variable")
}

/// A path in single or double quotes. No escape processing.
pub fn quoted_path() -> impl Parser<char, String, Error = ParserError> + Clone {
    let quoted = |quote: char| {
        just(quote)
            .ignore_then(filter(move |c: &char| *c != quote).repeated().collect::<String>())
            .then_ignore(just(quote))
    };
    quoted('"').or(quoted('\'')).labelled("quoted path")
}
