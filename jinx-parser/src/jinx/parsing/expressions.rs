//! Expression grammar: function calls first, then bare variable paths

use super::primitives::{identifier, variable};
use super::ParserError;
use crate::jinx::ast::Expr;
use chumsky::prelude::*;

/// Reserved for `{{ super() }}`; never accepted as a generic function name.
pub const SUPER: &str = "super";

/// Identifier that may name a function.
fn function_name() -> impl Parser<char, String, Error = ParserError> + Clone {
    identifier().try_map(|name, span| {
        if name == SUPER {
            Err(Simple::custom(
                span,
                "`super` is reserved and only valid as `{{ super() }}`",
            ))
        } else {
            Ok(name)
        }
    })
}

/// `name(arg, ...)` or `a.b.c`. Arguments are expressions and may be space padded.
pub fn expression() -> impl Parser<char, Expr, Error = ParserError> + Clone {
    recursive(|expr: Recursive<char, Expr, ParserError>| {
        let args = expr
            .padded()
            .separated_by(just(','))
            .delimited_by(just('(').then(text::whitespace()), just(')'));

        let call = function_name()
            .then(args)
            .map(|(name, args)| Expr::Fun(name, args));

        call.or(variable().map(Expr::Var))
    })
    .labelled("expression")
}
