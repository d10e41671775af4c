//! Grammar for one template file
//!
//! The grammar works directly on characters; there is no separate tokenizer. It is built
//! from chumsky combinators and relies on ordered choice with full backtracking: each
//! construct is tried in turn and a failed attempt leaves the input untouched.
//!
//! Layout:
//!
//! - `primitives`: identifiers, dotted variable paths and quoted paths
//! - `expressions`: `Var` / `Fun` expressions
//! - `trim`: the whitespace-trim engine shared by every delimited construct
//! - `constructs`: one rule per construct (`if`, `for`, `block`, ...)
//! - `engine`: the file-level rule and the public entry point

pub mod constructs;
pub mod engine;
pub mod expressions;
pub mod primitives;
pub mod trim;

pub use engine::{parse_str, template, ParseState};

/// Error type shared by every rule.
pub type ParserError = chumsky::error::Simple<char>;
