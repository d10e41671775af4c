//! Error types for parsing and resolution

use crate::jinx::resolving::LoaderError;
use chumsky::error::{Simple, SimpleReason};
use std::fmt;

/// How much of the unconsumed input a syntax error quotes.
const REMAINDER_CAP: usize = 32;

/// The grammar could not consume a file.
///
/// Positions are 1-based and counted in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    /// Character offset of the failure.
    pub offset: usize,
    /// Alternatives the grammar would have accepted at `offset`.
    pub expected: Vec<String>,
    pub found: Option<char>,
    /// Set when a rule rejected otherwise well-formed input (block names, `super`).
    pub reason: Option<String>,
    /// Up to 32 characters of the input the file-level loop could not consume, starting at
    /// the construct that failed to match.
    pub remainder: String,
}

impl SyntaxError {
    /// Collapse the combinator errors into the one that got furthest.
    ///
    /// `unconsumed` is the input left over where the construct loop stopped; the position
    /// fields still point at the furthest failure inside the abandoned attempt.
    pub(crate) fn from_simple(source: &str, errors: Vec<Simple<char>>, unconsumed: &str) -> Self {
        let furthest = errors.into_iter().max_by_key(|e| e.span().start);
        let offset = furthest.as_ref().map(|e| e.span().start).unwrap_or(0);
        let (line, column) = line_column(source, offset);
        let remainder = unconsumed
            .trim_start()
            .chars()
            .take(REMAINDER_CAP)
            .collect();

        let Some(error) = furthest else {
            return SyntaxError {
                line,
                column,
                offset,
                expected: Vec::new(),
                found: None,
                reason: None,
                remainder,
            };
        };

        let mut expected: Vec<String> = error
            .expected()
            .map(|e| match e {
                Some(c) => format!("{:?}", c),
                None => "end of input".to_string(),
            })
            .collect();
        expected.sort();
        expected.dedup();

        let reason = match error.reason() {
            SimpleReason::Custom(message) => Some(message.clone()),
            SimpleReason::Unclosed { delimiter, .. } => {
                Some(format!("unclosed delimiter {:?}", delimiter))
            }
            SimpleReason::Unexpected => error.label().map(|l| format!("invalid {}", l)),
        };

        SyntaxError {
            line,
            column,
            offset,
            expected,
            found: error.found().copied(),
            reason,
            remainder,
        }
    }
}

fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for c in source.chars().take(offset) {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error at {}:{}: ", self.line, self.column)?;
        match (&self.reason, self.found) {
            (Some(reason), _) => f.write_str(reason)?,
            (None, Some(c)) => write!(f, "unexpected {:?}", c)?,
            (None, None) => f.write_str("unexpected end of input")?,
        }
        if !self.expected.is_empty() {
            write!(f, ", expected one of {}", self.expected.join(", "))?;
        }
        if !self.remainder.is_empty() {
            write!(f, " near \"{}\"", self.remainder.escape_debug())?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

/// Errors that abort resolving a template chain
#[derive(Debug, Clone)]
pub enum ResolveError {
    /// A file (or the root source when `path` is `None`) failed to parse.
    Syntax {
        path: Option<String>,
        error: SyntaxError,
    },
    /// An `include` or `extends` target could not be loaded.
    Reference { path: String, source: LoaderError },
    /// A file ended up including or extending itself.
    Cycle { chain: Vec<String> },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Syntax {
                path: Some(path),
                error,
            } => write!(f, "{}: {}", path, error),
            ResolveError::Syntax { path: None, error } => write!(f, "{}", error),
            ResolveError::Reference { path, source } => {
                write!(f, "cannot load template \"{}\": {}", path, source)
            }
            ResolveError::Cycle { chain } => {
                write!(f, "template reference cycle: {}", chain.join(" -> "))
            }
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Syntax { error, .. } => Some(error),
            ResolveError::Reference { source, .. } => Some(source),
            ResolveError::Cycle { .. } => None,
        }
    }
}

impl From<SyntaxError> for ResolveError {
    fn from(error: SyntaxError) -> Self {
        ResolveError::Syntax { path: None, error }
    }
}
