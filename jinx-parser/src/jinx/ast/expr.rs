//! Expression model

use std::fmt;

/// A dotted variable path such as `user.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariablePath {
    segments: Vec<String>,
}

impl VariablePath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Build a path from its dotted form. Empty segments are kept as-is.
    pub fn parse_dotted(dotted: &str) -> Self {
        Self::new(dotted.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for VariablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// An expression inside `{{ }}` or a statement tag.
///
/// Expressions are never evaluated here; they are kept as structure for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// `a.b.c`
    Var(VariablePath),
    /// `name(arg, arg, ...)`
    Fun(String, Vec<Expr>),
}

impl Expr {
    /// Shorthand for a variable expression from its dotted form.
    pub fn var(dotted: &str) -> Self {
        Expr::Var(VariablePath::parse_dotted(dotted))
    }

    pub fn fun(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Fun(name.into(), args)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(path) => write!(f, "{}", path),
            Expr::Fun(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
