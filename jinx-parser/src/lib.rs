//! # jinx
//!
//! The parsing front end of a Jinja-style template engine.
//!
//! File Layout
//!
//! The work is split the same way the data flows:
//!
//! src/jinx
//!   ├── ast        Expressions, the phase-tagged node type and the flattened `Template`
//!   ├── parsing    Character-level grammar (chumsky) including the whitespace-trim engine
//!   ├── resolving  Loaders, `include`/`extends` expansion and inheritance flattening
//!   ├── formats    Snapshot based output formats (treeviz, json) and canonical source
//!   └── testing    Fluent assertions over node sequences
//!
//! Rendering is not part of this crate: a resolved [`Template`](jinx::ast::Template) is the
//! hand-off point to whatever executes it.

pub mod jinx;

pub use jinx::ast::{Expr, Node, ResolvedNode, Template, UnresolvedNode};
pub use jinx::error::{ResolveError, SyntaxError};
pub use jinx::parsing::parse_str;
pub use jinx::resolving::{FileSystemLoader, MemoryLoader, ResolveOptions, Resolver, TemplateLoader};
