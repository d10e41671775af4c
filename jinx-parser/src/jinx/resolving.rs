//! Cross-file resolution
//!
//! The [`Resolver`] pulls `include` and `extends` targets through a [`TemplateLoader`],
//! parses them with the file grammar, inlines them and flattens the inheritance chain into a
//! [`Template`](crate::jinx::ast::Template).

pub mod loader;
pub mod normalize;
pub mod resolver;

pub use loader::{FileSystemLoader, LoaderError, MemoryLoader, TemplateLoader};
pub use normalize::FileRole;
pub use resolver::{parse_template_str, ResolveOptions, Resolver};
