//! Include/extends expansion and inheritance flattening
//!
//! Resolution is a plain recursive walk: one call frame per file being resolved, blocking
//! reads, no caching. Each file is parsed on its own, so grammar state never leaks between
//! files.
//!
//! - `Include(path)` is replaced by the base-level nodes of the included file.
//! - `Extends(path)` is replaced by `Base(parent nodes)`, where the parent nodes are resolved
//!   but not flattened. A parent that itself extends something therefore starts with its own
//!   `Base`, and [`Template::from_nodes`] peels the layers root first.

use super::loader::TemplateLoader;
use super::normalize::{normalize_root, FileRole};
use crate::jinx::ast::{Node, ResolvedNode, Template, UnresolvedNode};
use crate::jinx::error::ResolveError;
use crate::jinx::parsing::parse_str;
use tracing::{debug, trace};

/// Knobs for a resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Fail with [`ResolveError::Cycle`] when a file is reached again through its own
    /// references. When false, such a chain recurses without bound.
    pub detect_cycles: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            detect_cycles: true,
        }
    }
}

/// Resolves templates served by a loader.
///
/// # Example
///
/// ```rust
/// use jinx_parser::{MemoryLoader, Resolver};
///
/// let loader = MemoryLoader::new()
///     .with("base.html", "<main>{% block body %}{% endblock %}</main>")
///     .with("page.html", "{% extends \"base.html\" %}{% block body %}hi{% endblock %}");
/// let template = Resolver::new(loader).load_template("page.html").unwrap();
/// assert_eq!(template.child_blocks().count(), 1);
/// ```
#[derive(Debug)]
pub struct Resolver<L> {
    loader: L,
    options: ResolveOptions,
    /// Files currently being resolved, outermost first.
    active: Vec<String>,
}

impl<L: TemplateLoader> Resolver<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            options: ResolveOptions::default(),
            active: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Load `path` as a root template: parse, resolve, flatten.
    pub fn load_template(&mut self, path: &str) -> Result<Template, ResolveError> {
        let nodes = self.load_resolved(path, FileRole::Root)?;
        Ok(Template::from_nodes(nodes))
    }

    /// Load `path` as an include target: parse, resolve, flatten, keep only `base`.
    pub fn load_include(&mut self, path: &str) -> Result<Vec<ResolvedNode>, ResolveError> {
        let nodes = self.load_resolved(path, FileRole::Include)?;
        Ok(Template::from_nodes(nodes).base)
    }

    /// Treat `source` as a root template that is not stored in the loader. Its references
    /// are still served by the loader.
    pub fn resolve_source(&mut self, source: &str) -> Result<Template, ResolveError> {
        let nodes = parse_str(&normalize_root(source))?;
        let resolved = self.resolve(nodes)?;
        Ok(Template::from_nodes(resolved))
    }

    fn load_resolved(
        &mut self,
        path: &str,
        role: FileRole,
    ) -> Result<Vec<ResolvedNode>, ResolveError> {
        if self.options.detect_cycles && self.active.iter().any(|active| active == path) {
            let mut chain = self.active.clone();
            chain.push(path.to_string());
            return Err(ResolveError::Cycle { chain });
        }

        debug!(path, ?role, depth = self.active.len(), "loading template");
        let text = self
            .loader
            .load(path)
            .map_err(|source| ResolveError::Reference {
                path: path.to_string(),
                source,
            })?;
        let nodes = parse_str(&role.normalize(&text)).map_err(|error| ResolveError::Syntax {
            path: Some(path.to_string()),
            error,
        })?;
        trace!(path, nodes = nodes.len(), "parsed template");

        self.active.push(path.to_string());
        let resolved = self.resolve(nodes);
        self.active.pop();
        resolved
    }

    /// Turn one unresolved sequence into a resolved one.
    pub fn resolve(
        &mut self,
        nodes: Vec<UnresolvedNode>,
    ) -> Result<Vec<ResolvedNode>, ResolveError> {
        let mut resolved = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                Node::Include(path, ()) => {
                    let included = self.load_include(&path)?;
                    debug!(%path, nodes = included.len(), "spliced include");
                    resolved.extend(included);
                }
                Node::Extends(path, ()) => {
                    let parent = self.load_resolved(&path, FileRole::Root)?;
                    debug!(%path, "inlined parent template");
                    resolved.push(Node::base(parent));
                }
                Node::Base(_, never) => match never {},
                Node::Literal(text) => resolved.push(Node::Literal(text)),
                Node::Eval(expr) => resolved.push(Node::Eval(expr)),
                Node::Condition {
                    condition,
                    then_branch,
                    else_branch,
                } => resolved.push(Node::Condition {
                    condition,
                    then_branch: self.resolve(then_branch)?,
                    else_branch: self.resolve_optional(else_branch)?,
                }),
                Node::Foreach {
                    binder,
                    iterable,
                    body,
                    else_branch,
                } => resolved.push(Node::Foreach {
                    binder,
                    iterable,
                    body: self.resolve(body)?,
                    else_branch: self.resolve_optional(else_branch)?,
                }),
                Node::Raw(text) => resolved.push(Node::Raw(text)),
                Node::Block {
                    defined_in_base,
                    name,
                    scoped,
                    body,
                } => resolved.push(Node::Block {
                    defined_in_base,
                    name,
                    scoped,
                    body: self.resolve(body)?,
                }),
                Node::Super => resolved.push(Node::Super),
                Node::Comment(text) => resolved.push(Node::Comment(text)),
            }
        }
        Ok(resolved)
    }

    fn resolve_optional(
        &mut self,
        nodes: Option<Vec<UnresolvedNode>>,
    ) -> Result<Option<Vec<ResolvedNode>>, ResolveError> {
        nodes.map(|nodes| self.resolve(nodes)).transpose()
    }
}

/// Resolve a root source against `loader` with default options.
pub fn parse_template_str<L: TemplateLoader>(
    source: &str,
    loader: L,
) -> Result<Template, ResolveError> {
    Resolver::new(loader).resolve_source(source)
}
