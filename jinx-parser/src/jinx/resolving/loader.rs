//! Template loading
//!
//! The resolver only needs "read the file at this path, or fail". [`TemplateLoader`] is that
//! seam; [`FileSystemLoader`] serves files under a root directory and [`MemoryLoader`] serves
//! sources registered up front.
//!
//! # Example
//!
//! ```rust
//! use jinx_parser::jinx::resolving::{MemoryLoader, TemplateLoader};
//!
//! let loader = MemoryLoader::new().with("base.html", "{% block body %}{% endblock %}");
//! assert!(loader.load("base.html").is_ok());
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error that can occur when loading a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderError {
    /// Nothing exists under that name
    NotFound(String),
    /// IO error when reading file
    IoError(String),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::NotFound(path) => write!(f, "template not found: {}", path),
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<io::Error> for LoaderError {
    fn from(err: io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

/// Source of template text, keyed by the path written in `include` / `extends`.
pub trait TemplateLoader {
    fn load(&self, path: &str) -> Result<String, LoaderError>;
}

impl<L: TemplateLoader + ?Sized> TemplateLoader for &L {
    fn load(&self, path: &str) -> Result<String, LoaderError> {
        (**self).load(path)
    }
}

impl<L: TemplateLoader + ?Sized> TemplateLoader for Box<L> {
    fn load(&self, path: &str) -> Result<String, LoaderError> {
        (**self).load(path)
    }
}

/// Reads templates from disk, relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileSystemLoader {
    root: PathBuf,
}

impl FileSystemLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateLoader for FileSystemLoader {
    fn load(&self, path: &str) -> Result<String, LoaderError> {
        let full_path = self.root.join(path);
        fs::read_to_string(&full_path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => LoaderError::NotFound(full_path.display().to_string()),
            _ => LoaderError::IoError(format!("{}: {}", full_path.display(), err)),
        })
    }
}

/// Serves sources registered in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(path.into(), source.into());
    }
}

impl TemplateLoader for MemoryLoader {
    fn load(&self, path: &str) -> Result<String, LoaderError> {
        self.sources
            .get(path)
            .cloned()
            .ok_or_else(|| LoaderError::NotFound(path.to_string()))
    }
}
