//! Package file access
//!
//! Validators and the parser never touch the filesystem directly; they go
//! through a [`PackageSource`]. Paths are package-relative and `/`-separated.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::SourceError;

/// Result type for package source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Read access to the files of one package
#[async_trait]
pub trait PackageSource: Send + Sync {
    /// All files of the package, normalized and sorted
    async fn list_files(&self) -> SourceResult<Vec<String>>;

    /// Raw bytes of `path`
    async fn read(&self, path: &str) -> SourceResult<Vec<u8>>;

    /// Contents of `path` as UTF-8 text
    async fn read_to_string(&self, path: &str) -> SourceResult<String> {
        let bytes = self.read(path).await?;
        String::from_utf8(bytes).map_err(|_| SourceError::Utf8 {
            path: path.to_string(),
        })
    }

    /// Size of `path` in bytes
    async fn size(&self, path: &str) -> SourceResult<u64>;
}

/// Normalize a package path: forward slashes, no leading `./` or `/`.
///
/// Returns `None` for paths escaping the package root.
pub fn normalize_path(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(['/', '\\']) {
        match part {
            "" | "." => continue,
            ".." => return None,
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// The set of files in a package, as listed once at the start of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: BTreeSet<String>,
}

impl FileSet {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            files: files
                .into_iter()
                .filter_map(|f| normalize_path(f.as_ref()))
                .collect(),
        }
    }

    /// Whether the package contains `path`; the path is normalized first
    pub fn contains(&self, path: &str) -> bool {
        normalize_path(path).is_some_and(|p| self.files.contains(&p))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    /// Files below the directory `prefix`
    pub fn under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let prefix = prefix.trim_end_matches('/');
        self.iter().filter(move |f| {
            f.strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A package stored in a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> SourceResult<PathBuf> {
        let normalized = normalize_path(path).ok_or_else(|| SourceError::InvalidPath {
            path: path.to_string(),
        })?;
        Ok(self.root.join(normalized))
    }

    fn io_error(path: &str, source: std::io::Error) -> SourceError {
        if source.kind() == std::io::ErrorKind::NotFound {
            SourceError::NotFound {
                path: path.to_string(),
            }
        } else {
            SourceError::Io {
                path: path.to_string(),
                source,
            }
        }
    }
}

fn walk(root: &Path) -> SourceResult<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| SourceError::Walk {
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let joined = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        if !joined.is_empty() {
            files.push(joined);
        }
    }
    files.sort();
    Ok(files)
}

#[async_trait]
impl PackageSource for DirectorySource {
    async fn list_files(&self) -> SourceResult<Vec<String>> {
        let root = self.root.clone();
        let files = tokio::task::spawn_blocking(move || walk(&root))
            .await
            .map_err(|e| SourceError::Walk {
                message: e.to_string(),
            })??;
        debug!(root = %self.root.display(), count = files.len(), "listed package files");
        Ok(files)
    }

    async fn read(&self, path: &str) -> SourceResult<Vec<u8>> {
        let full = self.resolve(path)?;
        tokio::fs::read(&full)
            .await
            .map_err(|e| Self::io_error(path, e))
    }

    async fn size(&self, path: &str) -> SourceResult<u64> {
        let full = self.resolve(path)?;
        tokio::fs::metadata(&full)
            .await
            .map(|m| m.len())
            .map_err(|e| Self::io_error(path, e))
    }
}

/// An in-memory package, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file. Paths that escape the package are ignored.
    pub fn insert(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
        if let Some(normalized) = normalize_path(path) {
            self.files.insert(normalized, contents.into());
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    fn lookup(&self, path: &str) -> SourceResult<&Vec<u8>> {
        let normalized = normalize_path(path).ok_or_else(|| SourceError::InvalidPath {
            path: path.to_string(),
        })?;
        self.files.get(&normalized).ok_or_else(|| SourceError::NotFound {
            path: path.to_string(),
        })
    }
}

#[async_trait]
impl PackageSource for MemorySource {
    async fn list_files(&self) -> SourceResult<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    async fn read(&self, path: &str) -> SourceResult<Vec<u8>> {
        self.lookup(path).cloned()
    }

    async fn size(&self, path: &str) -> SourceResult<u64> {
        self.lookup(path).map(|bytes| bytes.len() as u64)
    }
}
