// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::LoadError;

/// Source of resource bytes.
///
/// Implemented by hosts over whatever transport they have (HTTP client,
/// asset bundle, in-memory cache).
pub trait Fetch {
    /// Fetches the bytes behind `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, LoadError>>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, LoadError>> {
        (**self).fetch(url)
    }
}

/// Fetches `file://` URLs and paths relative to a root directory.
#[derive(Clone, Debug)]
pub struct FileFetch {
    root: PathBuf,
}

impl FileFetch {
    /// Resolves relative URLs against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps `url` to a filesystem path, or `None` for other schemes.
    #[must_use]
    pub fn path_for(&self, url: &str) -> Option<PathBuf> {
        let url = url.split(['?', '#']).next().unwrap_or(url);
        if let Some(path) = url.strip_prefix("file://") {
            return Some(PathBuf::from(path));
        }
        if url.contains("://") || url.starts_with("data:") {
            return None;
        }
        Some(self.root.join(url.trim_start_matches('/')))
    }
}

impl Fetch for FileFetch {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let path = self
            .path_for(url)
            .ok_or_else(|| LoadError::fetch(url, "unsupported URL scheme"))?;
        log::trace!("reading {}", path.display());
        Ok(std::fs::read(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_mapping() {
        let fetch = FileFetch::new("/srv/www");
        assert_eq!(
            fetch.path_for("img/a.png?v=2"),
            Some(PathBuf::from("/srv/www/img/a.png"))
        );
        assert_eq!(
            fetch.path_for("/img/a.png"),
            Some(PathBuf::from("/srv/www/img/a.png"))
        );
        assert_eq!(
            fetch.path_for("file:///tmp/b.jpg"),
            Some(PathBuf::from("/tmp/b.jpg"))
        );
        assert_eq!(fetch.path_for("https://example.com/a.png"), None);
        assert_eq!(fetch.path_for("data:image/png;base64,AAAA"), None);
    }

    #[test]
    fn unsupported_scheme_is_a_fetch_error() {
        let fetch = FileFetch::new(".");
        let err = pollster::block_on(fetch.fetch("https://example.com/a.png")).unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let fetch = FileFetch::new(std::env::temp_dir());
        let err = pollster::block_on(fetch.fetch("understory-zoom-missing.png")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
