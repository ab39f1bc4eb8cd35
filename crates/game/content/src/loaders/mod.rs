//! Content loaders for reading economy data from files.
//!
//! Loaders convert RON files into [`crate::ContentCatalog`] values; hosts
//! typically fall back to [`crate::ContentCatalog::builtin`] when no file is
//! supplied.

pub mod economy;

pub use economy::CatalogLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
