//! Registry-specific error types.
//!
//! Only environment failures live here. Recipe validation findings are
//! plain strings carried inside results — a document being wrong is the
//! engine's output, not an error condition.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a component registry.
///
/// A registry failure is fatal to a whole validation run: no registry means
/// no cross-referencing, so callers abort before touching any recipe file.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    Read {
        /// Path the loader attempted to read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The registry file is not valid JSON for the registry shape.
    #[error("failed to parse registry JSON at {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },
}
