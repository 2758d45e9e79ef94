//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup, the run, and snapshot output.

use std::path::PathBuf;

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: sugarscape_core::ConfigError,
    },

    /// Building the initial state failed.
    #[error("bootstrap error: {source}")]
    Bootstrap {
        /// The underlying bootstrap error.
        #[from]
        source: sugarscape_core::BootstrapError,
    },

    /// Landscape loading failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: sugarscape_world::WorldError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: sugarscape_core::RunnerError,
    },

    /// The snapshot could not be encoded.
    #[error("snapshot encoding failed: {source}")]
    SnapshotEncode {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The snapshot could not be written.
    #[error("failed to write snapshot {path}: {source}")]
    SnapshotWrite {
        /// Destination path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
