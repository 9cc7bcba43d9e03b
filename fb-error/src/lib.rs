//! Unified error handling for fodbridge
//!
//! This crate provides the single error type used by the FOD handler.
//! It uses thiserror for ergonomic error definitions with proper Display and Error trait impls.

use std::io;
use std::path::PathBuf;

/// Result type alias using FodError
pub type Result<T> = std::result::Result<T, FodError>;

/// Unified error type for all fodbridge operations
#[derive(thiserror::Error, Debug)]
pub enum FodError {
    // ============================================================================
    // I/O and Endpoint Errors
    // ============================================================================
    #[error("No {endpoint} endpoint could be opened (tried {})", display_paths(.candidates))]
    EndpointUnavailable {
        endpoint: &'static str,
        candidates: Vec<PathBuf>,
    },

    // ============================================================================
    // FOD State Errors
    // ============================================================================
    #[error("Failed to seek FOD state endpoint: {0}")]
    StateSeek(io::Error),

    #[error("Failed to read FOD state endpoint: {0}")]
    StateRead(io::Error),

    #[error("Short read from FOD state endpoint ({read} bytes)")]
    ShortRead {
        read: usize,
    },

    // ============================================================================
    // Lifecycle Errors
    // ============================================================================
    #[error("Failed to spawn event loop thread: {0}")]
    ThreadSpawn(io::Error),

    #[error("Handler already initialized")]
    AlreadyInitialized,

    #[error("Null pointer passed for {0}")]
    NullPointer(&'static str),
}

impl FodError {
    /// Create an endpoint-unavailable error from a candidate list
    pub fn endpoint_unavailable<P: Into<PathBuf> + Clone>(endpoint: &'static str, candidates: &[P]) -> Self {
        Self::EndpointUnavailable {
            endpoint,
            candidates: candidates.iter().cloned().map(Into::into).collect(),
        }
    }

    /// Negative errno matching this error, for C callers
    pub fn errno(&self) -> i32 {
        match self {
            Self::StateSeek(e) | Self::StateRead(e) => {
                -e.raw_os_error().unwrap_or(libc::EIO)
            }
            Self::EndpointUnavailable { .. } => -libc::ENOENT,
            Self::ShortRead { .. } => -libc::EIO,
            Self::ThreadSpawn(_) => -libc::EAGAIN,
            Self::AlreadyInitialized => -libc::EALREADY,
            Self::NullPointer(_) => -libc::EINVAL,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
