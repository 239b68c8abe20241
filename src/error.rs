//! Error types for the workmap pipeline.
//!
//! The pipeline itself is lenient by design: malformed numeric text,
//! unknown dimension labels and empty selections are conditions, not
//! errors, and never surface here. The types below cover the only hard
//! failure points — I/O at the file boundary, HTTP at the fetch boundary
//! and serialization on the export side.
//!
//! Error conversion is automatic via `From` implementations, allowing `?`
//! to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Decode Errors
// =============================================================================

/// Errors while reading tabular input.
///
/// Decoding text that is already in memory cannot fail; only the file
/// front end can.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Failed to read the input file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors while fetching an external dataset.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request itself failed (DNS, connection, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server responded with status {0}")]
    Status(u16),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while serializing records back to delimited text.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer rejected a record.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to write the output file.
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),

    /// The serialized buffer was not valid UTF-8.
    #[error("Export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Top-level Errors
// =============================================================================

/// Top-level error type wrapping every pipeline stage.
#[derive(Debug, Error)]
pub enum WorkmapError {
    /// Decode error.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Fetch error.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Export error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write command output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for top-level operations.
pub type WorkmapResult<T> = Result<T, WorkmapError>;
