//! # Workmap - labor-market treemap data pipeline
//!
//! Workmap turns raw BLS occupational statistics (employment, wages, GDP
//! contribution, complexity scores) into treemap chart input for a
//! Plotly-compatible renderer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV source │────▶│   Decoder   │────▶│   Engine    │────▶│  Projector  │
//! │ (fetch/file)│     │ (coerce-0)  │     │(filter/rank)│     │ (chart JSON)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use workmap::{decode, project, select, Query, Selection};
//!
//! let records = decode(&std::fs::read_to_string("jobs.csv")?);
//! match select(&records, &Query::default()) {
//!     Selection::Matched(aggregate) => {
//!         println!("{}", project(&aggregate).to_figure());
//!     }
//!     Selection::Empty => println!("{}", workmap::NO_DATA_MESSAGE),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (Record, Query, Aggregate, Dataset)
//! - [`decoder`] - Naive delimited-text decoding with encoding detection
//! - [`engine`] - Filtering, ranking and aggregation
//! - [`projector`] - Chart input arrays and the figure document
//! - [`store`] - Observable dataset store
//! - [`loader`] - Async fetch with embedded fallback
//! - [`export`] - Fixed-column CSV export
//! - [`logs`] - Leveled status logging

// Core modules
pub mod error;
pub mod models;

// Decoding
pub mod decoder;

// Filtering and aggregation
pub mod engine;

// Chart projection
pub mod projector;

// Dataset store
pub mod store;

// Loading
pub mod loader;

// Export
pub mod export;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    DecodeError, DecodeResult, ExportError, ExportResult, FetchError, FetchResult, WorkmapError,
    WorkmapResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Aggregate, ColorScheme, Dataset, Limit, Metadata, Parameter, Query, Record, RegionType,
    WILDCARD,
};

// =============================================================================
// Re-exports - Decoding
// =============================================================================

pub use decoder::{decode, decode_bytes, decode_file, decode_content, detect_encoding};

// =============================================================================
// Re-exports - Engine
// =============================================================================

pub use engine::{rank, select, Selection, TOP_N};

// =============================================================================
// Re-exports - Projector
// =============================================================================

pub use projector::{
    color_bar_title, color_scale, project, TreemapInput, NO_DATA_MESSAGE, NO_PARENT, ROOT_LABEL,
};

// =============================================================================
// Re-exports - Store
// =============================================================================

pub use store::{DataStore, Subscription};

// =============================================================================
// Re-exports - Loader
// =============================================================================

pub use loader::{
    fallback_dataset, fallback_records, fetch_records, load, load_file, DATA_URL_ENV,
    DEFAULT_DATA_URL, FALLBACK_DATA_SOURCE,
};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use export::{export_csv, export_to_file, EXPORT_COLUMNS};
