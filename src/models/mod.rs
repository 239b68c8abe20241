//! Domain models for the workmap chart pipeline.
//!
//! This module contains the core data structures used throughout the
//! pipeline:
//!
//! - [`Record`] - one decoded occupation/region/year observation
//! - [`Query`] - the user-selected filter and display dimensions
//! - [`Aggregate`] - root-plus-children summary produced for one query
//! - [`Metadata`] - available filter options derived from a record set
//! - [`Dataset`] - records plus metadata, the unit the store holds
//!
//! Dimension values are typed enums with lenient label parsing: an
//! unrecognized label falls back to the scheme's default instead of
//! failing, mirroring the coerce-don't-fail policy of the decoder.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sentinel filter value meaning "no constraint on this dimension".
pub const WILDCARD: &str = "all";

// =============================================================================
// Region Type
// =============================================================================

/// Geographic level of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RegionType {
    /// Nationwide aggregate.
    #[default]
    National,
    /// Single US state.
    State,
    /// Metropolitan statistical area.
    Metropolitan,
}

impl RegionType {
    /// Parse a region-type label. Matching is case-insensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "national" => Some(Self::National),
            "state" => Some(Self::State),
            "metropolitan" => Some(Self::Metropolitan),
            _ => None,
        }
    }

    /// Parse a label, falling back to [`RegionType::National`] when
    /// unrecognized.
    pub fn from_label_lenient(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }

    /// Canonical label as it appears in the source data.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::National => "National",
            Self::State => "State",
            Self::Metropolitan => "Metropolitan",
        }
    }
}

// =============================================================================
// Sizing Parameter
// =============================================================================

/// The metric that sizes treemap nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    /// Total employment.
    #[default]
    Employment,
    /// GDP contribution.
    Gdp,
}

impl Parameter {
    /// Parse a parameter label, falling back to employment when
    /// unrecognized.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "gdp" => Self::Gdp,
            _ => Self::Employment,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Employment => "employment",
            Self::Gdp => "gdp",
        }
    }

    /// Human-readable name for chart titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Employment => "Employment",
            Self::Gdp => "GDP",
        }
    }

    /// The sized metric of a record under this parameter.
    pub fn value_of(&self, record: &Record) -> f64 {
        match self {
            Self::Employment => record.employment,
            Self::Gdp => record.gdp,
        }
    }
}

// =============================================================================
// Color Scheme
// =============================================================================

/// The metric that colors treemap nodes, independent of the sizing
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Occupational complexity score.
    #[default]
    Complexity,
    /// Total employment.
    Employment,
    /// Mean annual wage.
    Wage,
}

impl ColorScheme {
    /// Parse a color-scheme label, falling back to complexity when
    /// unrecognized.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "employment" => Self::Employment,
            "wage" => Self::Wage,
            _ => Self::Complexity,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Complexity => "complexity",
            Self::Employment => "employment",
            Self::Wage => "wage",
        }
    }

    /// Human-readable name for label annotations.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Complexity => "Complexity",
            Self::Employment => "Employment",
            Self::Wage => "Wage",
        }
    }

    /// The color metric of a record under this scheme.
    pub fn value_of(&self, record: &Record) -> f64 {
        match self {
            Self::Complexity => record.complexity_score,
            Self::Employment => record.employment,
            Self::Wage => record.mean_wage,
        }
    }
}

// =============================================================================
// Limit
// =============================================================================

/// Truncation policy applied before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Limit {
    /// Keep every matched record.
    #[default]
    All,
    /// Keep the 50 largest records by the sizing parameter.
    Top50,
}

impl Limit {
    /// Parse a limit label, falling back to [`Limit::All`] when
    /// unrecognized.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "top50" => Self::Top50,
            _ => Self::All,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Top50 => "top50",
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// One decoded occupation/region/year observation.
///
/// Immutable once decoded. All coercion happens at the decode boundary:
/// numeric fields are never NaN or negative, and an unrecognized region
/// type has already fallen back to [`RegionType::National`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Observation year.
    pub year: i32,
    /// Geographic level.
    pub region_type: RegionType,
    /// Region name ("United States", "California", ...).
    pub region: String,
    /// SOC occupation code.
    pub code: String,
    /// Occupation title.
    pub title: String,
    /// SOC major group name.
    pub group_name: String,
    /// Total employment.
    pub employment: f64,
    /// Mean annual wage in dollars.
    pub mean_wage: f64,
    /// GDP contribution in dollars.
    pub gdp: f64,
    /// Occupational complexity score in [0, 1].
    pub complexity_score: f64,
}

// =============================================================================
// Query
// =============================================================================

/// The user-selected filter and display dimensions for one chart.
///
/// `None` on a filterable dimension is the wildcard: that dimension
/// constrains nothing. The string sentinel [`WILDCARD`] (or an empty
/// string) parses to `None` uniformly on every filterable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub year: Option<i32>,
    pub region_type: Option<RegionType>,
    pub region: Option<String>,
    pub parameter: Parameter,
    pub color_scheme: ColorScheme,
    pub limit: Limit,
}

impl Default for Query {
    /// The initial page state: 2024 national data, sized by employment,
    /// colored by complexity, truncated to the top 50.
    fn default() -> Self {
        Self {
            year: Some(2024),
            region_type: Some(RegionType::National),
            region: Some("United States".to_string()),
            parameter: Parameter::Employment,
            color_scheme: ColorScheme::Complexity,
            limit: Limit::Top50,
        }
    }
}

impl Query {
    /// Exact-match conjunction over all constrained dimensions.
    pub fn matches(&self, record: &Record) -> bool {
        self.year.map_or(true, |y| record.year == y)
            && self.region_type.map_or(true, |t| record.region_type == t)
            && self
                .region
                .as_deref()
                .map_or(true, |r| record.region == r)
    }

    /// Parse a year filter. The wildcard sentinel, an empty string or
    /// unparsable text all mean "no constraint".
    pub fn year_filter(label: &str) -> Option<i32> {
        if is_wildcard(label) {
            return None;
        }
        label.trim().parse().ok()
    }

    /// Parse a region-type filter.
    pub fn region_type_filter(label: &str) -> Option<RegionType> {
        if is_wildcard(label) {
            return None;
        }
        Some(RegionType::from_label_lenient(label))
    }

    /// Parse a region filter.
    pub fn region_filter(label: &str) -> Option<String> {
        if is_wildcard(label) {
            return None;
        }
        Some(label.trim().to_string())
    }
}

fn is_wildcard(label: &str) -> bool {
    let trimmed = label.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(WILDCARD)
}

// =============================================================================
// Aggregate
// =============================================================================

/// Root-plus-children numeric summary produced for one query.
///
/// Invariants: `root_value` equals the sum of the sizing parameter over
/// `children`, and `children` holds at most 50 records under
/// [`Limit::Top50`].
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// The query that produced this aggregate.
    pub query: Query,
    /// Sum of the sizing parameter over `children`.
    pub root_value: f64,
    /// Matched records after ranking and truncation, in render order.
    pub children: Vec<Record>,
}

// =============================================================================
// Metadata
// =============================================================================

/// Available filter options, derived from a record sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Observation years present in the data, ascending.
    pub years: Vec<i32>,
    /// Region-type labels present in the data, sorted.
    pub region_types: Vec<String>,
    /// Region names per region type, sorted.
    pub regions: BTreeMap<String, Vec<String>>,
    /// Sizing parameter labels.
    pub parameters: Vec<String>,
    /// Color scheme labels.
    pub color_schemes: Vec<String>,
    /// Limit labels.
    pub limits: Vec<String>,
}

impl Metadata {
    /// Derive dropdown metadata from a record sequence. Dimension values
    /// come from the data; parameter, color-scheme and limit options are
    /// the fixed lists.
    pub fn from_records(records: &[Record]) -> Self {
        let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
        let region_types: BTreeSet<&'static str> =
            records.iter().map(|r| r.region_type.as_label()).collect();

        let mut regions: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for record in records {
            regions
                .entry(record.region_type.as_label().to_string())
                .or_default()
                .insert(record.region.clone());
        }

        Self {
            years: years.into_iter().collect(),
            region_types: region_types.into_iter().map(String::from).collect(),
            regions: regions
                .into_iter()
                .map(|(k, v)| (k, v.into_iter().collect()))
                .collect(),
            parameters: vec![
                Parameter::Employment.as_label().to_string(),
                Parameter::Gdp.as_label().to_string(),
            ],
            color_schemes: vec![
                ColorScheme::Complexity.as_label().to_string(),
                ColorScheme::Employment.as_label().to_string(),
                ColorScheme::Wage.as_label().to_string(),
            ],
            limits: vec![
                Limit::All.as_label().to_string(),
                Limit::Top50.as_label().to_string(),
            ],
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// A record sequence plus its metadata, the unit the store holds and the
/// loader produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Decoded records, read-only after load.
    pub records: Vec<Record>,
    /// Filter options derived from the records.
    pub metadata: Metadata,
    /// Where the records came from.
    pub data_source: String,
    /// `YYYY-MM-DD` date of the last load or swap.
    pub last_updated: String,
}

impl Dataset {
    /// Build a dataset from freshly decoded records, deriving metadata and
    /// stamping today's date.
    pub fn new(records: Vec<Record>, data_source: impl Into<String>) -> Self {
        let metadata = Metadata::from_records(&records);
        Self {
            records,
            metadata,
            data_source: data_source.into(),
            last_updated: today(),
        }
    }
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

// =============================================================================
// Tests
// =============================================================================
