//! Series data access.
//!
//! The [`SeriesProvider`] trait is the seam between the tool layer and
//! whatever actually stores series data. Tools hold a shared provider and
//! never see its internals; provider failures cross the boundary as
//! [`ProviderError`] values, never as panics.
//!
//! The only backing shipped with this crate is the fixture-backed
//! [`FixtureProvider`]. A real statistics API client would implement the
//! same trait.

mod fixture;

pub use fixture::FixtureProvider;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog metadata for a single series.
///
/// The catalog describes what a series *is* (title, category, coverage);
/// its time-series values live separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique series identifier (e.g. `CUUR0000SA0`).
    pub series_id: String,
    /// Human-readable series title.
    pub series_title: String,
    /// Category the series belongs to (e.g. `CPI`, `Employment`).
    pub category: String,
    /// The measured item.
    pub item: String,
    /// Geographic coverage.
    pub area: String,
    /// Seasonal adjustment note.
    pub seasonality: String,
}

/// A single observation in a series.
///
/// Values are carried as strings, matching the upstream wire format; callers
/// that need a number must parse and handle failure explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Observation year.
    pub year: i32,
    /// Sub-year period code (e.g. `M01` for January).
    pub period: String,
    /// Human-readable period name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_name: Option<String>,
    /// Observation value, as reported.
    pub value: String,
}

/// Catalog entry enriched with data availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesInfo {
    /// The catalog entry for the series.
    #[serde(flatten)]
    pub entry: CatalogEntry,
    /// Number of stored observations.
    pub data_point_count: usize,
    /// Whether any time-series rows exist for the id.
    pub available_data: bool,
}

/// Errors reported by a series provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested series has no data.
    #[error("Series '{series_id}' not found")]
    NotFound {
        /// The identifier that was looked up.
        series_id: String,
    },
}

/// Capability for series lookup, listing and search.
///
/// Implementations must tolerate concurrent reads; the tool layer shares a
/// single provider across all requests.
pub trait SeriesProvider: Send + Sync {
    /// Returns the observations for a series, optionally filtered to an
    /// inclusive year range, together with its catalog entry if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] if the id has no time-series rows.
    fn get_series(
        &self,
        series_id: &str,
        start_year: Option<i32>,
        end_year: Option<i32>,
    ) -> Result<(Vec<SeriesPoint>, Option<CatalogEntry>), ProviderError>;

    /// Lists catalog entries, optionally filtered by category
    /// (case-insensitive exact match), truncated to `limit`.
    fn list_series(&self, category: Option<&str>, limit: usize) -> Vec<CatalogEntry>;

    /// Returns catalog metadata plus data availability for a series.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] if the catalog has no such entry.
    fn series_info(&self, series_id: &str) -> Result<SeriesInfo, ProviderError>;

    /// Searches catalog entries by title or item, case-insensitive substring
    /// match, truncated to `limit`.
    fn search_series(&self, query: &str, limit: usize) -> Vec<CatalogEntry>;
}
