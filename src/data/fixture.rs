//! Fixture-backed series provider.
//!
//! Serves a small, embedded snapshot of consumer-price and employment
//! series. The fixtures are compiled into the binary and parsed lazily on
//! first access; the parsed form is immutable, so concurrent first readers
//! may race to populate it without harm.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;

use super::{CatalogEntry, ProviderError, SeriesInfo, SeriesPoint, SeriesProvider};

const CATALOG_JSON: &str = include_str!("fixtures/catalog.json");
const HISTORY_JSON: &str = include_str!("fixtures/history.json");

#[derive(Debug, Deserialize)]
struct Catalog {
    series: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct SeriesHistory {
    data: Vec<SeriesPoint>,
}

/// Provides embedded fixture data for development and testing.
#[derive(Debug, Default)]
pub struct FixtureProvider {
    catalog: OnceLock<Catalog>,
    history: OnceLock<HashMap<String, SeriesHistory>>,
}

impl FixtureProvider {
    /// Creates a provider; fixture parsing is deferred to first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn catalog(&self) -> &Catalog {
        self.catalog
            .get_or_init(|| serde_json::from_str(CATALOG_JSON).expect("embedded catalog is valid JSON"))
    }

    fn history(&self) -> &HashMap<String, SeriesHistory> {
        self.history
            .get_or_init(|| serde_json::from_str(HISTORY_JSON).expect("embedded history is valid JSON"))
    }

    fn catalog_entry(&self, series_id: &str) -> Option<&CatalogEntry> {
        self.catalog()
            .series
            .iter()
            .find(|entry| entry.series_id == series_id)
    }
}

impl SeriesProvider for FixtureProvider {
    fn get_series(
        &self,
        series_id: &str,
        start_year: Option<i32>,
        end_year: Option<i32>,
    ) -> Result<(Vec<SeriesPoint>, Option<CatalogEntry>), ProviderError> {
        let history = self
            .history()
            .get(series_id)
            .ok_or_else(|| ProviderError::NotFound {
                series_id: series_id.to_string(),
            })?;

        let points: Vec<SeriesPoint> = history
            .data
            .iter()
            .filter(|point| {
                start_year.is_none_or(|start| point.year >= start)
                    && end_year.is_none_or(|end| point.year <= end)
            })
            .cloned()
            .collect();

        Ok((points, self.catalog_entry(series_id).cloned()))
    }

    fn list_series(&self, category: Option<&str>, limit: usize) -> Vec<CatalogEntry> {
        self.catalog()
            .series
            .iter()
            .filter(|entry| {
                category.is_none_or(|wanted| entry.category.eq_ignore_ascii_case(wanted))
            })
            .take(limit)
            .cloned()
            .collect()
    }

    fn series_info(&self, series_id: &str) -> Result<SeriesInfo, ProviderError> {
        let entry = self
            .catalog_entry(series_id)
            .ok_or_else(|| ProviderError::NotFound {
                series_id: series_id.to_string(),
            })?;

        let data_point_count = self
            .history()
            .get(series_id)
            .map_or(0, |history| history.data.len());

        Ok(SeriesInfo {
            entry: entry.clone(),
            data_point_count,
            available_data: data_point_count > 0,
        })
    }

    fn search_series(&self, query: &str, limit: usize) -> Vec<CatalogEntry> {
        let query = query.to_lowercase();

        self.catalog()
            .series
            .iter()
            .filter(|entry| {
                entry.series_title.to_lowercase().contains(&query)
                    || entry.item.to_lowercase().contains(&query)
            })
            .take(limit)
            .cloned()
            .collect()
    }
}
