//! The `list_series` tool: browse the series catalog.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::data::SeriesProvider;
use crate::validate::{validate_limit, MAX_LIMIT};

use super::{Outcome, Tool};

const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
struct ListSeriesArgs {
    #[serde(default)]
    category: Option<String>,
    #[serde(default = "default_limit")]
    limit: usize,
}

const fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// Lists catalog entries with optional category filtering.
pub struct ListSeriesTool {
    provider: Arc<dyn SeriesProvider>,
}

impl ListSeriesTool {
    /// Creates the tool over a shared provider.
    #[must_use]
    pub fn new(provider: Arc<dyn SeriesProvider>) -> Self {
        Self { provider }
    }
}

impl Tool for ListSeriesTool {
    fn name(&self) -> &'static str {
        "list_series"
    }

    fn description(&self) -> &'static str {
        "List available data series with optional category filtering. \
         Returns series metadata including titles, IDs, and categories."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Filter by category (e.g., 'CPI', 'Employment'). Optional."
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results to return (default: 50)"
                }
            }
        })
    }

    fn execute(&self, arguments: &Value) -> Outcome {
        debug!(?arguments, "executing list_series");

        let args: ListSeriesArgs = match serde_json::from_value(arguments.clone()) {
            Ok(args) => args,
            Err(e) => return Outcome::failure(format!("Invalid arguments: {e}")),
        };

        if let Err(reason) = validate_limit(args.limit, MAX_LIMIT) {
            return Outcome::failure(reason);
        }

        let series = self.provider.list_series(args.category.as_deref(), args.limit);
        let count = series.len();
        info!(count, "listed series");

        Outcome::Success(json!({
            "series": series,
            "count": count,
            "category_filter": args.category,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FixtureProvider;

    fn tool() -> ListSeriesTool {
        ListSeriesTool::new(Arc::new(FixtureProvider::new()))
    }

    #[test]
    fn limit_truncates_results() {
        let Outcome::Success(payload) = tool().execute(&json!({"limit": 2})) else {
            panic!("expected success");
        };
        let series = payload["series"].as_array().unwrap();
        assert!(series.len() <= 2);
        assert_eq!(payload["count"].as_u64().unwrap() as usize, series.len());
    }

    #[test]
    fn category_filter_is_echoed() {
        let Outcome::Success(payload) = tool().execute(&json!({"category": "Employment"})) else {
            panic!("expected success");
        };
        assert_eq!(payload["category_filter"], "Employment");
        let series = payload["series"].as_array().unwrap();
        assert!(series.iter().all(|s| s["category"] == "Employment"));
    }

    #[test]
    fn no_filter_echoes_null() {
        let Outcome::Success(payload) = tool().execute(&json!({})) else {
            panic!("expected success");
        };
        assert!(payload["category_filter"].is_null());
    }

    #[test]
    fn zero_limit_is_failure() {
        assert!(tool().execute(&json!({"limit": 0})).is_failure());
    }

    #[test]
    fn oversized_limit_is_failure() {
        assert!(tool().execute(&json!({"limit": 1001})).is_failure());
    }
}
