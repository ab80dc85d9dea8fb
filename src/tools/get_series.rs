//! The `get_series` tool: fetch observations for one series.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::data::SeriesProvider;
use crate::validate::{validate_series_id, validate_year_range};

use super::{Outcome, Tool};

#[derive(Debug, Deserialize)]
struct GetSeriesArgs {
    series_id: String,
    #[serde(default)]
    start_year: Option<i32>,
    #[serde(default)]
    end_year: Option<i32>,
}

/// Fetches a series by id with optional year-range filtering.
pub struct GetSeriesTool {
    provider: Arc<dyn SeriesProvider>,
}

impl GetSeriesTool {
    /// Creates the tool over a shared provider.
    #[must_use]
    pub fn new(provider: Arc<dyn SeriesProvider>) -> Self {
        Self { provider }
    }
}

impl Tool for GetSeriesTool {
    fn name(&self) -> &'static str {
        "get_series"
    }

    fn description(&self) -> &'static str {
        "Fetch a data series by ID with optional date range filtering. \
         Returns time series data points with values, periods, and metadata."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "series_id": {
                    "type": "string",
                    "description": "Series ID (e.g., 'CUUR0000SA0' for CPI All Items)"
                },
                "start_year": {
                    "type": "integer",
                    "description": "Start year for data range (optional)"
                },
                "end_year": {
                    "type": "integer",
                    "description": "End year for data range (optional)"
                }
            },
            "required": ["series_id"]
        })
    }

    fn execute(&self, arguments: &Value) -> Outcome {
        debug!(?arguments, "executing get_series");

        let args: GetSeriesArgs = match serde_json::from_value(arguments.clone()) {
            Ok(args) => args,
            Err(e) => return Outcome::failure(format!("Invalid arguments: {e}")),
        };

        if !validate_series_id(&args.series_id) {
            return Outcome::failure(format!("Invalid series ID format: {}", args.series_id));
        }

        if let Err(reason) = validate_year_range(args.start_year, args.end_year) {
            return Outcome::failure(reason);
        }

        match self
            .provider
            .get_series(&args.series_id, args.start_year, args.end_year)
        {
            Ok((points, metadata)) => {
                info!(
                    series_id = %args.series_id,
                    count = points.len(),
                    "fetched series data"
                );
                Outcome::Success(json!({
                    "series_id": args.series_id,
                    "count": points.len(),
                    "data": points,
                    "metadata": metadata.map_or_else(|| json!({}), |m| json!(m)),
                }))
            }
            Err(e) => {
                warn!(series_id = %args.series_id, error = %e, "series lookup failed");
                Outcome::failure(e.to_string())
            }
        }
    }
}
