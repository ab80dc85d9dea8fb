//! The `get_series_info` tool: catalog metadata for one series.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::data::SeriesProvider;
use crate::validate::validate_series_id;

use super::{Outcome, Tool};

#[derive(Debug, Deserialize)]
struct GetSeriesInfoArgs {
    series_id: String,
}

/// Returns catalog metadata plus data availability for a series.
pub struct GetSeriesInfoTool {
    provider: Arc<dyn SeriesProvider>,
}

impl GetSeriesInfoTool {
    /// Creates the tool over a shared provider.
    #[must_use]
    pub fn new(provider: Arc<dyn SeriesProvider>) -> Self {
        Self { provider }
    }
}

impl Tool for GetSeriesInfoTool {
    fn name(&self) -> &'static str {
        "get_series_info"
    }

    fn description(&self) -> &'static str {
        "Get detailed metadata information about a specific data series. \
         Returns series title, category, coverage, and data availability."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "series_id": {
                    "type": "string",
                    "description": "Series ID (e.g., 'CUUR0000SA0')"
                }
            },
            "required": ["series_id"]
        })
    }

    fn execute(&self, arguments: &Value) -> Outcome {
        debug!(?arguments, "executing get_series_info");

        let args: GetSeriesInfoArgs = match serde_json::from_value(arguments.clone()) {
            Ok(args) => args,
            Err(e) => return Outcome::failure(format!("Invalid arguments: {e}")),
        };

        if !validate_series_id(&args.series_id) {
            return Outcome::failure(format!("Invalid series ID format: {}", args.series_id));
        }

        match self.provider.series_info(&args.series_id) {
            Ok(info) => {
                info!(series_id = %args.series_id, "retrieved series info");
                Outcome::Success(json!(info))
            }
            Err(e) => {
                warn!(series_id = %args.series_id, error = %e, "series info lookup failed");
                Outcome::failure(e.to_string())
            }
        }
    }
}
