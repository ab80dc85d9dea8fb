//! The `plot_series` tool: render a series as a line or bar chart.
//!
//! Compiled in only with the `plot` cargo feature. Minimal deployments drop
//! the feature and the tool simply never enters the registry.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::chart::{self, ChartKind};
use crate::data::{SeriesPoint, SeriesProvider};
use crate::validate::{validate_series_id, validate_year_range};

use super::{Outcome, Tool};

#[derive(Debug, Deserialize)]
struct PlotSeriesArgs {
    series_id: String,
    #[serde(default)]
    start_year: Option<i32>,
    #[serde(default)]
    end_year: Option<i32>,
    #[serde(default = "default_chart_type")]
    chart_type: String,
}

fn default_chart_type() -> String {
    "line".to_string()
}

/// One observation prepared for plotting.
#[derive(Debug)]
struct PlotPoint {
    year: i32,
    /// Numeric position within the year, derived from the period code.
    ordinal: u32,
    label: String,
    value: f64,
}

/// Renders a series as a base64-encoded PNG chart.
pub struct PlotSeriesTool {
    provider: Arc<dyn SeriesProvider>,
}

impl PlotSeriesTool {
    /// Creates the tool over a shared provider.
    #[must_use]
    pub fn new(provider: Arc<dyn SeriesProvider>) -> Self {
        Self { provider }
    }
}

/// Extracts the numeric part of a period code (`M01` -> 1, `M12` -> 12).
///
/// Comparing these as integers, not as raw strings, keeps mixed-width
/// labels in calendar order (`M2` must sort before `M12`).
fn period_ordinal(period: &str) -> u32 {
    period
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .unwrap_or(0)
}

fn prepare_points(points: &[SeriesPoint]) -> Result<Vec<PlotPoint>, String> {
    let mut prepared = Vec::with_capacity(points.len());

    for point in points {
        let ordinal = period_ordinal(&point.period);
        let value: f64 = point.value.parse().map_err(|_| {
            format!(
                "Invalid numeric value '{}' at {}-{}",
                point.value, point.year, point.period
            )
        })?;
        prepared.push(PlotPoint {
            year: point.year,
            ordinal,
            label: format!("{}-{:02}", point.year, ordinal),
            value,
        });
    }

    // Upstream delivers newest-first; charts read oldest-first.
    prepared.sort_by_key(|p| (p.year, p.ordinal));
    Ok(prepared)
}

impl Tool for PlotSeriesTool {
    fn name(&self) -> &'static str {
        "plot_series"
    }

    fn description(&self) -> &'static str {
        "Create a simple static plot (line or bar chart) of a data series. \
         Returns a base64-encoded PNG image that can be displayed. Useful \
         for visualizing trends, comparing time periods, or identifying \
         patterns in the data."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "series_id": {
                    "type": "string",
                    "description": "Series ID to plot (e.g., 'CUUR0000SA0')"
                },
                "start_year": {
                    "type": "integer",
                    "description": "Start year for data range (optional)"
                },
                "end_year": {
                    "type": "integer",
                    "description": "End year for data range (optional)"
                },
                "chart_type": {
                    "type": "string",
                    "enum": ["line", "bar"],
                    "description": "Type of chart to create: 'line' or 'bar' (default: 'line')"
                }
            },
            "required": ["series_id"]
        })
    }

    #[allow(clippy::too_many_lines)]
    fn execute(&self, arguments: &Value) -> Outcome {
        debug!(?arguments, "executing plot_series");

        let args: PlotSeriesArgs = match serde_json::from_value(arguments.clone()) {
            Ok(args) => args,
            Err(e) => return Outcome::failure(format!("Invalid arguments: {e}")),
        };

        if !validate_series_id(&args.series_id) {
            return Outcome::failure(format!("Invalid series ID format: {}", args.series_id));
        }

        if let Err(reason) = validate_year_range(args.start_year, args.end_year) {
            return Outcome::failure(reason);
        }

        let kind = match ChartKind::parse(&args.chart_type) {
            Ok(kind) => kind,
            Err(reason) => return Outcome::failure(reason),
        };

        let (points, metadata) = match self
            .provider
            .get_series(&args.series_id, args.start_year, args.end_year)
        {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(series_id = %args.series_id, error = %e, "series lookup failed");
                return Outcome::failure(e.to_string());
            }
        };

        if points.is_empty() {
            return Outcome::failure("No data points available for the specified range");
        }

        let prepared = match prepare_points(&points) {
            Ok(prepared) => prepared,
            Err(reason) => return Outcome::failure(reason),
        };

        let values: Vec<f64> = prepared.iter().map(|p| p.value).collect();
        let image = match chart::render(&values, kind) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(series_id = %args.series_id, error = %e, "chart rendering failed");
                return Outcome::failure(format!("Failed to render chart: {e}"));
            }
        };

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        #[allow(clippy::cast_precision_loss)] // point counts are tiny
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        let title = metadata.map_or_else(|| args.series_id.clone(), |m| m.series_title);

        info!(
            series_id = %args.series_id,
            chart_type = kind.as_str(),
            points = prepared.len(),
            "rendered chart"
        );

        Outcome::Success(json!({
            "status": "success",
            "series_id": args.series_id,
            "title": title,
            "chart_type": kind.as_str(),
            "data_points": prepared.len(),
            "date_range": {
                "start": prepared.first().map(|p| p.label.clone()),
                "end": prepared.last().map(|p| p.label.clone()),
            },
            "value_range": {
                "min": min,
                "max": max,
                "mean": mean,
            },
            "image": {
                "format": "png",
                "encoding": "base64",
                "data": BASE64_STANDARD.encode(&image),
            },
        }))
    }
}
