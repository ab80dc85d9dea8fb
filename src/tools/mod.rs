//! Tool registry and the shared tool contract.
//!
//! A tool is a named, independently invokable operation with a declared
//! input schema. Every tool follows the same execution protocol: parse the
//! raw arguments against the schema, run the domain validators in a fixed
//! order, call the data provider, and shape the payload. All of those steps
//! report failure as an [`Outcome::Failure`]; nothing escapes a tool as a
//! panic or a protocol-level error.

mod get_series;
mod get_series_info;
mod list_series;
#[cfg(feature = "plot")]
mod plot_series;

pub use get_series::GetSeriesTool;
pub use get_series_info::GetSeriesInfoTool;
pub use list_series::ListSeriesTool;
#[cfg(feature = "plot")]
pub use plot_series::PlotSeriesTool;

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::data::SeriesProvider;

/// The result of running a tool: a domain-level success or failure.
///
/// A `Failure` is *not* a protocol fault. The dispatcher delivers it inside
/// a normal response whose payload carries an `error` field; protocol-level
/// errors are reserved for routing problems and unexpected faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operation ran and produced a payload.
    Success(Value),
    /// The operation was refused or failed for a domain reason.
    Failure(String),
}

impl Outcome {
    /// Shorthand for a failure outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// Converts the outcome into the payload delivered to the client.
    ///
    /// Failures become `{"error": message}`.
    #[must_use]
    pub fn into_payload(self) -> Value {
        match self {
            Self::Success(payload) => payload,
            Self::Failure(message) => json!({ "error": message }),
        }
    }

    /// True for the `Failure` variant.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// A named, schema-declaring, invokable operation.
pub trait Tool: Send + Sync {
    /// Unique tool name, used as the registry key.
    fn name(&self) -> &'static str;

    /// Human-readable description for `tools/list`.
    fn description(&self) -> &'static str;

    /// JSON Schema for the tool's input parameters.
    fn input_schema(&self) -> Value;

    /// Runs the tool against raw arguments.
    ///
    /// Must never panic on malformed input; structural and domain problems
    /// are returned as [`Outcome::Failure`].
    fn execute(&self, arguments: &Value) -> Outcome;
}

/// Wire-shape descriptor of a tool, as returned by `tools/list`.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Unique tool name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// Read-only, insertion-ordered collection of tools.
///
/// Built once at server construction; tool availability is a deployment-time
/// decision, so there is no registration after startup and no removal.
#[derive(Default)]
pub struct Registry {
    tools: IndexMap<&'static str, Arc<dyn Tool>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tool. Registration order is the order `list` reports.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name(), tool);
    }

    /// Looks a tool up by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Returns descriptors for every registered tool, in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools
            .values()
            .map(|tool| ToolDescriptor {
                name: tool.name(),
                description: tool.description(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Names of all registered tools, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.keys().copied().collect()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// True when no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Builds the standard registry over a shared provider.
///
/// The `plot_series` tool is present only when the crate is compiled with
/// the `plot` feature.
#[must_use]
pub fn build_registry(provider: Arc<dyn SeriesProvider>) -> Registry {
    let mut registry = Registry::new();
    registry.register(Arc::new(GetSeriesTool::new(Arc::clone(&provider))));
    registry.register(Arc::new(ListSeriesTool::new(Arc::clone(&provider))));
    registry.register(Arc::new(GetSeriesInfoTool::new(Arc::clone(&provider))));
    #[cfg(feature = "plot")]
    registry.register(Arc::new(PlotSeriesTool::new(provider)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FixtureProvider;

    #[test]
    fn registry_preserves_registration_order() {
        let registry = build_registry(Arc::new(FixtureProvider::new()));
        let names = registry.names();

        assert_eq!(names[..3], ["get_series", "list_series", "get_series_info"]);
        #[cfg(feature = "plot")]
        assert_eq!(names[3], "plot_series");
    }

    #[test]
    fn lookup_misses_unregistered_names() {
        let registry = build_registry(Arc::new(FixtureProvider::new()));
        assert!(registry.lookup("get_series").is_some());
        assert!(registry.lookup("drop_tables").is_none());
    }

    #[test]
    fn descriptors_carry_schemas() {
        let registry = build_registry(Arc::new(FixtureProvider::new()));
        for descriptor in registry.list() {
            assert!(!descriptor.name.is_empty());
            assert!(!descriptor.description.is_empty());
            assert_eq!(descriptor.input_schema["type"], "object");
        }
    }

    #[test]
    fn failure_payload_shape() {
        let payload = Outcome::failure("boom").into_payload();
        assert_eq!(payload, serde_json::json!({"error": "boom"}));
    }
}
