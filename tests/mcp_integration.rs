//! Integration tests for MCP protocol handling.
//!
//! These tests verify the JSON-RPC 2.0 protocol implementation end to end:
//! parsing a raw envelope, dispatching it, and checking the shape of the
//! response — including the two-tier error contract (protocol-level errors
//! for routing failures, payload-level errors for tool failures).

use std::sync::Arc;

use serde_json::Value;

use series_mcp::data::FixtureProvider;
use series_mcp::mcp::dispatch::Dispatcher;
use series_mcp::mcp::protocol::{parse_message, IncomingMessage, RequestId};
use series_mcp::tools::build_registry;

fn dispatcher() -> Dispatcher {
    Dispatcher::new(build_registry(Arc::new(FixtureProvider::new())))
}

/// Parses a raw line, dispatches it, and returns the serialised response.
fn round_trip(dispatcher: &Dispatcher, raw: &str) -> Value {
    let message = parse_message(raw).expect("request should parse");
    let IncomingMessage::Request(req) = message else {
        panic!("Expected Request");
    };

    match dispatcher.dispatch(&req) {
        Ok(response) => serde_json::to_value(response).unwrap(),
        Err(error) => serde_json::to_value(error).unwrap(),
    }
}

// =============================================================================
// Protocol Parsing Tests
// =============================================================================

#[test]
fn test_parse_initialize_request() {
    let json = r#"{
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {
                "name": "test-client",
                "version": "1.0.0"
            }
        }
    }"#;

    let result = parse_message(json);
    assert!(result.is_ok());

    if let IncomingMessage::Request(req) = result.unwrap() {
        assert_eq!(req.method, "initialize");
        assert_eq!(req.id, RequestId::Number(1));
    } else {
        panic!("Expected Request");
    }
}

#[test]
fn test_parse_notification() {
    let json = r#"{
        "jsonrpc": "2.0",
        "method": "notifications/initialized"
    }"#;

    let result = parse_message(json);
    assert!(result.is_ok());

    if let IncomingMessage::Notification(notif) = result.unwrap() {
        assert_eq!(notif.method, "notifications/initialized");
    } else {
        panic!("Expected Notification");
    }
}

#[test]
fn test_parse_invalid_json() {
    let result = parse_message("not valid json");
    assert!(result.is_err());
}

#[test]
fn test_parse_missing_jsonrpc_version() {
    let json = r#"{
        "id": 1,
        "method": "test"
    }"#;

    let result = parse_message(json);
    assert!(result.is_err());
}

// =============================================================================
// End-to-End Dispatch Tests
// =============================================================================

#[test]
fn test_initialize_round_trip() {
    let response = round_trip(
        &dispatcher(),
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{}}}"#,
    );

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(response["result"]["serverInfo"]["name"], "series-mcp");
    assert!(response.get("error").is_none());
}

#[test]
fn test_tools_list_round_trip() {
    let response = round_trip(
        &dispatcher(),
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list","params":{}}"#,
    );

    let tools = response["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names[..3], ["get_series", "list_series", "get_series_info"]);

    for tool in tools {
        assert!(tool["description"].as_str().unwrap().len() > 10);
        assert_eq!(tool["inputSchema"]["type"], "object");
    }
}

#[test]
fn test_tools_list_order_is_stable_across_calls() {
    let dispatcher = dispatcher();
    let first = round_trip(
        &dispatcher,
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
    );
    let second = round_trip(
        &dispatcher,
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
    );
    assert_eq!(first["result"], second["result"]);
}

#[test]
fn test_unknown_method_is_protocol_error() {
    let response = round_trip(
        &dispatcher(),
        r#"{"jsonrpc":"2.0","id":3,"method":"prompts/list"}"#,
    );

    assert_eq!(response["error"]["code"], -32601);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("prompts/list"));
    assert!(response.get("result").is_none());
}

#[test]
fn test_unknown_tool_is_protocol_error() {
    let response = round_trip(
        &dispatcher(),
        r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"delete_everything","arguments":{}}}"#,
    );

    assert_eq!(response["error"]["code"], -32601);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("delete_everything"));
}

#[test]
fn test_tool_failure_stays_inside_result() {
    // A bad series id is a domain problem, not a routing problem: the
    // envelope must be a success whose payload carries an error field.
    let response = round_trip(
        &dispatcher(),
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"get_series","arguments":{"series_id":"NOPE"}}}"#,
    );

    assert!(response.get("error").is_none());
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    let payload: Value = serde_json::from_str(text).unwrap();
    assert!(payload["error"]
        .as_str()
        .unwrap()
        .contains("Invalid series ID"));
}

#[test]
fn test_tool_success_round_trip() {
    let response = round_trip(
        &dispatcher(),
        r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"get_series","arguments":{"series_id":"CUUR0000SA0","start_year":2023,"end_year":2024}}}"#,
    );

    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    let payload: Value = serde_json::from_str(text).unwrap();

    let data = payload["data"].as_array().unwrap();
    assert_eq!(payload["count"].as_u64().unwrap() as usize, data.len());
    assert!(data
        .iter()
        .all(|p| (2023..=2024).contains(&p["year"].as_i64().unwrap())));
}

#[test]
fn test_string_request_id_is_echoed() {
    let response = round_trip(
        &dispatcher(),
        r#"{"jsonrpc":"2.0","id":"corr-42","method":"ping"}"#,
    );
    assert_eq!(response["id"], "corr-42");
}
