//! Tool definitions and result shaping.
//!
//! The server exposes exactly one tool, `sql_select`. Its definition is
//! static and built once. Result shaping differs per surface: `tools/call`
//! wraps the rows in a single text content block, while the legacy `query`
//! method returns the raw row list.

use crate::constants::SQL_SELECT_TOOL;
use crate::database::Row;
use crate::error::ServerError;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};

/// A named, schema-described capability the dispatcher can invoke.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: &'static str,

    /// Human-readable description.
    pub description: &'static str,

    /// JSON schema for the tool's arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The singleton tool list. Produced once, never mutated.
pub static TOOLS: Lazy<Vec<ToolDefinition>> = Lazy::new(|| {
    vec![ToolDefinition {
        name: SQL_SELECT_TOOL,
        description: "Execute SELECT query (read-only)",
        input_schema: json!({
            "type": "object",
            "properties": {
                "sql": {
                    "type": "string",
                    "description": "SQL SELECT query"
                }
            },
            "required": ["sql"]
        }),
    }]
});

/// Build the `tools/list` result.
pub fn list_tools_result() -> Result<Value, ServerError> {
    Ok(json!({ "tools": serde_json::to_value(&*TOOLS)? }))
}

/// Wrap rows as a `tools/call` result: one text content block carrying the
/// row list serialized as indented JSON.
pub fn tool_call_result(rows: &[Row]) -> Result<Value, ServerError> {
    let text = serde_json::to_string_pretty(rows)?;
    Ok(json!({
        "content": [
            {
                "type": "text",
                "text": text
            }
        ]
    }))
}

/// Build the legacy `query` result: the raw row list under `rows`.
pub fn legacy_query_result(rows: &[Row]) -> Result<Value, ServerError> {
    Ok(json!({ "rows": serde_json::to_value(rows)? }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        let mut row = Row::new();
        row.insert("id".to_string(), json!(1));
        row.insert("name".to_string(), json!("Alice"));
        row
    }

    #[test]
    fn test_singleton_tool_list() {
        assert_eq!(TOOLS.len(), 1);
        let tool = &TOOLS[0];
        assert_eq!(tool.name, "sql_select");
        assert_eq!(tool.input_schema["required"], json!(["sql"]));
        assert_eq!(tool.input_schema["properties"]["sql"]["type"], "string");
    }

    #[test]
    fn test_list_tools_result_shape() {
        let result = list_tools_result().unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "sql_select");
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[test]
    fn test_tool_call_result_wraps_rows_as_text() {
        let result = tool_call_result(&[sample_row()]).unwrap();
        let content = result["content"].as_array().unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0]["type"], "text");

        // The payload is the row list serialized as indented JSON.
        let text = content[0]["text"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed[0]["name"], "Alice");
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_legacy_query_result_returns_raw_rows() {
        let result = legacy_query_result(&[sample_row()]).unwrap();
        assert_eq!(result["rows"][0]["id"], 1);
        assert!(result.get("content").is_none());
    }

    #[test]
    fn test_tool_call_result_preserves_column_order() {
        // Columns render in query order, not alphabetically.
        let mut row = Row::new();
        row.insert("name".to_string(), json!("Alice"));
        row.insert("id".to_string(), json!(1));

        let result = tool_call_result(&[row]).unwrap();
        let text = result["content"][0]["text"].as_str().unwrap();
        let name_pos = text.find("\"name\"").unwrap();
        let id_pos = text.find("\"id\"").unwrap();
        assert!(name_pos < id_pos, "column order must follow insertion order");
    }

    #[test]
    fn test_empty_row_list() {
        let result = tool_call_result(&[]).unwrap();
        assert_eq!(result["content"][0]["text"], "[]");
        let legacy = legacy_query_result(&[]).unwrap();
        assert_eq!(legacy["rows"], json!([]));
    }
}
