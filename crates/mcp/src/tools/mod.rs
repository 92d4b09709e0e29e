mod cost;
mod pricing;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::DispatchError;

pub use cost::{query_cost, QueryCostArgs};
pub use pricing::{model_pricing, PricingArgs};

pub const QUERY_COST_TOOL: &str = "query_openai_cost";
pub const MODEL_PRICING_TOOL: &str = "get_model_pricing";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

pub fn list_tools() -> Vec<ToolDefinition> {
    let mut tools = Vec::new();
    tools.extend(cost::definitions());
    tools.extend(pricing::definitions());
    tools
}

/// A resolved `tools/call`. Names outside the manifest become `Unknown` and
/// are answered with text, not a protocol error.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    QueryCost(QueryCostArgs),
    GetPricing(PricingArgs),
    Unknown(String),
}

impl ToolCall {
    pub fn from_params(params: Option<Value>) -> Result<Self, DispatchError> {
        let params = match params {
            None => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(DispatchError::InvalidParams(format!(
                    "expected an object, got {}",
                    other
                )))
            }
        };

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => json!({}),
            Some(args) => args.clone(),
        };

        match name.as_str() {
            QUERY_COST_TOOL => serde_json::from_value(arguments)
                .map(ToolCall::QueryCost)
                .map_err(|source| DispatchError::InvalidArguments {
                    tool: QUERY_COST_TOOL,
                    source,
                }),
            MODEL_PRICING_TOOL => serde_json::from_value(arguments)
                .map(ToolCall::GetPricing)
                .map_err(|source| DispatchError::InvalidArguments {
                    tool: MODEL_PRICING_TOOL,
                    source,
                }),
            _ => Ok(ToolCall::Unknown(name)),
        }
    }
}

pub(crate) fn text_result(text: impl Into<String>) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": text.into()
        }]
    })
}

pub fn unknown_tool(name: &str) -> Value {
    text_result(format!("Unknown tool: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_has_exactly_two_tools() {
        let tools = list_tools();
        assert_eq!(tools.len(), 2);
        for tool in &tools {
            assert!(!tool.name.is_empty());
            assert!(!tool.description.is_empty());
            assert_eq!(tool.input_schema["type"], "object");
        }
        assert_eq!(tools[0].name, QUERY_COST_TOOL);
        assert_eq!(tools[1].name, MODEL_PRICING_TOOL);
    }

    #[test]
    fn query_cost_schema_requires_key_and_date() {
        let tools = list_tools();
        assert_eq!(tools[0].input_schema["required"], json!(["api_key", "date"]));
        assert_eq!(
            tools[0].input_schema["properties"]["granularity"]["default"],
            60
        );
    }

    #[test]
    fn parses_query_cost_call() {
        let call = ToolCall::from_params(Some(json!({
            "name": "query_openai_cost",
            "arguments": { "api_key": "sk-abc", "date": "03-15" }
        })))
        .unwrap();

        match call {
            ToolCall::QueryCost(args) => {
                assert_eq!(args.api_key.as_deref(), Some("sk-abc"));
                assert_eq!(args.date.as_deref(), Some("03-15"));
                assert_eq!(args.granularity(), 60);
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[test]
    fn missing_arguments_default_to_empty() {
        let call = ToolCall::from_params(Some(json!({ "name": "get_model_pricing" }))).unwrap();
        assert_eq!(call, ToolCall::GetPricing(PricingArgs { model: None }));
    }

    #[test]
    fn unknown_or_missing_name_is_unknown() {
        assert_eq!(
            ToolCall::from_params(Some(json!({ "name": "nope" }))).unwrap(),
            ToolCall::Unknown("nope".to_string())
        );
        assert_eq!(
            ToolCall::from_params(None).unwrap(),
            ToolCall::Unknown(String::new())
        );
    }

    #[test]
    fn wrongly_typed_arguments_are_errors() {
        let err = ToolCall::from_params(Some(json!({
            "name": "query_openai_cost",
            "arguments": { "api_key": 5, "date": "2025-01-01" }
        })))
        .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArguments { tool, .. } if tool == QUERY_COST_TOOL));
    }

    #[test]
    fn non_object_params_are_errors() {
        assert!(matches!(
            ToolCall::from_params(Some(json!("query_openai_cost"))),
            Err(DispatchError::InvalidParams(_))
        ));
    }
}
