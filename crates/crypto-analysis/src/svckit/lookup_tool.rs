//! Lookup Tool
//!
//! Exposes one lookup capability to the reasoning loop.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    AgentError, ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::lookup::{truncate_chars, LookupClient};

pub struct LookupTool {
    client: Arc<dyn LookupClient>,
    max_output_chars: usize,
}

impl LookupTool {
    pub fn new(client: Arc<dyn LookupClient>, max_output_chars: usize) -> Self {
        Self {
            client,
            max_output_chars,
        }
    }
}

#[async_trait]
impl Tool for LookupTool {
    fn schema(&self) -> ToolSchema {
        let capability = self.client.capability();
        ToolSchema {
            name: capability.tool_name().into(),
            description: capability.description().into(),
            parameters: vec![ParameterSchema {
                name: "query".into(),
                param_type: "string".into(),
                description: "What to search for, e.g. 'Bitcoin price outlook'".into(),
                required: true,
            }],
            category: Some("lookup".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let name = self.client.capability().tool_name();
        let query = call
            .str_arg("query")
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AgentError::ToolValidation(format!("{}: query must be a non-empty string", name)))?;

        tracing::debug!(tool = name, service = self.client.name(), query, "Running lookup");

        let output = self
            .client
            .lookup(query)
            .await
            .map_err(|e| AgentError::ToolExecution(format!("{}: {}", name, e)))?;

        Ok(ToolResult::success(name, truncate_chars(&output, self.max_output_chars)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::StaticLookupClient;
    use crate::model::Capability;

    fn call(args: serde_json::Value) -> ToolCall {
        ToolCall {
            name: "web_search".into(),
            arguments: serde_json::from_value(args).unwrap(),
            id: None,
        }
    }

    #[test]
    fn test_schema_named_after_capability() {
        let tool = LookupTool::new(
            Arc::new(StaticLookupClient::new(Capability::EncyclopediaSearch, "")),
            100,
        );
        let schema = tool.schema();
        assert_eq!(schema.name, "encyclopedia_search");
        assert!(schema.parameters[0].required);
    }

    #[tokio::test]
    async fn test_output_is_bounded() {
        let client = Arc::new(StaticLookupClient::new(Capability::WebSearch, "x".repeat(50)));
        let tool = LookupTool::new(client.clone(), 10);

        let result = tool
            .execute(&call(serde_json::json!({"query": "Solana"})))
            .await
            .unwrap();
        assert_eq!(result.output.len(), 10);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_tool_execution_error() {
        let tool = LookupTool::new(
            Arc::new(StaticLookupClient::failing(Capability::WebSearch, "connection reset")),
            100,
        );
        let err = tool
            .execute(&call(serde_json::json!({"query": "Solana"})))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::ToolExecution(msg) if msg.contains("connection reset")));
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let client = Arc::new(StaticLookupClient::new(Capability::WebSearch, "ok"));
        let tool = LookupTool::new(client.clone(), 100);
        let err = tool
            .execute(&call(serde_json::json!({"query": "  "})))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::ToolValidation(_)));
        assert_eq!(client.calls(), 0);
    }
}
