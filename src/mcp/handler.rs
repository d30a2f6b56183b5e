//! Request dispatch for the design knowledge base

use async_trait::async_trait;
use serde_json::{json, Value};

use super::protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, ResourceContent,
    ToolCallResult,
};
use super::tools::{self, get_resource_definitions, get_tool_definitions};
use crate::app::AppContext;
use crate::error::{DesignError, Result};

/// Answers MCP requests using the shared use-cases
pub struct DesignHandler {
    ctx: AppContext,
}

impl DesignHandler {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Run a tool; `Err` means the tool itself does not exist
    async fn handle_tool_call(&self, name: &str, params: Value) -> Result<ToolCallResult> {
        let result = match name {
            tools::ADD_OR_UPDATE_FEATURE => self
                .ctx
                .add_or_update_feature
                .execute(&params)
                .await
                .map(|r| json!({"success": true, "name": r.name, "isUpdate": r.is_update, "message": r.message})),
            tools::DELETE_FEATURE => match name_argument(&params) {
                Ok(raw) => self.ctx.delete_feature.execute(raw).await.map(|r| delete_json(&r)),
                Err(e) => Err(e),
            },
            tools::ADD_OR_UPDATE_TERM => self
                .ctx
                .add_or_update_term
                .execute(&params)
                .await
                .map(|r| json!({"success": true, "name": r.name, "isUpdate": r.is_update, "message": r.message})),
            tools::DELETE_TERM => match name_argument(&params) {
                Ok(raw) => self.ctx.delete_term.execute(raw).await.map(|r| delete_json(&r)),
                Err(e) => Err(e),
            },
            tools::GET_DETAILS => self.ctx.get_details.execute(&params).await.map(|r| {
                let mut data = r.to_json();
                data["message"] = json!(r.message());
                data
            }),
            _ => return Err(DesignError::UnknownTool(name.to_string())),
        };

        Ok(match result {
            Ok(value) => ToolCallResult::json(&value),
            Err(e) => {
                tracing::warn!("Tool {} failed: {}", name, e);
                ToolCallResult::error(
                    serde_json::to_string_pretty(&json!({
                        "success": false,
                        "error": e.kind(),
                        "message": e.to_string(),
                    }))
                    .unwrap_or_else(|_| e.to_string()),
                )
            }
        })
    }

    async fn read_resource(&self, uri: &str) -> Result<Value> {
        let body = match uri {
            tools::FEATURES_URI => json!({"features": self.ctx.catalog.feature_index().await?}),
            tools::TERMS_URI => json!({"terms": self.ctx.catalog.term_index().await?}),
            tools::STATISTICS_URI => json!(self.ctx.catalog.statistics().await?),
            _ => return Err(DesignError::UnknownResource(uri.to_string())),
        };

        let content = ResourceContent {
            uri: uri.to_string(),
            mime_type: "application/json".to_string(),
            text: serde_json::to_string_pretty(&body)?,
        };
        Ok(json!({"contents": [content]}))
    }
}

fn name_argument(params: &Value) -> Result<&str> {
    params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| DesignError::InvalidInput("name is required and must be a string".to_string()))
}

fn delete_json(result: &crate::usecases::DeleteResult) -> Value {
    json!({
        "success": result.found,
        "name": result.name,
        "found": result.found,
        "message": result.message,
    })
}

#[async_trait]
impl McpHandler for DesignHandler {
    async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        tracing::debug!("MCP request: {}", request.method);

        if request.is_notification() {
            if request.method != methods::INITIALIZED {
                tracing::debug!("Ignoring notification {}", request.method);
            }
            return None;
        }

        let response = match request.method.as_str() {
            methods::INITIALIZE => {
                let result = InitializeResult::default();
                McpResponse::success(request.id, json!(result))
            }
            methods::PING => McpResponse::success(request.id, json!({})),
            methods::LIST_TOOLS => {
                let tools = get_tool_definitions();
                McpResponse::success(request.id, json!({"tools": tools}))
            }
            methods::CALL_TOOL => {
                let name = request
                    .params
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(json!({}));

                match self.handle_tool_call(name, arguments).await {
                    Ok(tool_result) => McpResponse::success(request.id, json!(tool_result)),
                    Err(e) => McpResponse::from_error(request.id, e),
                }
            }
            methods::LIST_RESOURCES => {
                let resources = get_resource_definitions();
                McpResponse::success(request.id, json!({"resources": resources}))
            }
            methods::READ_RESOURCE => {
                let uri = request
                    .params
                    .get("uri")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                match self.read_resource(uri).await {
                    Ok(result) => McpResponse::success(request.id, result),
                    Err(e) => McpResponse::from_error(request.id, e),
                }
            }
            _ => McpResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        };

        Some(response)
    }
}
