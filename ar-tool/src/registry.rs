//! Object-safe tool trait and the registry that looks tools up by name.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Object-safe trait any tool source implements: a local function, an
/// HTTP-backed integration, a wrapped external process. Tools are stored
/// as `Arc<dyn ToolDyn>` so the same instance can be shared across
/// concurrent turns.
pub trait ToolDyn: Send + Sync {
    /// The tool's unique, registry-facing name.
    fn name(&self) -> &str;

    /// Human-readable description, surfaced to coordinators/LLMs that pick
    /// which tool to call.
    fn description(&self) -> &str;

    /// Execute the tool against `params`, returning its raw JSON result.
    ///
    /// Implementations should return `Err` rather than panic for any
    /// expected failure (bad input, upstream error); `call_tool_with_trace`
    /// treats a panic as an unexpected `ToolErrorType::Exception` but
    /// cannot recover any partial state from it.
    fn call(
        &self,
        params: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>>> + Send + '_>>;
}

/// Errors from registry lookups.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ToolRegistryError {
    /// No tool is registered under that name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// Collection of tools available to a turn, keyed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolDyn>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, overwriting any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn ToolDyn>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn ToolDyn>, ToolRegistryError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| ToolRegistryError::UnknownTool(name.to_string()))
    }

    /// List the names of every registered tool, in arbitrary order.
    pub fn list_names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
