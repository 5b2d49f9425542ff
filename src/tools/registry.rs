//! Ordered tool registry
//!
//! Keeps tools in registration order (the order they appear in the
//! prompt) alongside a name index for lookups.

use std::collections::HashMap;
use std::sync::Arc;

use super::tool::Tool;
use crate::error::{AgentError, AgentResult};

/// Registry of the tools an agent may call
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of tools, rejecting duplicate names
    pub fn from_tools(tools: Vec<Arc<dyn Tool>>) -> AgentResult<Self> {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool)?;
        }
        Ok(registry)
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> AgentResult<()> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(AgentError::DuplicateTool(name));
        }
        tracing::debug!("Registering tool: {}", name);
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(name).map(|&idx| &self.tools[idx])
    }

    /// Tool names in registration order
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Name to tool mapping
    pub fn tool_dict(&self) -> HashMap<&str, &Arc<dyn Tool>> {
        self.tools.iter().map(|t| (t.name(), t)).collect()
    }

    /// `name: description` lines, blank-line separated
    pub fn descriptions(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}

/// One tool or a list of tools, as accepted by the agent constructor
pub enum ToolSet {
    Single(Arc<dyn Tool>),
    Many(Vec<Arc<dyn Tool>>),
}

impl ToolSet {
    /// Validate and index the tools
    pub fn into_registry(self) -> AgentResult<ToolRegistry> {
        match self {
            ToolSet::Single(tool) => ToolRegistry::from_tools(vec![tool]),
            ToolSet::Many(tools) => ToolRegistry::from_tools(tools),
        }
    }
}

impl From<Arc<dyn Tool>> for ToolSet {
    fn from(tool: Arc<dyn Tool>) -> Self {
        ToolSet::Single(tool)
    }
}

impl<T: Tool + 'static> From<Arc<T>> for ToolSet {
    fn from(tool: Arc<T>) -> Self {
        ToolSet::Single(tool)
    }
}

impl From<Vec<Arc<dyn Tool>>> for ToolSet {
    fn from(tools: Vec<Arc<dyn Tool>>) -> Self {
        ToolSet::Many(tools)
    }
}
