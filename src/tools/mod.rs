//! Tool system for the agent
//!
//! This module provides the Tool trait and ToolRegistry for managing
//! tools that the agent can use.

mod registry;
mod tool;

pub use registry::{ToolRegistry, ToolSet};
pub use tool::{FnTool, Tool};
