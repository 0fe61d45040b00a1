//! Service Kit - Agent Tools
//!
//! Adapts lookup clients to `agent_core::Tool` and assembles the per-task
//! tool registries.

mod lookup_tool;
mod toolset;

pub use lookup_tool::LookupTool;
pub use toolset::CapabilityToolset;
