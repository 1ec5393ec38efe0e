//! Vismaya Tools module
//!
//! MCP tool implementations for the Vismaya diet planner.

pub mod diet_plans;
pub mod profile;
pub mod reports;
pub mod status;
