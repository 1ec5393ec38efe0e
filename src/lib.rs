//! Vismaya Diet Planner Library
//!
//! BMI classification and personalized women's diet plans, with PDF/Markdown
//! export and an MCP server front end.

pub mod build_info;
pub mod config;
pub mod db;
pub mod diet;
pub mod mcp;
pub mod models;
pub mod tools;
