//! Vismaya Diet Planner
//!
//! An MCP server for BMI calculation and women's diet plans.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vismaya::build_info;
use vismaya::config::Config;
use vismaya::db::{self, Database};
use vismaya::mcp::VismayaService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr so it never interleaves with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vismaya=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = Config::from_env();
    info!(database = %config.database_path.display(), exports = %config.export_dir.display(), "resolved configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::new(&config.database_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        info!(version, "database schema ready");
        Ok(())
    })?;

    let service = VismayaService::new(config, Arc::new(database));

    info!("starting MCP server on stdio");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
