//! Vismaya MCP Server Implementation
//!
//! Implements the MCP server with all diet planner tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::Config;
use crate::diet::{ActivityLevel, BodyMetrics, DietError};
use crate::models::ProfileStore;
use crate::tools::diet_plans;
use crate::tools::profile::{self, ProfileError};
use crate::tools::reports::{self, ReportHeader};
use crate::tools::status::StatusTracker;

/// Vismaya MCP Service
#[derive(Clone)]
pub struct VismayaService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    profiles: Arc<dyn ProfileStore>,
    config: Config,
    tool_router: ToolRouter<VismayaService>,
}

impl VismayaService {
    pub fn new(config: Config, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(
                config.database_path.clone(),
                config.export_dir.clone(),
            ))),
            profiles,
            config,
            tool_router: Self::tool_router(),
        }
    }

    /// Turn raw tool parameters into validated metrics.
    ///
    /// A missing age falls back to the profile's default_age.
    fn resolve_metrics(&self, p: &BodyMetricsParams) -> Result<BodyMetrics, McpError> {
        let activity_level = match p.activity_level.as_deref() {
            Some(s) => ActivityLevel::parse(s).map_err(invalid_input)?,
            None => ActivityLevel::default(),
        };

        let age = match p.age {
            Some(age) => Some(age),
            None => self
                .profiles
                .load_profile()
                .map_err(|e| McpError::internal_error(e.to_string(), None))?
                .and_then(|profile| profile.default_age)
                .map(i64::from),
        };

        BodyMetrics::from_form(p.height_cm, p.weight_kg, age, activity_level, p.pregnant)
            .map_err(invalid_input)
    }

    fn prepared_for(&self) -> Option<String> {
        match self.profiles.load_profile() {
            Ok(profile) => profile.map(|p| p.name),
            Err(e) => {
                warn!("could not load profile for export header: {}", e);
                None
            }
        }
    }
}

fn invalid_input(e: DietError) -> McpError {
    McpError::invalid_params(e.to_string(), None)
}

fn profile_error(e: ProfileError) -> McpError {
    if e.is_invalid_input() {
        McpError::invalid_params(e.to_string(), None)
    } else {
        McpError::internal_error(e.to_string(), None)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BodyMetricsParams {
    /// Height in centimetres (expected 120-220)
    pub height_cm: Option<f64>,
    /// Weight in kilograms (expected 30-200)
    pub weight_kg: Option<f64>,
    /// Age in years (expected 18-100). Defaults to the profile's default_age.
    pub age: Option<i64>,
    /// sedentary, moderate or active (default moderate)
    pub activity_level: Option<String>,
    /// Whether the user is pregnant (default false)
    #[serde(default)]
    pub pregnant: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportPdfParams {
    #[serde(flatten)]
    pub metrics: BodyMetricsParams,
    /// Output file path (default: export directory / womens-diet-plan.pdf)
    pub output_path: Option<String>,
    /// Append a macronutrient chart page (default false)
    #[serde(default)]
    pub include_chart: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetProfileParams {
    /// Name shown on exported plans
    pub name: String,
    /// Age used when a tool call omits age
    pub default_age: Option<u32>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl VismayaService {
    // --- Status ---

    #[tool(description = "Get the current status of the Vismaya service including build info, database status, and process information")]
    async fn vismaya_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        to_json(&status)
    }

    #[tool(description = "Get instructions for calculating BMI and generating diet plans. Call this before the first diet plan request or when unsure which inputs are required.")]
    fn diet_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::DIET_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(DIET_INSTRUCTIONS)]))
    }

    // --- Diet Plans ---

    #[tool(description = "Calculate BMI (one decimal) and its category from height in cm and weight in kg")]
    fn calculate_bmi(&self, Parameters(p): Parameters<BodyMetricsParams>) -> Result<CallToolResult, McpError> {
        let metrics = self.resolve_metrics(&p)?;
        let result = diet_plans::calculate_bmi(&metrics).map_err(invalid_input)?;
        info!(bmi = result.bmi, category = result.category.as_str(), "calculated BMI");
        to_json(&result)
    }

    #[tool(description = "Generate a personalized women's diet plan: BMI, calorie target, macros, hydration, pregnancy considerations and four meal recommendations")]
    fn generate_diet_plan(&self, Parameters(p): Parameters<BodyMetricsParams>) -> Result<CallToolResult, McpError> {
        let metrics = self.resolve_metrics(&p)?;
        let result = diet_plans::generate_diet_plan(&metrics).map_err(invalid_input)?;
        info!(
            category = result.calculation.category.as_str(),
            calories = result.calculation.plan.calories,
            pregnant = metrics.pregnant,
            "generated diet plan"
        );
        to_json(&result)
    }

    #[tool(description = "Generate the diet plan and write it to a PDF file. Optionally appends a macronutrient chart page.")]
    fn export_diet_plan_pdf(&self, Parameters(p): Parameters<ExportPdfParams>) -> Result<CallToolResult, McpError> {
        let metrics = self.resolve_metrics(&p.metrics)?;
        let calc = crate::diet::compute_plan(&metrics).map_err(invalid_input)?;

        let output_path = p
            .output_path
            .map(PathBuf::from)
            .unwrap_or_else(|| self.config.default_pdf_path());
        let header = ReportHeader {
            prepared_for: self.prepared_for(),
            generated_on: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
        };

        let result = reports::export_diet_plan_pdf(&calc, &header, &output_path, p.include_chart)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        to_json(&result)
    }

    #[tool(description = "Generate the diet plan and return it as a Markdown document")]
    fn export_diet_plan_markdown(&self, Parameters(p): Parameters<BodyMetricsParams>) -> Result<CallToolResult, McpError> {
        let metrics = self.resolve_metrics(&p)?;
        let prepared_for = self.prepared_for();
        let result = diet_plans::export_diet_plan_markdown(&metrics, prepared_for.as_deref())
            .map_err(invalid_input)?;
        to_json(&result)
    }

    // --- Profile ---

    #[tool(description = "Get the user profile (name shown on exports, default age)")]
    fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let result = profile::get_profile(self.profiles.as_ref()).map_err(profile_error)?;
        to_json(&result)
    }

    #[tool(description = "Set the user profile. The name appears on exported plans; default_age is used when a request omits age.")]
    fn set_profile(&self, Parameters(p): Parameters<SetProfileParams>) -> Result<CallToolResult, McpError> {
        let result = profile::set_profile(self.profiles.as_ref(), &p.name, p.default_age)
            .map_err(profile_error)?;
        info!(name = %result.profile.name, "profile updated");
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for VismayaService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "vismaya".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Vismaya Diet Planner".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Vismaya Diet Planner - BMI and personalized women's diet plans. \
                 IMPORTANT: Call diet_instructions before the first request. \
                 BMI: calculate_bmi. Plans: generate_diet_plan. \
                 Exports: export_diet_plan_pdf, export_diet_plan_markdown. \
                 Profile: get_profile/set_profile. Status: vismaya_status. \
                 Plans are general guidance; always relay the disclaimer and any pregnancy_note."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations::run_migrations, Database, DbError};

    fn service() -> VismayaService {
        let db = Database::in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        let config = Config {
            database_path: PathBuf::from(":memory:"),
            export_dir: std::env::temp_dir().join("vismaya-service-test"),
        };
        VismayaService::new(config, Arc::new(db))
    }

    fn params(age: Option<i64>, activity: Option<&str>) -> BodyMetricsParams {
        BodyMetricsParams {
            height_cm: Some(165.0),
            weight_kg: Some(70.0),
            age,
            activity_level: activity.map(String::from),
            pregnant: false,
        }
    }

    #[test]
    fn test_resolve_metrics_defaults_activity() {
        let metrics = service().resolve_metrics(&params(Some(28), None)).unwrap();
        assert_eq!(metrics.activity_level, ActivityLevel::Moderate);
        assert_eq!(metrics.age, 28);
    }

    #[test]
    fn test_resolve_metrics_rejects_unknown_activity() {
        assert!(service().resolve_metrics(&params(Some(28), Some("extreme"))).is_err());
    }

    #[test]
    fn test_resolve_metrics_age_from_profile() {
        let svc = service();
        assert!(svc.resolve_metrics(&params(None, None)).is_err());

        svc.profiles.save_profile("Asha", Some(52)).unwrap();
        let metrics = svc.resolve_metrics(&params(None, None)).unwrap();
        assert_eq!(metrics.age, 52);
    }

    #[test]
    fn test_profile_error_mapping() {
        let invalid = profile_error(ProfileError::ZeroDefaultAge);
        assert_eq!(invalid.code, rmcp::model::ErrorCode::INVALID_PARAMS);

        let storage = profile_error(ProfileError::Db(DbError::Sqlite(
            rusqlite::Error::QueryReturnedNoRows,
        )));
        assert_eq!(storage.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
    }

    #[test]
    fn test_export_params_flatten() {
        let p: ExportPdfParams = serde_json::from_str(
            r#"{"height_cm": 160, "weight_kg": 50, "age": 35, "activity_level": "sedentary", "pregnant": true, "include_chart": true}"#,
        )
        .unwrap();
        assert_eq!(p.metrics.height_cm, Some(160.0));
        assert!(p.metrics.pregnant);
        assert!(p.include_chart);
        assert!(p.output_path.is_none());
    }
}
