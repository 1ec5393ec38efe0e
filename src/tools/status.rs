//! Vismaya Status Tool
//!
//! Provides runtime status information about the Vismaya service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Diet plan usage instructions for AI assistants
pub const DIET_INSTRUCTIONS: &str = r#"
# Vismaya Diet Planner Instructions

This guide explains how to produce a BMI result and a personalized women's diet plan.

## Inputs

| Field | Unit | Expected range | Notes |
|-------|------|----------------|-------|
| height_cm | centimetres | 120-220 | required, must be > 0 |
| weight_kg | kilograms | 30-200 | required, must be > 0 |
| age | years | 18-100 | required unless a profile default_age is set |
| activity_level | - | sedentary / moderate / active | defaults to moderate |
| pregnant | - | true / false | defaults to false |

Any other activity_level text is rejected. Ask the user to pick one of the three.

## Tools

1. `calculate_bmi` - BMI value, category and the category reference ranges
2. `generate_diet_plan` - BMI plus calorie target, macros, hydration and four meals
3. `export_diet_plan_pdf` - same plan written to a PDF file (optionally with a macro chart page)
4. `export_diet_plan_markdown` - same plan as Markdown text
5. `set_profile` / `get_profile` - name shown on exports and default age

## BMI Categories

| Category | BMI |
|----------|-----|
| Underweight | below 18.5 |
| Normal weight | 18.5-24.9 |
| Overweight | 25-29.9 |
| Obese | 30 or greater |

## How the Plan is Built

- Base calories by age: under 30 = 2000, 30-49 = 1800, 50+ = 1600
- Activity multiplier: sedentary 1.2, moderate 1.5, active 1.7
- Pregnancy adds 300 kcal before the category adjustment
- Category adjustment: underweight x1.1, normal x1.0, overweight x0.85, obese x0.7
- Floor: never below 1200 kcal (1500 kcal when pregnant)
- Macros (protein/carbs/fat %): underweight 25/50/25, normal 30/45/25, overweight 35/40/25, obese 40/35/25

## Pregnancy

- BMI thresholds are NOT adjusted for pregnancy. Always relay the `pregnancy_note` to the user.
- The plan adds four special considerations, one extra item per meal and a note clause per meal.
- Hydration rises from 2-2.5 liters to 2.5-3 liters.

## Important Notes

- Plans are recomputed on every call and never stored
- Always relay the disclaimer: plans are general guidance, not medical advice
"#;

/// Runtime status of the Vismaya service
#[derive(Debug, Clone, Serialize)]
pub struct VismayaStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Export directory
    pub export_dir: String,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    export_dir: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf, export_dir: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            export_dir,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> VismayaStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        VismayaStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            export_dir: self.export_dir.display().to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_paths_and_pid() {
        let tracker = StatusTracker::new(
            PathBuf::from("/nonexistent/vismaya.db"),
            PathBuf::from("/tmp/exports"),
        );
        let status = tracker.get_status();
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.export_dir, "/tmp/exports");
    }
}
