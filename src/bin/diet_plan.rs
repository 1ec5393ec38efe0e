//! Compute a diet plan from the command line
//!
//! Usage: diet_plan <height_cm> <weight_kg> <age> <sedentary|moderate|active> <yes|no> [output.pdf]

use std::path::PathBuf;

use vismaya::diet::{compute_plan, ActivityLevel, BodyMetrics};
use vismaya::tools::diet_plans;
use vismaya::tools::reports::{self, ReportHeader};

const USAGE: &str =
    "Usage: diet_plan <height_cm> <weight_kg> <age> <sedentary|moderate|active> <yes|no> [output.pdf]";

fn parse_number(field: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| format!("{} must be a number, got '{}'", field, raw))
}

fn parse_pregnant(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        other => Err(format!("pregnant must be yes or no, got '{}'", other)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 5 {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    let height = parse_number("height_cm", &args[0])?;
    let weight = parse_number("weight_kg", &args[1])?;
    let age = args[2]
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("age must be a whole number, got '{}'", args[2]))?;
    let activity = ActivityLevel::parse(&args[3])?;
    let pregnant = parse_pregnant(&args[4])?;

    let metrics = BodyMetrics::from_form(Some(height), Some(weight), Some(age), activity, pregnant)?;

    let response = diet_plans::generate_diet_plan(&metrics)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if let Some(path) = args.get(5) {
        let calc = compute_plan(&metrics)?;
        let header = ReportHeader {
            prepared_for: None,
            generated_on: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
        };
        let result = reports::export_diet_plan_pdf(&calc, &header, &PathBuf::from(path), false)?;
        eprintln!("{}", result.message);
    }

    Ok(())
}
