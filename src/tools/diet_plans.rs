//! Diet Plan MCP Tools
//!
//! BMI calculation, plan generation and Markdown export.

use serde::Serialize;

use crate::diet::{
    classify, compute_plan, BmiCategory, BodyMetrics, DietResult, PlanCalculation, DISCLAIMER,
    PREGNANCY_BMI_CAVEAT,
};

/// One row of the category reference table
#[derive(Debug, Serialize)]
pub struct CategoryRange {
    pub category: BmiCategory,
    pub label: &'static str,
    pub range: &'static str,
}

/// Response for calculate_bmi
#[derive(Debug, Serialize)]
pub struct CalculateBmiResponse {
    pub bmi: f64,
    pub category: BmiCategory,
    pub category_label: &'static str,
    pub ranges: Vec<CategoryRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnancy_note: Option<&'static str>,
}

/// Response for generate_diet_plan
#[derive(Debug, Serialize)]
pub struct GenerateDietPlanResponse {
    #[serde(flatten)]
    pub calculation: PlanCalculation,
    pub category_label: &'static str,
    pub focus_label: &'static str,
    pub activity_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnancy_note: Option<&'static str>,
    pub disclaimer: &'static str,
}

/// Response for export_diet_plan_markdown
#[derive(Debug, Serialize)]
pub struct ExportMarkdownResponse {
    pub markdown: String,
    pub generated_at: String,
}

fn category_ranges() -> Vec<CategoryRange> {
    BmiCategory::all()
        .into_iter()
        .map(|category| CategoryRange {
            category,
            label: category.display_name(),
            range: category.range_label(),
        })
        .collect()
}

fn pregnancy_note(metrics: &BodyMetrics) -> Option<&'static str> {
    metrics.pregnant.then_some(PREGNANCY_BMI_CAVEAT)
}

/// Compute and classify BMI only
pub fn calculate_bmi(metrics: &BodyMetrics) -> DietResult<CalculateBmiResponse> {
    let result = classify(metrics)?;
    Ok(CalculateBmiResponse {
        bmi: result.value,
        category: result.category,
        category_label: result.category.display_name(),
        ranges: category_ranges(),
        pregnancy_note: pregnancy_note(metrics),
    })
}

/// Compute the full diet plan
pub fn generate_diet_plan(metrics: &BodyMetrics) -> DietResult<GenerateDietPlanResponse> {
    let calculation = compute_plan(metrics)?;
    Ok(GenerateDietPlanResponse {
        category_label: calculation.category.display_name(),
        focus_label: calculation.plan.focus.label(),
        activity_label: metrics.activity_level.display_name(),
        calculation,
        pregnancy_note: pregnancy_note(metrics),
        disclaimer: DISCLAIMER,
    })
}

/// Render a computed plan as Markdown, in the same order as the PDF
pub fn render_markdown(calc: &PlanCalculation, prepared_for: Option<&str>, generated_at: &str) -> String {
    let plan = &calc.plan;
    let mut markdown = String::new();

    markdown.push_str("# Personalized Women's Diet Plan\n\n");
    if let Some(name) = prepared_for {
        markdown.push_str(&format!("**Prepared for:** {}\n\n", name));
    }
    markdown.push_str(&format!("**Generated:** {}\n\n", generated_at));
    markdown.push_str("---\n\n");

    markdown.push_str(&format!("**BMI:** {:.1} - {}\n\n", calc.bmi, calc.category.display_name()));
    markdown.push_str(&format!("**Diet Focus:** {}\n\n", plan.focus.title()));
    markdown.push_str(&format!("**Daily Calorie Target:** {} calories\n\n", plan.calories));

    markdown.push_str("## Daily Macronutrients\n\n");
    markdown.push_str(&format!("- **Protein:** {}g ({}%)\n", plan.macros.protein_g, plan.macro_split.protein_pct));
    markdown.push_str(&format!("- **Carbohydrates:** {}g ({}%)\n", plan.macros.carbs_g, plan.macro_split.carbs_pct));
    markdown.push_str(&format!("- **Fat:** {}g ({}%)\n\n", plan.macros.fat_g, plan.macro_split.fat_pct));

    markdown.push_str(&format!("**Daily Hydration:** {} of water\n\n", plan.hydration));

    if !plan.special_considerations.is_empty() {
        markdown.push_str("## Special Considerations\n\n");
        for consideration in &plan.special_considerations {
            markdown.push_str(&format!("- {}\n", consideration));
        }
        markdown.push('\n');
    }

    markdown.push_str("## Meal Plan\n\n");
    for (slot, meal) in plan.meals.iter() {
        markdown.push_str(&format!("### {}: {}\n\n", slot.display_name(), meal.title));
        for item in &meal.items {
            markdown.push_str(&format!("- {}\n", item));
        }
        markdown.push_str(&format!("\n*Note:* {}\n\n", meal.notes));
    }

    markdown.push_str("---\n\n");
    markdown.push_str(&format!("**Disclaimer:** {}\n", DISCLAIMER));

    markdown
}

/// Compute the plan and render it as Markdown
pub fn export_diet_plan_markdown(
    metrics: &BodyMetrics,
    prepared_for: Option<&str>,
) -> DietResult<ExportMarkdownResponse> {
    let calc = compute_plan(metrics)?;
    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    Ok(ExportMarkdownResponse {
        markdown: render_markdown(&calc, prepared_for, &generated_at),
        generated_at,
    })
}
