//! Diet plan assembly
//!
//! `compute_plan` is the single entry point: validate, classify, then derive
//! calories and meals from the category.

use serde::{Deserialize, Serialize};

use super::bmi::{self, BmiCategory};
use super::calories::{self, MacroSplit, Macros, PlanFocus};
use super::error::DietResult;
use super::meals::{self, Meals};
use super::metrics::BodyMetrics;

/// Shown alongside pregnant results. Thresholds are not adjusted for pregnancy.
pub const PREGNANCY_BMI_CAVEAT: &str = "BMI calculations may not be as reliable during pregnancy. \
This plan includes pregnancy-specific nutritional guidance, but always consult with your healthcare provider.";

pub const DISCLAIMER: &str = "This diet plan is generated as a general guideline based on your BMI and provided information. \
Always consult with a healthcare provider before starting any new diet regimen, especially during pregnancy.";

/// A complete daily diet plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    pub calories: u32,
    pub macros: Macros,
    pub macro_split: MacroSplit,
    pub focus: PlanFocus,
    pub hydration: String,
    pub special_considerations: Vec<String>,
    pub meals: Meals,
}

impl DietPlan {
    /// Derive the plan for an already classified input
    pub fn for_category(category: BmiCategory, metrics: &BodyMetrics) -> Self {
        let target = calories::calculate(category, metrics.age, metrics.activity_level, metrics.pregnant);
        Self {
            calories: target.calories,
            macros: target.macros,
            macro_split: target.split,
            focus: target.focus,
            hydration: target.hydration,
            special_considerations: target.special_considerations,
            meals: meals::generate_meals(category, metrics.pregnant),
        }
    }
}

/// BMI, category and plan for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCalculation {
    pub bmi: f64,
    pub category: BmiCategory,
    pub plan: DietPlan,
}

/// Compute BMI, category and diet plan.
///
/// Fails before any calorie or meal work if the metrics are invalid.
pub fn compute_plan(metrics: &BodyMetrics) -> DietResult<PlanCalculation> {
    let result = bmi::classify(metrics)?;
    Ok(PlanCalculation {
        bmi: result.value,
        category: result.category,
        plan: DietPlan::for_category(result.category, metrics),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diet::calories::PREGNANCY_CONSIDERATIONS;
    use crate::diet::error::DietError;
    use crate::diet::meals::MealSlot;
    use crate::diet::metrics::ActivityLevel;

    fn metrics(height_cm: f64, weight_kg: f64, age: u32, activity_level: ActivityLevel, pregnant: bool) -> BodyMetrics {
        BodyMetrics { height_cm, weight_kg, age, activity_level, pregnant }
    }

    #[test]
    fn test_overweight_example() {
        let calc = compute_plan(&metrics(165.0, 70.0, 28, ActivityLevel::Moderate, false)).unwrap();
        assert_eq!(calc.bmi, 25.7);
        assert_eq!(calc.category, BmiCategory::Overweight);
        assert_eq!(calc.plan.calories, 2550);
        assert_eq!(calc.plan.macros.protein_g, 223);
        assert_eq!(calc.plan.macros.carbs_g, 255);
        assert_eq!(calc.plan.macros.fat_g, 71);
        assert_eq!(calc.plan.focus, PlanFocus::Loss);
        assert_eq!(calc.plan.meals.lunch.title, "Vegetable-Forward Lunch");
    }

    #[test]
    fn test_pregnant_normal_example() {
        let calc = compute_plan(&metrics(160.0, 50.0, 35, ActivityLevel::Sedentary, true)).unwrap();
        assert_eq!(calc.bmi, 19.5);
        assert_eq!(calc.category, BmiCategory::Normal);
        assert_eq!(calc.category.display_name(), "Normal weight");
        assert_eq!(calc.plan.calories, 2460);
        assert_eq!(calc.plan.hydration, "2.5-3 liters");
        assert_eq!(calc.plan.special_considerations.len(), 4);
    }

    #[test]
    fn test_pregnancy_changes_per_category() {
        // Heights/weights chosen to land in each category
        let cases = [(160.0, 45.0), (160.0, 55.0), (160.0, 70.0), (160.0, 90.0)];
        for (h, w) in cases {
            let plain = compute_plan(&metrics(h, w, 30, ActivityLevel::Moderate, false)).unwrap();
            let pregnant = compute_plan(&metrics(h, w, 30, ActivityLevel::Moderate, true)).unwrap();

            assert_eq!(plain.category, pregnant.category);
            assert!(plain.plan.special_considerations.is_empty());
            assert_eq!(pregnant.plan.special_considerations, PREGNANCY_CONSIDERATIONS.map(String::from).to_vec());

            for slot in MealSlot::all() {
                let a = plain.plan.meals.get(slot);
                let b = pregnant.plan.meals.get(slot);
                assert_eq!(b.items.len(), a.items.len() + 1);
                assert!(b.notes.starts_with(&a.notes));
                assert!(b.notes.len() > a.notes.len());
            }
        }
    }

    #[test]
    fn test_each_category_reachable() {
        let categories: Vec<BmiCategory> = [(160.0, 45.0), (160.0, 55.0), (160.0, 70.0), (160.0, 90.0)]
            .iter()
            .map(|(h, w)| compute_plan(&metrics(*h, *w, 40, ActivityLevel::Active, false)).unwrap().category)
            .collect();
        assert_eq!(categories, BmiCategory::all().to_vec());
    }

    #[test]
    fn test_invalid_input_fails_fast() {
        let err = compute_plan(&metrics(165.0, 0.0, 28, ActivityLevel::Moderate, false)).unwrap_err();
        assert!(matches!(err, DietError::NonPositive { field: "weight", .. }));

        let err = compute_plan(&metrics(165.0, 60.0, 0, ActivityLevel::Moderate, false)).unwrap_err();
        assert!(matches!(err, DietError::NonPositive { field: "age", .. }));
    }

    #[test]
    fn test_idempotent_output() {
        let input = metrics(172.0, 64.0, 44, ActivityLevel::Active, true);
        let first = serde_json::to_string(&compute_plan(&input).unwrap()).unwrap();
        let second = serde_json::to_string(&compute_plan(&input).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_shape() {
        let calc = compute_plan(&metrics(165.0, 70.0, 28, ActivityLevel::Moderate, false)).unwrap();
        let json = serde_json::to_value(&calc).unwrap();
        assert_eq!(json["category"], "overweight");
        assert_eq!(json["plan"]["focus"], "loss");
        assert_eq!(json["plan"]["macros"]["protein_g"], 223);
        assert!(json["plan"]["meals"]["snacks"]["items"].is_array());
    }
}
