//! Diet plan rule engine
//!
//! Turns body metrics, activity level and pregnancy status into a BMI category,
//! a calorie and macronutrient target, and a four-meal recommendation set.

pub mod bmi;
pub mod calories;
pub mod error;
pub mod meals;
pub mod metrics;
pub mod plan;

pub use bmi::{bmi_value, classify, BmiCategory, BmiResult};
pub use calories::{CalorieTarget, MacroSplit, Macros, PlanFocus};
pub use error::{DietError, DietResult};
pub use meals::{generate_meals, MealRecommendation, MealSlot, Meals};
pub use metrics::{ActivityLevel, BodyMetrics};
pub use plan::{compute_plan, DietPlan, PlanCalculation, DISCLAIMER, PREGNANCY_BMI_CAVEAT};
