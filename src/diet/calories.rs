//! Calorie target and macronutrient calculation
//!
//! Base calories come from an age band, scaled by activity, bumped for pregnancy,
//! then scaled by BMI category and clamped to a floor.

use serde::{Deserialize, Serialize};

use super::bmi::BmiCategory;
use super::metrics::ActivityLevel;

/// Flat pregnancy addition, applied before category scaling
pub const PREGNANCY_EXTRA_KCAL: f64 = 300.0;
/// Minimum daily target when not pregnant
pub const MIN_KCAL: u32 = 1200;
/// Minimum daily target when pregnant
pub const MIN_KCAL_PREGNANT: u32 = 1500;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

pub const HYDRATION_STANDARD: &str = "2-2.5 liters";
pub const HYDRATION_PREGNANT: &str = "2.5-3 liters";

/// Reminders attached to every pregnant plan, in this order
pub const PREGNANCY_CONSIDERATIONS: [&str; 4] = [
    "Focus on folate-rich foods",
    "Increase calcium intake",
    "Avoid alcohol and limit caffeine",
    "Consult with healthcare provider before starting any diet",
];

/// Dietary goal of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanFocus {
    Gain,
    Maintenance,
    Loss,
}

impl PlanFocus {
    pub fn for_category(category: BmiCategory) -> Self {
        match category {
            BmiCategory::Underweight => PlanFocus::Gain,
            BmiCategory::Normal => PlanFocus::Maintenance,
            BmiCategory::Overweight | BmiCategory::Obese => PlanFocus::Loss,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanFocus::Gain => "weight gain",
            PlanFocus::Maintenance => "maintenance",
            PlanFocus::Loss => "weight loss",
        }
    }

    /// Label with the first letter capitalised
    pub fn title(&self) -> &'static str {
        match self {
            PlanFocus::Gain => "Weight gain",
            PlanFocus::Maintenance => "Maintenance",
            PlanFocus::Loss => "Weight loss",
        }
    }
}

/// Percent of daily calories per macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_pct: u32,
    pub carbs_pct: u32,
    pub fat_pct: u32,
}

impl MacroSplit {
    pub fn for_category(category: BmiCategory) -> Self {
        let (protein_pct, carbs_pct, fat_pct) = match category {
            BmiCategory::Underweight => (25, 50, 25),
            BmiCategory::Normal => (30, 45, 25),
            BmiCategory::Overweight => (35, 40, 25),
            BmiCategory::Obese => (40, 35, 25),
        };
        Self { protein_pct, carbs_pct, fat_pct }
    }

    /// Convert the split into whole grams for a calorie target
    pub fn grams(&self, calories: u32) -> Macros {
        let kcal = calories as f64;
        Macros {
            protein_g: grams_for(kcal, self.protein_pct, KCAL_PER_G_PROTEIN),
            carbs_g: grams_for(kcal, self.carbs_pct, KCAL_PER_G_CARBS),
            fat_g: grams_for(kcal, self.fat_pct, KCAL_PER_G_FAT),
        }
    }
}

fn grams_for(kcal: f64, pct: u32, kcal_per_g: f64) -> u32 {
    (kcal * pct as f64 / 100.0 / kcal_per_g).round() as u32
}

/// Daily macronutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

impl Macros {
    /// Energy represented by these grams
    pub fn kcal(&self) -> u32 {
        self.protein_g * KCAL_PER_G_PROTEIN as u32
            + self.carbs_g * KCAL_PER_G_CARBS as u32
            + self.fat_g * KCAL_PER_G_FAT as u32
    }
}

/// Everything the calorie calculator derives for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieTarget {
    pub calories: u32,
    pub split: MacroSplit,
    pub macros: Macros,
    pub focus: PlanFocus,
    pub hydration: String,
    pub special_considerations: Vec<String>,
}

/// Base calories for an age band
pub fn base_calories(age: u32) -> f64 {
    if age < 30 {
        2000.0
    } else if age < 50 {
        1800.0
    } else {
        1600.0
    }
}

/// Category scaling factor applied after activity and pregnancy
pub fn category_factor(category: BmiCategory) -> f64 {
    match category {
        BmiCategory::Underweight => 1.1,
        BmiCategory::Normal => 1.0,
        BmiCategory::Overweight => 0.85,
        BmiCategory::Obese => 0.7,
    }
}

/// Daily calorie target, clamped up to the applicable floor
pub fn calorie_target(category: BmiCategory, age: u32, activity: ActivityLevel, pregnant: bool) -> u32 {
    let mut energy = base_calories(age) * activity.multiplier();
    if pregnant {
        energy += PREGNANCY_EXTRA_KCAL;
    }

    let scaled = (energy * category_factor(category)).round() as u32;
    let floor = if pregnant { MIN_KCAL_PREGNANT } else { MIN_KCAL };
    scaled.max(floor)
}

/// Run the full calorie calculation for a classified input
pub fn calculate(category: BmiCategory, age: u32, activity: ActivityLevel, pregnant: bool) -> CalorieTarget {
    let calories = calorie_target(category, age, activity, pregnant);
    let split = MacroSplit::for_category(category);

    let hydration = if pregnant { HYDRATION_PREGNANT } else { HYDRATION_STANDARD };
    let special_considerations = if pregnant {
        PREGNANCY_CONSIDERATIONS.iter().map(|s| s.to_string()).collect()
    } else {
        Vec::new()
    };

    CalorieTarget {
        calories,
        split,
        macros: split.grams(calories),
        focus: PlanFocus::for_category(category),
        hydration: hydration.to_string(),
        special_considerations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVITIES: [ActivityLevel; 3] =
        [ActivityLevel::Sedentary, ActivityLevel::Moderate, ActivityLevel::Active];
    const AGES: [u32; 7] = [18, 29, 30, 49, 50, 75, 100];

    #[test]
    fn test_base_calories_bands() {
        assert_eq!(base_calories(18), 2000.0);
        assert_eq!(base_calories(29), 2000.0);
        assert_eq!(base_calories(30), 1800.0);
        assert_eq!(base_calories(49), 1800.0);
        assert_eq!(base_calories(50), 1600.0);
        assert_eq!(base_calories(90), 1600.0);
    }

    #[test]
    fn test_overweight_example() {
        let target = calculate(BmiCategory::Overweight, 28, ActivityLevel::Moderate, false);
        assert_eq!(target.calories, 2550);
        assert_eq!(target.macros, Macros { protein_g: 223, carbs_g: 255, fat_g: 71 });
        assert_eq!(target.focus, PlanFocus::Loss);
        assert_eq!(target.hydration, "2-2.5 liters");
        assert!(target.special_considerations.is_empty());
    }

    #[test]
    fn test_pregnant_normal_example() {
        let target = calculate(BmiCategory::Normal, 35, ActivityLevel::Sedentary, true);
        assert_eq!(target.calories, 2460);
        assert_eq!(target.focus, PlanFocus::Maintenance);
        assert_eq!(target.hydration, "2.5-3 liters");
        assert_eq!(target.special_considerations.len(), 4);
        assert_eq!(target.special_considerations[0], "Focus on folate-rich foods");
    }

    #[test]
    fn test_underweight_surplus() {
        // 2000 * 1.7 * 1.1 = 3740
        assert_eq!(calorie_target(BmiCategory::Underweight, 20, ActivityLevel::Active, false), 3740);
    }

    #[test]
    fn test_obese_deficit() {
        // 1600 * 1.2 * 0.7 = 1344
        assert_eq!(calorie_target(BmiCategory::Obese, 60, ActivityLevel::Sedentary, false), 1344);
        // (1600 * 1.2 + 300) * 0.7 = 1554
        assert_eq!(calorie_target(BmiCategory::Obese, 60, ActivityLevel::Sedentary, true), 1554);
    }

    #[test]
    fn test_floor_never_breached() {
        for category in BmiCategory::all() {
            for age in AGES {
                for activity in ACTIVITIES {
                    assert!(calorie_target(category, age, activity, false) >= MIN_KCAL);
                    assert!(calorie_target(category, age, activity, true) >= MIN_KCAL_PREGNANT);
                }
            }
        }
    }

    #[test]
    fn test_macro_energy_close_to_target() {
        // Each gram count is off by at most half a gram: 0.5*4 + 0.5*4 + 0.5*9
        for category in BmiCategory::all() {
            for age in AGES {
                for activity in ACTIVITIES {
                    for pregnant in [false, true] {
                        let target = calculate(category, age, activity, pregnant);
                        let diff = target.macros.kcal() as f64 - target.calories as f64;
                        assert!(diff.abs() <= 8.5, "{:?} {} {:?} {} off by {}", category, age, activity, pregnant, diff);
                    }
                }
            }
        }
    }

    #[test]
    fn test_macro_example_within_three_kcal() {
        let target = calculate(BmiCategory::Overweight, 28, ActivityLevel::Moderate, false);
        let diff = target.macros.kcal() as i64 - target.calories as i64;
        assert!(diff.abs() <= 3);
    }

    #[test]
    fn test_split_sums_to_hundred() {
        for category in BmiCategory::all() {
            let s = MacroSplit::for_category(category);
            assert_eq!(s.protein_pct + s.carbs_pct + s.fat_pct, 100);
        }
    }

    #[test]
    fn test_focus_labels() {
        assert_eq!(PlanFocus::for_category(BmiCategory::Underweight).label(), "weight gain");
        assert_eq!(PlanFocus::for_category(BmiCategory::Normal).label(), "maintenance");
        assert_eq!(PlanFocus::for_category(BmiCategory::Obese).title(), "Weight loss");
    }
}
