//! BMI calculation and classification

use serde::{Deserialize, Serialize};

use super::error::{DietError, DietResult};
use super::metrics::BodyMetrics;

/// Lower bound of the normal range
pub const NORMAL_MIN: f64 = 18.5;
/// Lower bound of the overweight range
pub const OVERWEIGHT_MIN: f64 = 25.0;
/// Lower bound of the obese range
pub const OBESE_MIN: f64 = 30.0;

/// BMI category by the standard adult thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value. Lower bounds are inclusive.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < NORMAL_MIN {
            BmiCategory::Underweight
        } else if bmi < OVERWEIGHT_MIN {
            BmiCategory::Normal
        } else if bmi < OBESE_MIN {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Human-readable range, as shown next to a result
    pub fn range_label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Below 18.5",
            BmiCategory::Normal => "18.5-24.9",
            BmiCategory::Overweight => "25-29.9",
            BmiCategory::Obese => "30 or greater",
        }
    }

    pub fn all() -> [BmiCategory; 4] {
        [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ]
    }
}

/// Computed BMI with its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// Rounded to one decimal place
    pub value: f64,
    pub category: BmiCategory,
}

/// Compute BMI from height (cm) and weight (kg), rounded to one decimal
pub fn bmi_value(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_to_tenth(weight_kg / (height_m * height_m))
}

/// Validate metrics, then compute and classify BMI
pub fn classify(metrics: &BodyMetrics) -> DietResult<BmiResult> {
    metrics.validate()?;
    let value = bmi_value(metrics.height_cm, metrics.weight_kg);
    // Tiny heights overflow to infinity, which JSON cannot carry
    if !value.is_finite() {
        return Err(DietError::NotFinite { field: "bmi" });
    }
    Ok(BmiResult {
        value,
        category: BmiCategory::from_bmi(value),
    })
}

// f64::round is half-away-from-zero, which is half-up for positive input
fn round_to_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diet::metrics::ActivityLevel;

    fn metrics(height_cm: f64, weight_kg: f64) -> BodyMetrics {
        BodyMetrics {
            height_cm,
            weight_kg,
            age: 30,
            activity_level: ActivityLevel::Moderate,
            pregnant: false,
        }
    }

    #[test]
    fn test_bmi_value_rounding() {
        assert_eq!(bmi_value(165.0, 70.0), 25.7);
        assert_eq!(bmi_value(160.0, 50.0), 19.5);
        assert_eq!(bmi_value(180.0, 81.0), 25.0);
    }

    #[test]
    fn test_bmi_matches_formula() {
        for (h, w) in [(150.0, 45.0), (172.5, 63.2), (190.0, 120.0), (121.0, 31.0)] {
            let hm: f64 = h / 100.0;
            let expected = (w / (hm * hm) * 10.0).round() / 10.0;
            assert_eq!(bmi_value(h, w), expected);
        }
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
        assert_eq!(BmiCategory::from_bmi(45.0), BmiCategory::Obese);
    }

    #[test]
    fn test_classify_example() {
        let result = classify(&metrics(165.0, 70.0)).unwrap();
        assert_eq!(result.value, 25.7);
        assert_eq!(result.category, BmiCategory::Overweight);
        assert_eq!(result.category.display_name(), "Overweight");
    }

    #[test]
    fn test_classify_rejects_invalid() {
        let err = classify(&metrics(0.0, 70.0)).unwrap_err();
        assert!(matches!(err, DietError::NonPositive { field: "height", .. }));

        let err = classify(&metrics(165.0, -1.0)).unwrap_err();
        assert!(matches!(err, DietError::NonPositive { field: "weight", .. }));
    }

    #[test]
    fn test_classify_rejects_overflowing_bmi() {
        assert_eq!(
            classify(&metrics(1e-170, 60.0)),
            Err(DietError::NotFinite { field: "bmi" })
        );
    }
}
