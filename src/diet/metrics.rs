//! Body metrics input
//!
//! The anthropometric input for one calculation, plus the activity level enum.

use serde::{Deserialize, Serialize};

use super::error::{DietError, DietResult};

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise 3-5 times a week
    #[default]
    Moderate,
    /// Daily exercise or a physical job
    Active,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
        }
    }

    /// Parse from string, rejecting anything unrecognised
    pub fn parse(s: &str) -> DietResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            _ => Err(DietError::UnknownActivityLevel(s.to_string())),
        }
    }

    /// Parse from string, treating unrecognised text as `Moderate`.
    ///
    /// This is the fallback the web form applied. Prefer [`ActivityLevel::parse`].
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or(ActivityLevel::Moderate)
    }

    /// Calorie multiplier applied to the age-banded base
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Moderate => 1.5,
            ActivityLevel::Active => 1.7,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::Moderate => "Moderate (exercise 3-5 times/week)",
            ActivityLevel::Active => "Active (daily exercise or physical job)",
        }
    }
}

/// Anthropometric input for a single plan calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub pregnant: bool,
}

impl BodyMetrics {
    /// Build metrics from optional form values, failing on the first missing or invalid field
    pub fn from_form(
        height_cm: Option<f64>,
        weight_kg: Option<f64>,
        age: Option<i64>,
        activity_level: ActivityLevel,
        pregnant: bool,
    ) -> DietResult<Self> {
        let height_cm = height_cm.ok_or(DietError::Missing { field: "height" })?;
        let weight_kg = weight_kg.ok_or(DietError::Missing { field: "weight" })?;
        let age = age.ok_or(DietError::Missing { field: "age" })?;

        if age <= 0 {
            return Err(DietError::NonPositive { field: "age", value: age as f64 });
        }

        let metrics = Self {
            height_cm,
            weight_kg,
            age: u32::try_from(age).unwrap_or(u32::MAX),
            activity_level,
            pregnant,
        };
        metrics.validate()?;
        Ok(metrics)
    }

    /// Check height, weight and age are present and positive
    pub fn validate(&self) -> DietResult<()> {
        check_positive("height", self.height_cm)?;
        check_positive("weight", self.weight_kg)?;
        if self.age == 0 {
            return Err(DietError::NonPositive { field: "age", value: 0.0 });
        }
        Ok(())
    }
}

fn check_positive(field: &'static str, value: f64) -> DietResult<()> {
    if !value.is_finite() {
        return Err(DietError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(DietError::NonPositive { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_activity_levels() {
        assert_eq!(ActivityLevel::parse("sedentary"), Ok(ActivityLevel::Sedentary));
        assert_eq!(ActivityLevel::parse(" Moderate "), Ok(ActivityLevel::Moderate));
        assert_eq!(ActivityLevel::parse("ACTIVE"), Ok(ActivityLevel::Active));
    }

    #[test]
    fn test_parse_unknown_activity_level() {
        assert_eq!(
            ActivityLevel::parse("couch"),
            Err(DietError::UnknownActivityLevel("couch".to_string()))
        );
        assert_eq!(ActivityLevel::parse_lenient("couch"), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::parse_lenient(""), ActivityLevel::Moderate);
    }

    #[test]
    fn test_from_form_missing_fields() {
        let err = BodyMetrics::from_form(None, Some(60.0), Some(30), ActivityLevel::Moderate, false)
            .unwrap_err();
        assert_eq!(err, DietError::Missing { field: "height" });

        let err = BodyMetrics::from_form(Some(160.0), None, Some(30), ActivityLevel::Moderate, false)
            .unwrap_err();
        assert_eq!(err, DietError::Missing { field: "weight" });

        let err = BodyMetrics::from_form(Some(160.0), Some(60.0), None, ActivityLevel::Moderate, false)
            .unwrap_err();
        assert_eq!(err, DietError::Missing { field: "age" });
    }

    #[test]
    fn test_from_form_rejects_non_positive() {
        let err = BodyMetrics::from_form(Some(0.0), Some(60.0), Some(30), ActivityLevel::Moderate, false)
            .unwrap_err();
        assert!(matches!(err, DietError::NonPositive { field: "height", .. }));

        let err = BodyMetrics::from_form(Some(160.0), Some(-5.0), Some(30), ActivityLevel::Moderate, false)
            .unwrap_err();
        assert!(matches!(err, DietError::NonPositive { field: "weight", .. }));

        let err = BodyMetrics::from_form(Some(160.0), Some(60.0), Some(-1), ActivityLevel::Moderate, false)
            .unwrap_err();
        assert!(matches!(err, DietError::NonPositive { field: "age", .. }));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let metrics = BodyMetrics {
            height_cm: f64::NAN,
            weight_kg: 60.0,
            age: 30,
            activity_level: ActivityLevel::Moderate,
            pregnant: false,
        };
        assert_eq!(metrics.validate(), Err(DietError::NotFinite { field: "height" }));
    }

    #[test]
    fn test_default_activity_is_moderate() {
        let metrics: BodyMetrics =
            serde_json::from_str(r#"{"height_cm": 160, "weight_kg": 55, "age": 25}"#).unwrap();
        assert_eq!(metrics.activity_level, ActivityLevel::Moderate);
        assert!(!metrics.pregnant);
    }
}
