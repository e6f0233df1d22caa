use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::food_analysis::entities::AnalysisResult;

pub const NOT_PROVIDED: &str = "None provided";
pub const MISSING_VALUE: &str = "-";
pub const DEFAULT_SUMMARY: &str = "Analysis completed";

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid number pattern")
});

/// Reads the number at the start of a value such as `"95 kcal"` or `"0.5g"`.
pub fn parse_leading_number(value: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(value)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn chart_value(value: &Option<String>) -> f64 {
    value
        .as_deref()
        .and_then(parse_leading_number)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityStyle {
    Safe,
    Risk,
}

impl CompatibilityStyle {
    pub fn classify(text: &str) -> Self {
        if text.contains("Caution") || text.contains("risk") || text.contains("Risk") {
            CompatibilityStyle::Risk
        } else {
            CompatibilityStyle::Safe
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HealthProfileView {
    pub diseases: String,
    pub allergies: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HealthCompatibilityView {
    pub text: String,
    pub style: CompatibilityStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartData {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    fn new(title: &str, labels: &[&str], values: Vec<f64>) -> Self {
        Self {
            title: title.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            values,
        }
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Every named slot of the results page, filled from one record.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResultsView {
    pub food_item: Option<String>,
    pub summary_text: String,
    /// Present when the user supplied at least one health field.
    pub health_profile: Option<HealthProfileView>,
    pub health_compatibility: Option<HealthCompatibilityView>,
    pub calories_value: String,
    pub protein_value: String,
    pub carbs_value: String,
    pub fat_value: String,
    pub fiber_value: String,
    pub sugar_value: String,
    pub sodium_value: String,
    pub key_nutrients: Vec<String>,
    pub health_benefits: Vec<String>,
    pub health_risks: Vec<String>,
    pub nutrition_chart: ChartData,
    pub values_chart: ChartData,
}

impl ResultsView {
    pub fn from_record(record: &AnalysisResult) -> Self {
        let value = |field: &Option<String>| {
            field
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(MISSING_VALUE)
                .to_string()
        };
        let provided = |field: &Option<String>| {
            field
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(NOT_PROVIDED)
                .to_string()
        };
        let non_empty = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());

        let health_profile = (non_empty(&record.diseases) || non_empty(&record.allergies))
            .then(|| HealthProfileView {
                diseases: provided(&record.diseases),
                allergies: provided(&record.allergies),
            });

        let health_compatibility = record
            .health_compatibility
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(|text| HealthCompatibilityView {
                text: text.to_string(),
                style: CompatibilityStyle::classify(text),
            });

        let protein = chart_value(&record.protein);
        let carbs = chart_value(&record.carbs);
        let fat = chart_value(&record.fat);

        Self {
            food_item: record.food_item.clone(),
            summary_text: record
                .summary
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            health_profile,
            health_compatibility,
            calories_value: value(&record.calories),
            protein_value: value(&record.protein),
            carbs_value: value(&record.carbs),
            fat_value: value(&record.fat),
            fiber_value: value(&record.fiber),
            sugar_value: value(&record.sugar),
            sodium_value: value(&record.sodium),
            key_nutrients: record.key_nutrients.clone().unwrap_or_default(),
            health_benefits: record.health_benefits.clone().unwrap_or_default(),
            health_risks: record.health_risks.clone().unwrap_or_default(),
            nutrition_chart: ChartData::new(
                "Macronutrient Distribution",
                &["Protein", "Carbs", "Fat"],
                vec![protein, carbs, fat],
            ),
            values_chart: ChartData::new(
                "Nutritional Values",
                &["Calories", "Protein (g)", "Carbs (g)", "Fat (g)"],
                vec![chart_value(&record.calories), protein, carbs, fat],
            ),
        }
    }

    pub fn has_health_insights(&self) -> bool {
        !self.health_benefits.is_empty() || !self.health_risks.is_empty()
    }
}
