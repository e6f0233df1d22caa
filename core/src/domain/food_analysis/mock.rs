use rand::Rng;

use crate::domain::food_analysis::{
    content_filter::contains_blocked_term,
    entities::{AnalysisResult, HealthProfile},
};

pub const COMPATIBLE_MESSAGE: &str =
    "This food appears to be compatible with your health conditions.";
pub const REDIRECT_MESSAGE: &str = "We focus on providing health and nutrition advice. Please provide relevant health information for personalized recommendations.";
pub const DIABETES_CAUTION: &str =
    "Caution: This food is high in carbohydrates which may not be suitable for diabetics.";
pub const HYPERTENSION_CAUTION: &str =
    "Caution: This food is high in sodium which may not be suitable for those with hypertension.";
pub const ALLERGEN_CAUTION: &str =
    "Caution: This food may contain allergens. Please check the ingredients carefully.";

const CARBS_THRESHOLD: f64 = 40.0;
const SODIUM_THRESHOLD: u32 = 500;
const ALLERGEN_PROBABILITY: f64 = 0.3;

/// Demo-mode record with random nutrients. The thresholds are placeholders,
/// not nutrition guidance.
pub fn generate_mock<R: Rng + ?Sized>(rng: &mut R, profile: &HealthProfile) -> AnalysisResult {
    let calories: u32 = rng.gen_range(100..600);
    let protein = one_decimal(rng.gen_range(5.0..35.0));
    let carbs = one_decimal(rng.gen_range(10.0..70.0));
    let fat = one_decimal(rng.gen_range(3.0..28.0));
    let fiber = one_decimal(rng.gen_range(2.0..12.0));
    let sugar = one_decimal(rng.gen_range(1.0..21.0));
    let sodium: u32 = rng.gen_range(100..900);

    let diseases = profile.diseases.to_lowercase();
    let allergies = profile.allergies.to_lowercase();

    let health_compatibility =
        if contains_blocked_term(&diseases) || contains_blocked_term(&allergies) {
            REDIRECT_MESSAGE
        } else if diseases.contains("diabetes") && carbs > CARBS_THRESHOLD {
            DIABETES_CAUTION
        } else if diseases.contains("hypertension") && sodium > SODIUM_THRESHOLD {
            HYPERTENSION_CAUTION
        } else if allergies.contains("allergy") && rng.gen_bool(ALLERGEN_PROBABILITY) {
            ALLERGEN_CAUTION
        } else {
            COMPATIBLE_MESSAGE
        };

    AnalysisResult {
        food_item: Some("Sample Food Item".to_string()),
        summary: Some(
            "Your food has been successfully analyzed. See detailed results below.".to_string(),
        ),
        calories: Some(format!("{} kcal", calories)),
        protein: Some(format!("{:.1}g", protein)),
        carbs: Some(format!("{:.1}g", carbs)),
        fat: Some(format!("{:.1}g", fat)),
        fiber: Some(format!("{:.1}g", fiber)),
        sugar: Some(format!("{:.1}g", sugar)),
        sodium: Some(format!("{}mg", sodium)),
        health_compatibility: Some(health_compatibility.to_string()),
        confidence: Some(0.8),
        key_nutrients: Some(vec![
            "Vitamin C".to_string(),
            "Fiber".to_string(),
            "Iron".to_string(),
        ]),
        health_benefits: Some(vec![
            "Supports immune system".to_string(),
            "Aids digestion".to_string(),
        ]),
        health_risks: Some(vec![
            "May cause allergies in sensitive individuals".to_string(),
        ]),
        ..Default::default()
    }
    .with_profile(&profile.diseases, &profile.allergies)
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
