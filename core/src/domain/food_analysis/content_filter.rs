use crate::domain::food_analysis::value_objects::ValidationOutcome;

pub const BLOCKED_TERMS: [&str; 15] = [
    "stupid", "dumb", "idiot", "fool", "hate", "kill", "die", "death", "weapon", "bomb", "drugs",
    "alcohol", "porn", "nude", "sex",
];

pub const REJECTION_MESSAGE: &str = "Please provide relevant health information only.";

/// Substring match against the block-list. Expects lower-cased input.
pub fn contains_blocked_term(text: &str) -> bool {
    BLOCKED_TERMS.iter().any(|term| text.contains(term))
}

/// Coarse content filter over the two optional health fields.
pub fn validate(disease: &str, allergies: &str) -> ValidationOutcome {
    let combined = format!("{} {}", disease, allergies).to_lowercase();

    if contains_blocked_term(&combined) {
        return ValidationOutcome::invalid(REJECTION_MESSAGE);
    }

    ValidationOutcome::valid()
}
