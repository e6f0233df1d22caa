use platewise_core::domain::food_analysis::entities::HealthProfile;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// The two free-text health fields, as submitted by a form or a JSON body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct HealthProfileForm {
    #[serde(default)]
    #[validate(length(max = 1000, message = "disease must be at most 1000 characters"))]
    pub disease: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "allergies must be at most 1000 characters"))]
    pub allergies: String,
}

impl From<HealthProfileForm> for HealthProfile {
    fn from(form: HealthProfileForm) -> Self {
        HealthProfile::new(form.disease, form.allergies)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct DemoAnalysisRequest {
    #[serde(default)]
    #[validate(length(max = 1000, message = "disease must be at most 1000 characters"))]
    pub disease: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "allergies must be at most 1000 characters"))]
    pub allergies: String,
    /// Optional `data:image/...;base64,` URL kept alongside the mock result.
    #[serde(default)]
    pub image: Option<String>,
}

impl DemoAnalysisRequest {
    pub fn profile(&self) -> HealthProfile {
        HealthProfile::new(self.disease.clone(), self.allergies.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlong_field_is_rejected() {
        let form = HealthProfileForm {
            disease: "a".repeat(1001),
            allergies: String::new(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_profile_text_is_kept_verbatim() {
        let profile = HealthProfile::from(HealthProfileForm {
            disease: "  Type 2 diabetes\n".to_string(),
            allergies: "\tpeanuts ".to_string(),
        });
        assert_eq!(profile, HealthProfile::new("  Type 2 diabetes\n", "\tpeanuts "));

        let request = DemoAnalysisRequest {
            disease: "  Type 2 diabetes\n".to_string(),
            ..Default::default()
        };
        assert_eq!(request.profile().diseases, "  Type 2 diabetes\n");
    }

    #[test]
    fn test_demo_request_fields_default() {
        let request: DemoAnalysisRequest = serde_json::from_str(r#"{"disease":"gout"}"#).unwrap();
        assert_eq!(request.profile(), HealthProfile::new("gout", ""));
        assert!(request.image.is_none());
    }
}
