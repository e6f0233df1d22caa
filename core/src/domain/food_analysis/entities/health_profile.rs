use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The two optional free-text health fields supplied with an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthProfile {
    #[serde(default)]
    pub diseases: String,
    #[serde(default)]
    pub allergies: String,
}

impl HealthProfile {
    pub fn new(diseases: impl Into<String>, allergies: impl Into<String>) -> Self {
        Self {
            diseases: diseases.into(),
            allergies: allergies.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty() && self.allergies.is_empty()
    }
}
