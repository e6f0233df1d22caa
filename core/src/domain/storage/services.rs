use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::entities::{AnalysisResult, FoodImage},
    storage::ports::KeyValueStore,
};

pub const ANALYSIS_KEY: &str = "foodAnalysisData";
pub const IMAGE_KEY: &str = "foodImage";

/// Reads and writes the single analysis slot and its image.
pub struct AnalysisStore<KV: KeyValueStore> {
    store: Arc<KV>,
}

impl<KV: KeyValueStore> Clone for AnalysisStore<KV> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<KV: KeyValueStore> AnalysisStore<KV> {
    pub fn new(store: KV) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Stores a record together with its image, or with no image.
    ///
    /// The image slot is written first. If the record write then fails the
    /// previous image is put back, so a record is never paired with a photo
    /// from another analysis.
    pub async fn save(
        &self,
        record: &AnalysisResult,
        image: Option<&FoodImage>,
    ) -> Result<(), CoreError> {
        let value = serde_json::to_string(record).map_err(|e| {
            error!("Failed to serialize analysis record: {}", e);
            CoreError::StorageError(e.to_string())
        })?;

        let previous_image = self.store.get(IMAGE_KEY).await?;
        match image {
            Some(image) => self.store.set(IMAGE_KEY, image.to_data_url()).await?,
            None => self.store.remove(IMAGE_KEY).await?,
        }

        if let Err(e) = self.store.set(ANALYSIS_KEY, value).await {
            error!(error = %e, "Failed to store analysis record, restoring previous image");
            let restored = match previous_image {
                Some(previous) => self.store.set(IMAGE_KEY, previous).await,
                None => self.store.remove(IMAGE_KEY).await,
            };
            if let Err(restore_error) = restored {
                error!(error = %restore_error, "Failed to restore previous image");
            }
            return Err(e);
        }

        Ok(())
    }

    /// A stored value that no longer parses is treated as absent.
    pub async fn load(&self) -> Result<Option<AnalysisResult>, CoreError> {
        let Some(value) = self.store.get(ANALYSIS_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&value) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(error = %e, "Stored analysis record is malformed, ignoring it");
                Ok(None)
            }
        }
    }

    pub async fn load_image(&self) -> Result<Option<String>, CoreError> {
        self.store.get(IMAGE_KEY).await
    }
}
