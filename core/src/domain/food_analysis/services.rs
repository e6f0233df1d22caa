use tracing::{info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::{
        content_filter::validate,
        entities::{AnalysisResult, FoodImage, HealthProfile},
        interpreter::interpret,
        mock::generate_mock,
        ports::{FoodAnalysisService, LLMClient},
        request_builder::build_analysis_request,
        value_objects::{AnalyzeFoodInput, Interpretation},
    },
    pipeline::run_pipeline,
    storage::ports::KeyValueStore,
};

impl<LLM, KV> FoodAnalysisService for Service<LLM, KV>
where
    LLM: LLMClient,
    KV: KeyValueStore,
{
    async fn analyze_food(&self, input: AnalyzeFoodInput) -> Result<AnalysisResult, CoreError> {
        // 1. Validate health text
        let validation = validate(&input.profile.diseases, &input.profile.allergies);
        if !validation.valid {
            return Err(CoreError::Validation(validation.message.unwrap_or_default()));
        }

        // 2. Build request
        let request = build_analysis_request(&input.image, &input.profile, &self.generation);

        // 3. Call LLM
        let raw_response = self.llm_client.generate_content(request).await?;

        // 4. Interpret
        let record = match interpret(&raw_response, &input.profile)? {
            Interpretation::Analyzed(record) => record,
            Interpretation::Degraded(record) => {
                warn!("Model reply could not be parsed, storing fallback record");
                record
            }
            Interpretation::Declined { reason, message } => {
                info!(reason = %reason, "Model declined to analyze the image");
                return Err(CoreError::ServiceDeclined { reason, message });
            }
        };

        // 5. Persist only once a complete record exists
        self.analysis_store.save(&record, Some(&input.image)).await?;

        info!(
            food_item = record.food_item.as_deref().unwrap_or("-"),
            "Food analysis stored"
        );
        Ok(record)
    }

    async fn run_demo_analysis(
        &self,
        profile: HealthProfile,
        image: Option<FoodImage>,
    ) -> Result<AnalysisResult, CoreError> {
        run_pipeline(&self.pipeline, |_| {}, || {}).await;

        let record = generate_mock(&mut rand::thread_rng(), &profile);
        self.analysis_store.save(&record, image.as_ref()).await?;

        info!("Demo analysis stored");
        Ok(record)
    }

    async fn latest_analysis(&self) -> Result<Option<AnalysisResult>, CoreError> {
        self.analysis_store.load().await
    }

    async fn latest_image(&self) -> Result<Option<String>, CoreError> {
        self.analysis_store.load_image().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use std::time::Duration;

    use super::*;
    use crate::{
        domain::{
            common::PipelineConfig,
            food_analysis::{
                ports::MockLLMClient,
                request_builder::GenerateContentRequest,
                value_objects::{GenerationSettings, RawServiceResponse},
            },
            storage::{
                ports::MockKeyValueStore,
                services::{ANALYSIS_KEY, IMAGE_KEY},
            },
        },
        infrastructure::storage::InMemoryKeyValueStore,
    };

    struct StubLLMClient {
        status: u16,
        text: String,
        calls: Arc<AtomicUsize>,
    }

    impl LLMClient for StubLLMClient {
        async fn generate_content(
            &self,
            _request: GenerateContentRequest,
        ) -> Result<RawServiceResponse, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let body = serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": self.text }] } }]
            });
            Ok(RawServiceResponse::new(self.status, body.to_string()))
        }
    }

    fn service(
        status: u16,
        text: &str,
    ) -> (
        Service<StubLLMClient, InMemoryKeyValueStore>,
        InMemoryKeyValueStore,
        Arc<AtomicUsize>,
    ) {
        let store = InMemoryKeyValueStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let client = StubLLMClient {
            status,
            text: text.to_string(),
            calls: Arc::clone(&calls),
        };
        let pipeline = PipelineConfig {
            tick_interval: Duration::from_millis(1),
            completion_delay: Duration::from_millis(1),
        };
        let service = Service::new(
            client,
            store.clone(),
            GenerationSettings::default(),
            pipeline,
        );
        (service, store, calls)
    }

    fn input(diseases: &str) -> AnalyzeFoodInput {
        AnalyzeFoodInput {
            image: FoodImage::from_bytes("image/jpeg", b"not really a jpeg").unwrap(),
            profile: HealthProfile::new(diseases, ""),
        }
    }

    const APPLE: &str = r#"{"foodItem":"Apple","calories":"95 kcal","protein":"0.5g","carbs":"25g","fat":"0.3g","healthCompatibility":"Compatible with diabetes in moderation.","confidence":0.9}"#;

    #[tokio::test]
    async fn test_analysis_is_stored_with_profile() {
        let (service, store, calls) = service(200, APPLE);

        let record = service.analyze_food(input("diabetes")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(record.food_item.as_deref(), Some("Apple"));
        assert_eq!(record.diseases.as_deref(), Some("diabetes"));
        assert_eq!(record.allergies.as_deref(), Some(""));

        let latest = service.latest_analysis().await.unwrap();
        assert_eq!(latest, Some(record));
        let image = service.latest_image().await.unwrap().unwrap();
        assert!(image.starts_with("data:image/jpeg;base64,"));
        assert!(store.get(ANALYSIS_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_declined_image_leaves_storage_untouched() {
        let (service, store, _) = service(
            200,
            r#"{"error":"non_food_image","message":"Not food."}"#,
        );

        let err = service.analyze_food(input("")).await.unwrap_err();

        assert_eq!(
            err,
            CoreError::ServiceDeclined {
                reason: "non_food_image".to_string(),
                message: "Not food.".to_string(),
            }
        );
        assert_eq!(store.get(ANALYSIS_KEY).await.unwrap(), None);
        assert_eq!(store.get(IMAGE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blocked_terms_never_reach_the_model() {
        let (service, store, calls) = service(200, APPLE);

        let err = service.analyze_food(input("how to kill pain")).await.unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.get(ANALYSIS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_http_failure_is_reported() {
        let mut client = MockLLMClient::new();
        client.expect_generate_content().times(1).returning(|_| {
            Box::pin(async { Ok(RawServiceResponse::new(503, String::new())) })
        });
        let service = Service::new(
            client,
            InMemoryKeyValueStore::new(),
            GenerationSettings::default(),
            PipelineConfig::default(),
        );

        let err = service.analyze_food(input("")).await.unwrap_err();

        assert_eq!(
            err,
            CoreError::ServiceHttpError {
                status: 503,
                message: None
            }
        );
        assert_eq!(service.latest_analysis().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unparseable_reply_stores_fallback() {
        let (service, _, _) = service(200, "I think this is a sandwich.");

        let record = service.analyze_food(input("")).await.unwrap();

        assert_eq!(record.confidence, Some(0.5));
        assert_eq!(service.latest_analysis().await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_demo_replaces_previous_image() {
        let (service, store, calls) = service(200, APPLE);
        service.analyze_food(input("")).await.unwrap();

        let record = service
            .run_demo_analysis(HealthProfile::new("hypertension", ""), None)
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(record.food_item.as_deref(), Some("Sample Food Item"));
        assert_eq!(record.diseases.as_deref(), Some("hypertension"));
        assert_eq!(service.latest_analysis().await.unwrap(), Some(record));
        assert_eq!(store.get(IMAGE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_image_write_stores_no_record() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Box::pin(async { Ok(None) }));
        store
            .expect_set()
            .withf(|key, _| key == IMAGE_KEY)
            .times(1)
            .returning(|_, _| {
                Box::pin(async { Err(CoreError::StorageError("disk full".to_string())) })
            });
        let client = StubLLMClient {
            status: 200,
            text: APPLE.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        };
        let service = Service::new(
            client,
            store,
            GenerationSettings::default(),
            PipelineConfig::default(),
        );

        let err = service.analyze_food(input("")).await.unwrap_err();

        assert_eq!(err, CoreError::StorageError("disk full".to_string()));
    }
}
