use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

/// String-keyed, string-valued store shared by the capture and render stages.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;

    /// Overwrites any previous value.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}
