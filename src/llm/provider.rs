use async_trait::async_trait;

use crate::error::Result;
use crate::models::Classification;

/// Scores a release's breaking-change risk from its title and notes.
///
/// Implementations are stateless: repeated calls on the same input may
/// legitimately disagree (model non-determinism is not a bug). Errors are
/// absorbed by the pipeline into `Classification::degraded`, so a failing
/// classifier can never block delivery.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, title: &str, body: &str) -> Result<Classification>;
    fn name(&self) -> &str;
}
