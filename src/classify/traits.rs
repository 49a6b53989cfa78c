// Topic classifier trait: the swap-ready abstraction.

use anyhow::Result;
use async_trait::async_trait;

use super::labels::Category;

/// Trait for assigning one category to each title in a batch.
///
/// Implementations return exactly one category per title, in input order.
/// An error anywhere aborts the whole batch; there are no partial results.
#[async_trait]
pub trait TopicClassifier: Send + Sync {
    async fn classify(&self, titles: &[String]) -> Result<Vec<Category>>;
}
