//! Port interfaces for learning content

use async_trait::async_trait;
use pathwise_domain::{LearningPage, Result};

#[async_trait]
pub trait LearningGateway: Send + Sync {
    /// Page `page_number` of a track's learning path
    ///
    /// Returns `NotFound` when the track has no such page yet.
    async fn learning_page(&self, slug: &str, page_number: u32) -> Result<LearningPage>;
}
