use async_trait::async_trait;
use crate::types::{ArticleDetail, ArticleSummary, NarrativeCluster};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All article summaries, most recent first. Equal dates keep insertion order.
    async fn list_articles(&self) -> Result<Vec<ArticleSummary>>;

    /// Full detail for one article, `Error::NotFound` when the id is unknown.
    async fn get_article(&self, id: &str) -> Result<ArticleDetail>;

    /// Narrative clusters in their fixed order.
    async fn list_narratives(&self) -> Result<Vec<NarrativeCluster>>;
}
