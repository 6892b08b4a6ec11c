use async_trait::async_trait;
use bl_core::{ArticleDetail, ArticleStore, ArticleSummary, Error, NarrativeCluster, Result};
use std::collections::HashMap;
use tracing::debug;

use crate::dataset;

/// Immutable article table, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct StaticRegistry {
    articles: Vec<ArticleDetail>,
    index: HashMap<String, usize>,
    by_recency: Vec<ArticleSummary>,
    narratives: Vec<NarrativeCluster>,
}

impl StaticRegistry {
    /// Builds a registry after checking ids, scores, spans and cluster references.
    pub fn from_parts(
        articles: Vec<ArticleDetail>,
        narratives: Vec<NarrativeCluster>,
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(articles.len());
        for (position, article) in articles.iter().enumerate() {
            article.validate()?;
            if index.insert(article.id().to_string(), position).is_some() {
                return Err(Error::InvalidDataset(format!(
                    "duplicate article id {}",
                    article.id()
                )));
            }
        }

        for narrative in &narratives {
            narrative.validate()?;
            if let Some(missing) = narrative
                .top_articles
                .iter()
                .find(|r| !index.contains_key(&r.id))
            {
                return Err(Error::InvalidDataset(format!(
                    "narrative {} references unknown article {}",
                    narrative.id, missing.id
                )));
            }
        }

        // sort_by is stable, so equal dates keep insertion order
        let mut by_recency: Vec<ArticleSummary> =
            articles.iter().map(ArticleDetail::summary).collect();
        by_recency.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(Self {
            articles,
            index,
            by_recency,
            narratives,
        })
    }

    /// The hardcoded dataset the service ships with.
    pub fn reference() -> Result<Self> {
        let articles = dataset::reference_articles()?;
        let narratives = dataset::reference_narratives(&articles)?;
        Self::from_parts(articles, narratives)
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn narrative_count(&self) -> usize {
        self.narratives.len()
    }

    pub fn find(&self, id: &str) -> Option<&ArticleDetail> {
        self.index.get(id).map(|&position| &self.articles[position])
    }
}

#[async_trait]
impl ArticleStore for StaticRegistry {
    async fn list_articles(&self) -> Result<Vec<ArticleSummary>> {
        Ok(self.by_recency.clone())
    }

    async fn get_article(&self, id: &str) -> Result<ArticleDetail> {
        match self.find(id) {
            Some(article) => Ok(article.clone()),
            None => {
                debug!("Article {} not found", id);
                Err(Error::NotFound(format!("article {}", id)))
            }
        }
    }

    async fn list_narratives(&self) -> Result<Vec<NarrativeCluster>> {
        Ok(self.narratives.clone())
    }
}
