pub mod error;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use storage::ArticleStore;
pub use types::{
    ArticleDetail, ArticleSummary, BiasDimension, BiasScores, ClusterArticle, Highlight,
    NarrativeCluster, PrimarySource,
};
