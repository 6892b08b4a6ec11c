use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// One of the five axes an article is scored along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BiasDimension {
    IdeologicalStance,
    FactualGrounding,
    FramingChoices,
    EmotionalTone,
    SourceTransparency,
}

impl BiasDimension {
    pub const ALL: [BiasDimension; 5] = [
        BiasDimension::IdeologicalStance,
        BiasDimension::FactualGrounding,
        BiasDimension::FramingChoices,
        BiasDimension::EmotionalTone,
        BiasDimension::SourceTransparency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BiasDimension::IdeologicalStance => "ideological_stance",
            BiasDimension::FactualGrounding => "factual_grounding",
            BiasDimension::FramingChoices => "framing_choices",
            BiasDimension::EmotionalTone => "emotional_tone",
            BiasDimension::SourceTransparency => "source_transparency",
        }
    }
}

impl fmt::Display for BiasDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiasDimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BiasDimension::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| Error::InvalidDataset(format!("Unknown bias dimension: {}", s)))
    }
}

/// Independent scores in `[0.0, 1.0]`, one per dimension. They are not a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BiasScores {
    pub ideological_stance: f64,
    pub factual_grounding: f64,
    pub framing_choices: f64,
    pub emotional_tone: f64,
    pub source_transparency: f64,
}

impl BiasScores {
    pub fn get(&self, dimension: BiasDimension) -> f64 {
        match dimension {
            BiasDimension::IdeologicalStance => self.ideological_stance,
            BiasDimension::FactualGrounding => self.factual_grounding,
            BiasDimension::FramingChoices => self.framing_choices,
            BiasDimension::EmotionalTone => self.emotional_tone,
            BiasDimension::SourceTransparency => self.source_transparency,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for dimension in BiasDimension::ALL {
            let score = self.get(dimension);
            if !is_unit_interval(score) {
                return Err(Error::InvalidDataset(format!(
                    "{} score {} is outside [0, 1]",
                    dimension, score
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn is_unit_interval(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// Half-open character span `[start, end)` into an article's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    pub dimension: BiasDimension,
    pub note: Option<String>,
}

impl Highlight {
    pub fn new(start: usize, end: usize, dimension: BiasDimension, note: &str) -> Self {
        Self {
            start,
            end,
            dimension,
            note: Some(note.to_string()),
        }
    }

    /// Offsets count chars, not bytes.
    pub fn validate(&self, content: &str) -> Result<()> {
        let len = content.chars().count();
        if self.start >= self.end || self.end > len {
            return Err(Error::InvalidDataset(format!(
                "highlight [{}, {}) does not fit content of length {}",
                self.start, self.end, len
            )));
        }
        Ok(())
    }

    /// The text covered by this span, or `None` if it falls outside `content`.
    pub fn slice<'a>(&self, content: &'a str) -> Option<&'a str> {
        if self.start >= self.end {
            return None;
        }
        let byte_at = |n: usize| {
            content
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(content.len()))
                .nth(n)
        };
        let start = byte_at(self.start)?;
        let end = byte_at(self.end)?;
        Some(&content[start..end])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PrimarySource {
    pub title: String,
    pub url: String,
}

impl PrimarySource {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub source: String,
    pub date: DateTime<Utc>,
    pub bias: BiasScores,
    pub excerpt: Option<String>,
}

/// An article summary plus its body. Summary fields are flattened on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub summary: ArticleSummary,
    pub content: String,
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub primary_sources: Vec<PrimarySource>,
}

impl ArticleDetail {
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    pub fn summary(&self) -> ArticleSummary {
        self.summary.clone()
    }

    pub fn validate(&self) -> Result<()> {
        let in_article = |e: Error| match e {
            Error::InvalidDataset(msg) => {
                Error::InvalidDataset(format!("article {}: {}", self.id(), msg))
            }
            other => other,
        };
        self.summary.bias.validate().map_err(in_article)?;
        for highlight in &self.highlights {
            highlight.validate(&self.content).map_err(in_article)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClusterArticle {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NarrativeCluster {
    pub id: String,
    pub title: String,
    pub description: String,
    pub divergence_index: f64,
    pub top_articles: Vec<ClusterArticle>,
}

impl NarrativeCluster {
    pub fn validate(&self) -> Result<()> {
        if !is_unit_interval(self.divergence_index) {
            return Err(Error::InvalidDataset(format!(
                "narrative {}: divergence index {} is outside [0, 1]",
                self.id, self.divergence_index
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scores(value: f64) -> BiasScores {
        BiasScores {
            ideological_stance: value,
            factual_grounding: value,
            framing_choices: value,
            emotional_tone: value,
            source_transparency: value,
        }
    }

    fn article(content: &str, highlights: Vec<Highlight>) -> ArticleDetail {
        ArticleDetail {
            summary: ArticleSummary {
                id: "t1".to_string(),
                title: "Test Article".to_string(),
                source: "test".to_string(),
                date: Utc.with_ymd_and_hms(2024, 11, 3, 9, 0, 0).unwrap(),
                bias: scores(0.5),
                excerpt: None,
            },
            content: content.to_string(),
            highlights,
            primary_sources: vec![],
        }
    }

    #[test]
    fn test_dimension_names_round_trip() {
        for dimension in BiasDimension::ALL {
            assert_eq!(dimension.as_str().parse::<BiasDimension>().unwrap(), dimension);
            let json = serde_json::to_value(dimension).unwrap();
            assert_eq!(json, serde_json::json!(dimension.as_str()));
        }
        assert!("tone".parse::<BiasDimension>().is_err());
    }

    #[test]
    fn test_scores_bounds_are_inclusive() {
        assert!(scores(0.0).validate().is_ok());
        assert!(scores(1.0).validate().is_ok());
        assert!(scores(1.01).validate().is_err());
        assert!(scores(-0.1).validate().is_err());
        assert!(scores(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_highlight_span_checks() {
        let content = "Protesters gathered downtown.";
        assert!(Highlight::new(0, 10, BiasDimension::EmotionalTone, "x").validate(content).is_ok());
        assert!(Highlight::new(0, 29, BiasDimension::EmotionalTone, "x").validate(content).is_ok());
        assert!(Highlight::new(0, 30, BiasDimension::EmotionalTone, "x").validate(content).is_err());
        assert!(Highlight::new(5, 5, BiasDimension::EmotionalTone, "x").validate(content).is_err());
    }

    #[test]
    fn test_highlight_slice_counts_chars() {
        let content = "Política económica";
        let highlight = Highlight::new(9, 18, BiasDimension::FramingChoices, "x");
        assert!(highlight.validate(content).is_ok());
        assert_eq!(highlight.slice(content), Some("económica"));
        assert_eq!(Highlight::new(0, 40, BiasDimension::FramingChoices, "x").slice(content), None);
    }

    #[test]
    fn test_detail_flattens_summary() {
        let detail = article("Some content", vec![]);
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], "t1");
        assert_eq!(json["source"], "test");
        assert_eq!(json["excerpt"], serde_json::Value::Null);
        assert_eq!(json["primary_sources"], serde_json::json!([]));
        assert!(json.get("summary").is_none());

        let back: ArticleDetail = serde_json::from_value(json).unwrap();
        assert_eq!(back, detail);
    }

    #[test]
    fn test_detail_validation_names_article() {
        let detail = article("short", vec![Highlight::new(2, 9, BiasDimension::FactualGrounding, "x")]);
        let err = detail.validate().unwrap_err();
        assert!(err.to_string().contains("article t1"));
    }

    #[test]
    fn test_cluster_divergence_bounds() {
        let mut cluster = NarrativeCluster {
            id: "n1".to_string(),
            title: "Cluster".to_string(),
            description: "desc".to_string(),
            divergence_index: 0.72,
            top_articles: vec![],
        };
        assert!(cluster.validate().is_ok());
        cluster.divergence_index = 1.2;
        assert!(cluster.validate().is_err());
    }
}
