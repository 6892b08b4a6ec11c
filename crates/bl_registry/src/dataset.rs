//! The reference dataset served by the API.
//!
//! Scores are hand-picked for the first five articles and generated from the
//! seed position for the rest. Nothing here is derived from the article text.

use bl_core::{
    ArticleDetail, ArticleSummary, BiasDimension, BiasScores, ClusterArticle, Error, Highlight,
    NarrativeCluster, PrimarySource, Result,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};

use BiasDimension::*;

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            Error::InvalidDataset(format!(
                "invalid timestamp {}-{}-{} {}:{}",
                year, month, day, hour, minute
            ))
        })
}

fn scores(
    ideological_stance: f64,
    factual_grounding: f64,
    framing_choices: f64,
    emotional_tone: f64,
    source_transparency: f64,
) -> BiasScores {
    BiasScores {
        ideological_stance,
        factual_grounding,
        framing_choices,
        emotional_tone,
        source_transparency,
    }
}

struct Literal {
    id: &'static str,
    title: &'static str,
    source: &'static str,
    date: DateTime<Utc>,
    bias: BiasScores,
    excerpt: &'static str,
    content: &'static str,
    highlights: Vec<Highlight>,
    primary_sources: Vec<PrimarySource>,
}

impl Literal {
    fn into_detail(self) -> ArticleDetail {
        ArticleDetail {
            summary: ArticleSummary {
                id: self.id.to_string(),
                title: self.title.to_string(),
                source: self.source.to_string(),
                date: self.date,
                bias: self.bias,
                excerpt: Some(self.excerpt.to_string()),
            },
            content: self.content.to_string(),
            highlights: self.highlights,
            primary_sources: self.primary_sources,
        }
    }
}

/// Input for the formula-scored articles.
struct Seed {
    id: &'static str,
    title: &'static str,
    source: &'static str,
    content: &'static str,
    highlights: [(usize, usize, BiasDimension, &'static str); 2],
}

const SEEDS: [Seed; 5] = [
    Seed {
        id: "a6",
        title: "Tech Giants Face New Regulatory Scrutiny",
        source: "Digital Times",
        content: "Silicon Valley companies are bracing for unprecedented regulatory oversight as lawmakers draft sweeping legislation targeting digital monopolies. Industry leaders warn of stifling innovation, while consumer advocates celebrate the long-overdue reforms.",
        highlights: [
            (0, 14, IdeologicalStance, "Corporate framing"),
            (78, 95, EmotionalTone, "Loaded language"),
        ],
    },
    Seed {
        id: "a7",
        title: "Climate Summit Yields Mixed Results",
        source: "Global Watch",
        content: "International delegates concluded climate negotiations with what organizers called 'meaningful progress' despite failing to reach consensus on critical emissions targets. Environmental groups expressed disappointment with the watered-down commitments.",
        highlights: [
            (75, 93, FramingChoices, "Euphemistic language"),
            (165, 178, EmotionalTone, "Strong sentiment"),
        ],
    },
    Seed {
        id: "a8",
        title: "Healthcare Reform Proposal Sparks Debate",
        source: "Policy Tribune",
        content: "The administration's healthcare overhaul has divided stakeholders across the political spectrum. Medical professionals cite concerns about implementation timelines, while patient advocacy groups hail the expanded coverage provisions.",
        highlights: [
            (20, 29, FramingChoices, "Neutral framing"),
            (67, 74, IdeologicalStance, "Political positioning"),
        ],
    },
    Seed {
        id: "a9",
        title: "Economic Indicators Show Cautious Optimism",
        source: "Financial Herald",
        content: "Leading economists interpret recent data as signs of sustained recovery, though inflation concerns continue to temper market enthusiasm. Federal Reserve officials maintain their data-dependent approach to policy adjustments.",
        highlights: [
            (46, 58, FactualGrounding, "Expert analysis"),
            (102, 108, EmotionalTone, "Cautious language"),
        ],
    },
    Seed {
        id: "a10",
        title: "Education Technology Transforms Classrooms",
        source: "Learning Today",
        content: "Schools nationwide report significant improvements in student engagement following the implementation of AI-powered learning platforms. However, digital equity concerns persist in underserved communities.",
        highlights: [
            (15, 21, FactualGrounding, "Quantitative claim"),
            (124, 132, FramingChoices, "Problem framing"),
        ],
    },
];

/// Scores for the seed at `position`, clamped to `[0, 1]`.
pub fn generated_scores(position: usize) -> BiasScores {
    let step = |base: f64, modulus: usize, increment: f64| {
        (base + (position % modulus) as f64 * increment).clamp(0.0, 1.0)
    };
    scores(
        step(0.35, 4, 0.15),
        step(0.65, 3, 0.1),
        step(0.45, 5, 0.12),
        step(0.25, 4, 0.18),
        step(0.55, 3, 0.15),
    )
}

fn from_seed(position: usize, seed: &Seed, base_date: DateTime<Utc>) -> ArticleDetail {
    ArticleDetail {
        summary: ArticleSummary {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            source: seed.source.to_string(),
            date: base_date + Duration::days(position as i64 + 6),
            bias: generated_scores(position),
            excerpt: Some(format!(
                "Analysis of {} reveals nuanced coverage patterns...",
                seed.title.to_lowercase()
            )),
        },
        content: seed.content.to_string(),
        highlights: seed
            .highlights
            .iter()
            .map(|&(start, end, dimension, note)| Highlight::new(start, end, dimension, note))
            .collect(),
        primary_sources: vec![
            PrimarySource::new("Research Report", "https://example.org/research"),
            PrimarySource::new("Official Statement", "https://example.org/statement"),
        ],
    }
}

/// Articles `a1`..`a10` in insertion order.
pub fn reference_articles() -> Result<Vec<ArticleDetail>> {
    let literals = vec![
        Literal {
            id: "a1",
            title: "Committee Releases Preliminary Findings Amid Debate",
            source: "Civic Daily",
            date: utc(2024, 11, 3, 9, 0)?,
            bias: scores(0.45, 0.82, 0.61, 0.35, 0.9),
            excerpt: "Preliminary findings spark debate over framing and transparency...",
            content: "The committee released its preliminary findings on Tuesday, \
                noting significant inconsistencies in the testimony of key witnesses. \
                Critics argue the report downplays systemic issues, while supporters claim it emphasizes concrete steps forward. \
                According to documents published alongside the report, several data sources were made publicly accessible.",
            highlights: vec![
                Highlight::new(4, 13, IdeologicalStance, "Ambiguous agency/attribution"),
                Highlight::new(88, 102, FramingChoices, "Downplays responsibility"),
                Highlight::new(247, 279, SourceTransparency, "Public data availability"),
            ],
            primary_sources: vec![
                PrimarySource::new("Hearing Transcript", "https://example.org/transcript.pdf"),
                PrimarySource::new("Document Repository", "https://example.org/repo"),
            ],
        },
        Literal {
            id: "a2",
            title: "Editorial Questions Proposed Changes",
            source: "Beacon Tribune",
            date: utc(2024, 11, 2, 14, 30)?,
            bias: scores(0.62, 0.56, 0.71, 0.7, 0.52),
            excerpt: "Editorial frames proposal as distraction amid economic concerns...",
            content: "In a sharply worded editorial, the publication criticized the proposed changes, \
                calling them a distraction from pressing economic concerns. \
                Analysts, however, pointed to multiple studies indicating modest long-term benefits.",
            highlights: vec![
                Highlight::new(5, 22, EmotionalTone, "Loaded language"),
                Highlight::new(165, 197, FactualGrounding, "References unnamed studies"),
            ],
            primary_sources: vec![PrimarySource::new(
                "Policy Whitepaper",
                "https://example.org/whitepaper",
            )],
        },
        Literal {
            id: "a3",
            title: "Local Groups Launch Transparency Initiative",
            source: "Open Ledger",
            date: utc(2024, 11, 1, 8, 15)?,
            bias: scores(0.38, 0.88, 0.44, 0.25, 0.96),
            excerpt: "Community organizations publish datasets and invite audits...",
            content: "Community groups announced a new transparency initiative. \
                Data will be published in open formats with clear provenance.",
            highlights: vec![
                Highlight::new(0, 16, FramingChoices, "Collective agency"),
                Highlight::new(73, 112, SourceTransparency, "Open data commitment"),
            ],
            primary_sources: vec![PrimarySource::new(
                "Open Data Portal",
                "https://example.org/open-data",
            )],
        },
        Literal {
            id: "a4",
            title: "Experts Split on Long-Term Impact of Policy",
            source: "Policy Watch",
            date: utc(2024, 10, 29, 12, 0)?,
            bias: scores(0.5, 0.67, 0.58, 0.42, 0.6),
            excerpt: "Experts disagree over the policy's long-term outcomes...",
            content: "Experts expressed differing views on the policy's long-term impact. \
                Several cited case studies with mixed results.",
            highlights: vec![
                Highlight::new(0, 7, IdeologicalStance, "Appeal to authority"),
                Highlight::new(87, 98, FactualGrounding, "Case studies referenced"),
            ],
            primary_sources: vec![],
        },
        Literal {
            id: "a5",
            title: "Protests Erupt as Vote Nears",
            source: "Metro Herald",
            date: utc(2024, 10, 28, 18, 45)?,
            bias: scores(0.57, 0.49, 0.76, 0.82, 0.4),
            excerpt: "Protests intensify ahead of the contentious vote...",
            content: "Protesters gathered downtown, with organizers calling for urgent action. \
                Officials emphasized safety and order in the lead-up to the vote.",
            highlights: vec![
                Highlight::new(0, 10, EmotionalTone, "Intensifying language"),
                Highlight::new(96, 115, FramingChoices, "Officials' emphasis"),
            ],
            primary_sources: vec![],
        },
    ];

    let base_date = utc(2024, 10, 20, 9, 0)?;
    let mut articles: Vec<ArticleDetail> = literals.into_iter().map(Literal::into_detail).collect();
    articles.extend(
        SEEDS
            .iter()
            .enumerate()
            .map(|(position, seed)| from_seed(position, seed, base_date)),
    );
    Ok(articles)
}

/// Clusters `n1`..`n6`. Reference titles are copied from `articles`.
pub fn reference_narratives(articles: &[ArticleDetail]) -> Result<Vec<NarrativeCluster>> {
    let refs = |ids: &[&str]| -> Result<Vec<ClusterArticle>> {
        ids.iter()
            .map(|id| {
                articles
                    .iter()
                    .find(|a| a.id() == *id)
                    .map(|a| ClusterArticle {
                        id: a.id().to_string(),
                        title: a.summary.title.clone(),
                    })
                    .ok_or_else(|| {
                        Error::InvalidDataset(format!("narrative references unknown article {}", id))
                    })
            })
            .collect()
    };

    let cluster = |id: &str,
                   title: &str,
                   description: &str,
                   divergence_index: f64,
                   ids: &[&str]|
     -> Result<NarrativeCluster> {
        Ok(NarrativeCluster {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            divergence_index,
            top_articles: refs(ids)?,
        })
    };

    vec![
        cluster(
            "n1",
            "Tech Giants Face New Regulatory Scrutiny",
            "Coverage ranges from industry defense to consumer advocacy, revealing deep ideological divides on corporate accountability.",
            0.72,
            &["a6", "a1", "a3"],
        ),
        cluster(
            "n2",
            "Climate Summit Yields Mixed Results",
            "Reports balance cautious diplomatic language with urgent environmental advocacy.",
            0.58,
            &["a7", "a2"],
        ),
        cluster(
            "n3",
            "Healthcare Reform Proposal Sparks Debate",
            "Coverage reveals partisan framing differences, with policy implementation concerns competing against access advocacy.",
            0.45,
            &["a8", "a9"],
        ),
        cluster(
            "n4",
            "Economic Indicators Show Cautious Optimism",
            "Financial experts interpret market signals differently across outlets.",
            0.39,
            &["a9"],
        ),
        cluster(
            "n5",
            "Education Technology Transforms Classrooms",
            "Narratives split between innovation celebration and digital equity concerns.",
            0.52,
            &["a10"],
        ),
        cluster(
            "n6",
            "Committee Releases Preliminary Findings Amid Debate",
            "Official findings receive varied coverage depending on outlet perspective.",
            0.63,
            &["a1"],
        ),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_content_matches_highlights() {
        let articles = reference_articles().unwrap();
        let a1 = &articles[0];
        assert_eq!(a1.content.chars().count(), 349);
        assert_eq!(a1.highlights[0].slice(&a1.content), Some("committee"));

        let a5 = &articles[4];
        assert_eq!(a5.highlights[0].slice(&a5.content), Some("Protesters"));
    }

    #[test]
    fn test_generated_scores_follow_position() {
        let first = generated_scores(0);
        assert_eq!(first, scores(0.35, 0.65, 0.45, 0.25, 0.55));

        let third = generated_scores(2);
        assert!((third.ideological_stance - 0.65).abs() < 1e-9);
        assert!((third.factual_grounding - 0.85).abs() < 1e-9);
        assert!((third.emotional_tone - 0.61).abs() < 1e-9);

        for position in 0..20 {
            assert!(generated_scores(position).validate().is_ok());
        }
    }

    #[test]
    fn test_generated_dates_and_excerpts() {
        let articles = reference_articles().unwrap();
        let a6 = articles.iter().find(|a| a.id() == "a6").unwrap();
        assert_eq!(a6.summary.date, utc(2024, 10, 26, 9, 0).unwrap());
        assert_eq!(
            a6.summary.excerpt.as_deref(),
            Some("Analysis of tech giants face new regulatory scrutiny reveals nuanced coverage patterns...")
        );
        assert_eq!(a6.primary_sources.len(), 2);

        let a10 = articles.iter().find(|a| a.id() == "a10").unwrap();
        assert_eq!(a10.summary.date, utc(2024, 10, 30, 9, 0).unwrap());
    }

    #[test]
    fn test_narratives_copy_article_titles() {
        let articles = reference_articles().unwrap();
        let narratives = reference_narratives(&articles).unwrap();
        assert_eq!(narratives.len(), 6);
        assert_eq!(narratives[0].top_articles[0].id, "a6");
        assert_eq!(
            narratives[0].top_articles[0].title,
            "Tech Giants Face New Regulatory Scrutiny"
        );
    }

    #[test]
    fn test_narratives_reject_missing_article() {
        let articles: Vec<ArticleDetail> = reference_articles()
            .unwrap()
            .into_iter()
            .filter(|a| a.id() != "a9")
            .collect();
        let err = reference_narratives(&articles).unwrap_err();
        assert!(err.to_string().contains("a9"));
    }
}
