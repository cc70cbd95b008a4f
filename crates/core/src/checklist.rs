//! Yes/no checklists scored into qualitative tiers.
//!
//! Scoring is a pure function of the answers and the caller's
//! [`Thresholds`]: the number (or weight) of "yes" answers at or above
//! `high` is [`Tier::High`], at or above `medium` is [`Tier::Medium`],
//! anything less is [`Tier::Low`]. An empty answer set is therefore `Low`.
//!
//! # Example
//!
//! ```rust
//! use overview_core::checklist::{Answers, Thresholds, Tier, score};
//!
//! let thresholds = Thresholds::new(3, 2).unwrap();
//! let answers = Answers::from([("a".to_string(), true), ("b".to_string(), true)]);
//! assert_eq!(score(&answers, &thresholds), Tier::Medium);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::{ConfigError, NotReady};

/// Answers keyed by question text.
pub type Answers = BTreeMap<String, bool>;

/// Closing caption shown under every assessment.
pub const DISCLAIMER: &str =
    "Disclaimer: This is a simplified assessment. Google's actual process is complex and dynamic.";

/// Qualitative result of a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Low => f.write_str("Low"),
            Tier::Medium => f.write_str("Medium"),
            Tier::High => f.write_str("High"),
        }
    }
}

/// Cut-off points for [`Tier::High`] and [`Tier::Medium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    high: u32,
    medium: u32,
}

impl Thresholds {
    /// `medium` must not exceed `high`.
    pub fn new(high: u32, medium: u32) -> Result<Self, ConfigError> {
        if medium > high {
            return Err(ConfigError::InvalidThresholds { high, medium });
        }
        Ok(Self { high, medium })
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn medium(&self) -> u32 {
        self.medium
    }

    /// Maps a point total onto a tier.
    pub fn tier(&self, points: u32) -> Tier {
        if points >= self.high {
            Tier::High
        } else if points >= self.medium {
            Tier::Medium
        } else {
            Tier::Low
        }
    }
}

/// Counts `true` answers and maps the count to a tier.
pub fn score(answers: &Answers, thresholds: &Thresholds) -> Tier {
    let count = answers.values().filter(|&&yes| yes).count();
    thresholds.tier(u32::try_from(count).unwrap_or(u32::MAX))
}

/// A checklist question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub text: String,
    pub weight: u32,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), weight: 1 }
    }
}

/// Per-tier messages; `{topic}` is replaced with the assessed query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierMessages {
    pub high: String,
    pub medium: String,
    pub low: String,
}

impl TierMessages {
    pub fn render(&self, tier: Tier, topic: &str) -> String {
        let template = match tier {
            Tier::High => &self.high,
            Tier::Medium => &self.medium,
            Tier::Low => &self.low,
        };
        template.replace("{topic}", topic)
    }
}

/// A statically declared checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checklist {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
    pub thresholds: Thresholds,
    #[serde(skip)]
    pub messages: TierMessages,
}

/// One scored checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistResult {
    pub id: String,
    pub title: String,
    pub points: u32,
    pub tier: Tier,
    pub message: String,
}

impl Checklist {
    /// Sums the weights of declared questions answered `true`.
    /// Answers to questions not on this checklist are ignored.
    pub fn points(&self, answers: &Answers) -> u32 {
        self.questions
            .iter()
            .filter(|q| answers.get(&q.text).copied().unwrap_or(false))
            .map(|q| q.weight)
            .sum()
    }

    pub fn score(&self, answers: &Answers) -> Tier {
        self.thresholds.tier(self.points(answers))
    }

    pub fn assess(&self, topic: &str, answers: &Answers) -> ChecklistResult {
        let points = self.points(answers);
        let tier = self.thresholds.tier(points);
        ChecklistResult {
            id: self.id.clone(),
            title: self.title.clone(),
            points,
            tier,
            message: self.messages.render(tier, topic),
        }
    }

    /// Answers in question order from positional flags; missing flags are `false`.
    pub fn answers_from_flags(&self, flags: &[bool]) -> Answers {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| (q.text.clone(), flags.get(i).copied().unwrap_or(false)))
            .collect()
    }

    /// "When might an AI Overview appear?" Six questions, High at 4, Medium at 2.
    pub fn query_characteristics() -> Self {
        Self {
            id: "when".into(),
            title: "Considerations for When an Overview Might Appear".into(),
            questions: [
                "Is it primarily an informational query (how-to, what-is, pros/cons)?",
                "Does it potentially require synthesizing info from multiple sources?",
                "Is there sufficient, high-quality, reliable information available online about this?",
                "Is the topic NOT overly niche or brand new without established sources?",
                "If YMYL, is the information exceptionally high E-E-A-T and corroborated?",
                "Does it comply with Google's content policies?",
            ]
            .into_iter()
            .map(Question::new)
            .collect(),
            thresholds: Thresholds { high: 4, medium: 2 },
            messages: TierMessages {
                high: "An AI Overview for '{topic}' seems plausible based on query characteristics.".into(),
                medium: "An AI Overview for '{topic}' might be possible, but some factors could limit it.".into(),
                low: "An AI Overview for '{topic}' might be less likely based on query characteristics alone.".into(),
            },
        }
    }

    /// "Your content being used." Five questions, High at 3, Medium at 2.
    pub fn content_characteristics() -> Self {
        Self {
            id: "content".into(),
            title: "Considerations for Your Content Being Used".into(),
            questions: [
                "Is your content directly relevant to this query/topic?",
                "Does your content demonstrate strong E-E-A-T?",
                "Is the information in your content likely corroborated by other reputable sources?",
                "Is your content up-to-date (if timeliness is important for this topic)?",
                "Is your content clear, concise, and well-structured for easy summarization?",
            ]
            .into_iter()
            .map(Question::new)
            .collect(),
            thresholds: Thresholds { high: 3, medium: 2 },
            messages: TierMessages {
                high: "Your content seems to have good characteristics to be considered for an AI Overview on '{topic}'."
                    .into(),
                medium: "Your content has some good points, but enhancing E-E-A-T, clarity, or corroboration could improve its chances for AI Overviews on '{topic}'.".into(),
                low: "Your content might need significant improvement in E-E-A-T, relevance, or clarity to be featured in AI Overviews for '{topic}'.".into(),
            },
        }
    }
}

/// The readiness self-assessment: both checklists for one topic.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessChecker {
    pub query: Checklist,
    pub content: Checklist,
}

/// Both tiers plus the disclaimer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub topic: String,
    pub query: ChecklistResult,
    pub content: ChecklistResult,
    pub disclaimer: &'static str,
}

impl Default for ReadinessChecker {
    fn default() -> Self {
        Self { query: Checklist::query_characteristics(), content: Checklist::content_characteristics() }
    }
}

impl ReadinessChecker {
    /// Scores both checklists. The topic must be non-blank.
    pub fn assess(&self, topic: &str, query: &Answers, content: &Answers) -> Result<Assessment, NotReady> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(NotReady::MissingTopic);
        }

        Ok(Assessment {
            topic: topic.to_string(),
            query: self.query.assess(topic, query),
            content: self.content.assess(topic, content),
            disclaimer: DISCLAIMER,
        })
    }
}
