use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-level tone label derived from a mean sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[serde(rename = "highly negative")]
    HighlyNegative,
    #[serde(rename = "negative")]
    Negative,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "highly positive")]
    HighlyPositive,
}

impl Tone {
    /// Maps a mean sentiment score to its tone bucket.
    pub fn from_score(score: f64) -> Self {
        if score < -0.3 {
            Tone::HighlyNegative
        } else if score < -0.1 {
            Tone::Negative
        } else if score < 0.1 {
            Tone::Neutral
        } else if score < 0.3 {
            Tone::Positive
        } else {
            Tone::HighlyPositive
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::HighlyNegative => write!(f, "highly negative"),
            Tone::Negative => write!(f, "negative"),
            Tone::Neutral => write!(f, "neutral"),
            Tone::Positive => write!(f, "positive"),
            Tone::HighlyPositive => write!(f, "highly positive"),
        }
    }
}

/// Direction of the measured tone shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    Stable,
    Improving,
    Deteriorating,
}

impl fmt::Display for ShiftDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftDirection::Stable => write!(f, "stable"),
            ShiftDirection::Improving => write!(f, "improving"),
            ShiftDirection::Deteriorating => write!(f, "deteriorating"),
        }
    }
}

/// Which half of a cluster's timeline a key phrase belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Early,
    Recent,
}

/// One entry of a cluster's time-ordered sentiment trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentPoint {
    pub date: DateTime<Utc>,
    pub sentiment_score: f64,
    /// Title snippet (first 50 characters) for context.
    pub title: String,
}

/// A frequent phrase tagged with the period it was extracted from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPhrase {
    pub phrase: String,
    pub frequency: usize,
    pub period: Period,
}

/// Measured change in tone between the early and recent halves of a
/// cluster's timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneShift {
    pub initial_tone: Tone,
    pub current_tone: Tone,
    pub shift_magnitude: f64,
    pub shift_direction: ShiftDirection,
    pub sentiment_change: f64,
    pub urgency_change: i64,
    pub new_keywords: Vec<String>,
    pub dropped_keywords: Vec<String>,
}

impl Default for ToneShift {
    fn default() -> Self {
        Self {
            initial_tone: Tone::Neutral,
            current_tone: Tone::Neutral,
            shift_magnitude: 0.0,
            shift_direction: ShiftDirection::Stable,
            sentiment_change: 0.0,
            urgency_change: 0,
            new_keywords: Vec::new(),
            dropped_keywords: Vec::new(),
        }
    }
}

/// An actor (country, leader, or organization) and how often it is mentioned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorMention {
    pub name: String,
    pub count: usize,
}

/// Surface-level linguistic measurements over a cluster's articles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinguisticFeatures {
    /// Mean title length in words.
    pub avg_title_length: f64,
    /// Number of distinct sources.
    pub source_diversity: usize,
    /// Days between earliest and latest member.
    pub time_span_days: i64,
    /// Articles per day over the covered span.
    pub article_frequency: f64,
    pub sources: Vec<String>,
}

/// A read-only snapshot of a cluster's rhetoric at analysis time.
///
/// Re-running the analysis produces a new, independent instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RhetoricAnalysis {
    pub cluster_id: String,
    pub event_name: String,
    pub analysis_date: DateTime<Utc>,
    pub time_period_days: i64,
    pub sentiment_trend: Vec<SentimentPoint>,
    pub key_phrases: Vec<KeyPhrase>,
    pub tone_shift: ToneShift,
    pub urgency_indicators: Vec<String>,
    /// Ordered by descending mention count.
    pub actor_mentions: Vec<ActorMention>,
    pub linguistic_features: LinguisticFeatures,
    /// Narrative description of how the rhetoric is evolving.
    pub rhetoric_evolution: String,
}

/// Overall sentiment across a cluster set, with a coarse reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub overall: f64,
    pub interpretation: SentimentInterpretation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentInterpretation {
    Negative,
    Neutral,
    Positive,
}

/// Cross-cluster extremes; all fields empty when no clusters were compared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterComparison {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_negative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_positive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_urgent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_active: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_summary: Option<SentimentSummary>,
}
