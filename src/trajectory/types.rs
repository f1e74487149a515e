use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicted directional evolution of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trajectory {
    #[serde(rename = "escalating")]
    Escalating,
    #[serde(rename = "de-escalating")]
    DeEscalating,
    #[serde(rename = "stable")]
    Stable,
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trajectory::Escalating => write!(f, "escalating"),
            Trajectory::DeEscalating => write!(f, "de-escalating"),
            Trajectory::Stable => write!(f, "stable"),
        }
    }
}

/// How media coverage of an event is developing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageTrend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

/// Measures of how much attention an event is drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttentionMetrics {
    /// Articles per day over the covered span.
    pub coverage_intensity: f64,
    /// Number of distinct sources.
    pub source_diversity: usize,
    pub coverage_trend: CoverageTrend,
    pub total_articles: usize,
    pub sources: Vec<String>,
}

/// Trajectory prediction for one event cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPrediction {
    pub cluster_id: String,
    pub event_name: String,
    pub prediction_date: DateTime<Utc>,
    pub trajectory: Trajectory,
    /// Confidence in [0.0, 1.0].
    pub confidence_score: f64,
    /// Evidence strings supporting the prediction.
    pub key_indicators: Vec<String>,
    /// Illustrative pattern labels, not retrieved from a corpus.
    pub similar_historical_patterns: Vec<String>,
    /// Next 7 days.
    pub short_term_outlook: String,
    /// Next 30 days.
    pub medium_term_outlook: String,
    pub risk_factors: Vec<String>,
    pub attention_metrics: AttentionMetrics,
}

/// Whether a summary report had any predictions to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ok,
    NoPredictions,
}

/// One line of the top-confidence table in a summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionDigest {
    pub event: String,
    pub confidence: f64,
    pub trajectory: Trajectory,
}

/// One line of the most-concerning table in a summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcernDigest {
    pub event: String,
    pub risk_factors: usize,
}

/// Aggregate view over a batch of predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub status: ReportStatus,
    pub total_events: usize,
    pub escalating_count: usize,
    pub de_escalating_count: usize,
    pub stable_count: usize,
    pub top_confidence_predictions: Vec<PredictionDigest>,
    pub most_concerning_events: Vec<ConcernDigest>,
}

impl SummaryReport {
    /// The well-defined "nothing to report" value.
    pub fn empty() -> Self {
        Self {
            status: ReportStatus::NoPredictions,
            total_events: 0,
            escalating_count: 0,
            de_escalating_count: 0,
            stable_count: 0,
            top_confidence_predictions: Vec::new(),
            most_concerning_events: Vec::new(),
        }
    }
}
