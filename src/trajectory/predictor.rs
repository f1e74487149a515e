use chrono::Utc;
use std::cmp::Ordering;
use tracing::info;

use crate::clustering::EventCluster;
use crate::rhetoric::{RhetoricAnalysis, ShiftDirection};

use super::outlook;
use super::types::{
    AttentionMetrics, ConcernDigest, CoverageTrend, EventPrediction, PredictionDigest,
    ReportStatus, SummaryReport, Trajectory,
};
use super::{HIGH_RISK_KEYWORDS, HIGH_URGENCY_COUNT, TARGET_TRAJECTORY};

/// Rule-based trajectory classifier. A deterministic point scorer over the
/// rhetoric analysis, not a trained model.
#[derive(Debug, Default)]
pub struct TrajectoryPredictor;

impl TrajectoryPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Predicts the trajectory of one event from its cluster and rhetoric
    /// analysis.
    pub fn predict(
        &self,
        cluster: &EventCluster,
        analysis: &RhetoricAnalysis,
    ) -> EventPrediction {
        info!(
            target: TARGET_TRAJECTORY,
            "Predicting trajectory for: {}", cluster.event_name
        );

        let trajectory = determine_trajectory(analysis);
        let confidence_score = calculate_confidence(cluster, analysis);
        let key_indicators = extract_key_indicators(analysis);
        let similar_historical_patterns = find_similar_patterns(trajectory, analysis);
        let short_term_outlook = outlook::short_term(trajectory);
        let medium_term_outlook =
            outlook::medium_term(trajectory, analysis.urgency_indicators.len());
        let risk_factors = identify_risk_factors(analysis);
        let attention_metrics = calculate_attention_metrics(cluster);

        EventPrediction {
            cluster_id: cluster.id.clone(),
            event_name: cluster.event_name.clone(),
            prediction_date: Utc::now(),
            trajectory,
            confidence_score,
            key_indicators,
            similar_historical_patterns,
            short_term_outlook,
            medium_term_outlook,
            risk_factors,
            attention_metrics,
        }
    }

    /// Aggregates a batch of predictions into a summary report.
    ///
    /// Empty input produces an explicit no-predictions report, never an
    /// error.
    pub fn summarize(&self, predictions: &[EventPrediction]) -> SummaryReport {
        if predictions.is_empty() {
            return SummaryReport::empty();
        }

        let escalating: Vec<&EventPrediction> = predictions
            .iter()
            .filter(|p| p.trajectory == Trajectory::Escalating)
            .collect();
        let de_escalating_count = predictions
            .iter()
            .filter(|p| p.trajectory == Trajectory::DeEscalating)
            .count();
        let stable_count = predictions
            .iter()
            .filter(|p| p.trajectory == Trajectory::Stable)
            .count();

        let mut by_confidence: Vec<&EventPrediction> = predictions.iter().collect();
        by_confidence.sort_by(|a, b| {
            b.confidence_score
                .partial_cmp(&a.confidence_score)
                .unwrap_or(Ordering::Equal)
        });

        let mut most_concerning = escalating.clone();
        most_concerning.sort_by(|a, b| {
            b.risk_factors
                .len()
                .cmp(&a.risk_factors.len())
                .then_with(|| {
                    b.confidence_score
                        .partial_cmp(&a.confidence_score)
                        .unwrap_or(Ordering::Equal)
                })
        });

        SummaryReport {
            status: ReportStatus::Ok,
            total_events: predictions.len(),
            escalating_count: escalating.len(),
            de_escalating_count,
            stable_count,
            top_confidence_predictions: by_confidence
                .iter()
                .take(3)
                .map(|p| PredictionDigest {
                    event: p.event_name.clone(),
                    confidence: p.confidence_score,
                    trajectory: p.trajectory,
                })
                .collect(),
            most_concerning_events: most_concerning
                .iter()
                .take(3)
                .map(|p| ConcernDigest {
                    event: p.event_name.clone(),
                    risk_factors: p.risk_factors.len(),
                })
                .collect(),
        }
    }
}

/// Point-scoring trajectory decision.
///
/// Accumulators start at zero; the strictly highest wins, with ties resolved
/// in the fixed order escalating, de-escalating, stable. All-zero scores
/// default to stable.
fn determine_trajectory(analysis: &RhetoricAnalysis) -> Trajectory {
    let mut escalating = 0i32;
    let mut de_escalating = 0i32;
    let mut stable = 0i32;

    // Recent sentiment slope
    let recent: Vec<f64> = analysis
        .sentiment_trend
        .iter()
        .rev()
        .take(5)
        .rev()
        .map(|p| p.sentiment_score)
        .collect();
    if recent.len() >= 2 {
        let slope = least_squares_slope(&recent);
        if slope < -0.05 {
            escalating += 2;
        } else if slope > 0.05 {
            de_escalating += 2;
        } else {
            stable += 1;
        }
    }

    // Tone shift direction
    match analysis.tone_shift.shift_direction {
        ShiftDirection::Deteriorating => escalating += 2,
        ShiftDirection::Improving => de_escalating += 2,
        ShiftDirection::Stable => stable += 1,
    }

    // Urgency indicator volume
    if analysis.urgency_indicators.len() > HIGH_URGENCY_COUNT {
        escalating += 1;
    } else if analysis.urgency_indicators.len() < 2 {
        de_escalating += 1;
    }

    // Urgency change between halves
    if analysis.tone_shift.urgency_change > 2 {
        escalating += 1;
    } else if analysis.tone_shift.urgency_change < -2 {
        de_escalating += 1;
    }

    // Coverage pace
    if analysis.linguistic_features.article_frequency > 2.0 {
        escalating += 1;
    }

    let ranked = [
        (Trajectory::Escalating, escalating),
        (Trajectory::DeEscalating, de_escalating),
        (Trajectory::Stable, stable),
    ];
    let max_score = ranked.iter().map(|(_, s)| *s).max().unwrap_or(0);
    if max_score == 0 {
        return Trajectory::Stable;
    }
    ranked
        .iter()
        .find(|(_, score)| *score == max_score)
        .map(|(trajectory, _)| *trajectory)
        .unwrap_or(Trajectory::Stable)
}

/// Least-squares slope of evenly spaced points.
fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..values.len()).map(|i| (i as f64) * (i as f64)).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Confidence is the mean of the available factors, each clamped to [0, 1].
/// The consistency factor only participates with three or more trend points.
fn calculate_confidence(cluster: &EventCluster, analysis: &RhetoricAnalysis) -> f64 {
    let mut factors: Vec<f64> = Vec::new();

    // More articles, longer observation, more sources: higher confidence.
    factors.push((cluster.article_count as f64 / 20.0).min(1.0));
    factors.push((analysis.linguistic_features.time_span_days as f64 / 7.0).min(1.0));
    factors.push((analysis.linguistic_features.source_diversity as f64 / 5.0).min(1.0));

    if analysis.sentiment_trend.len() >= 3 {
        let scores: Vec<f64> = analysis
            .sentiment_trend
            .iter()
            .map(|p| p.sentiment_score)
            .collect();
        factors.push((1.0 - population_stddev(&scores)).max(0.0));
    }

    factors.iter().sum::<f64>() / factors.len() as f64
}

fn population_stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Evidence strings supporting the prediction, in fixed order: tone shift,
/// urgency, emerging keywords, key actors.
fn extract_key_indicators(analysis: &RhetoricAnalysis) -> Vec<String> {
    let mut indicators = Vec::new();

    let tone_shift = &analysis.tone_shift;
    if tone_shift.shift_magnitude > 0.1 {
        indicators.push(format!(
            "Tone shift from {} to {}",
            tone_shift.initial_tone, tone_shift.current_tone
        ));
    }

    if !analysis.urgency_indicators.is_empty() {
        let sample: Vec<&str> = analysis
            .urgency_indicators
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        indicators.push(format!(
            "Urgency indicators present: {}",
            sample.join(", ")
        ));
    }

    if !tone_shift.new_keywords.is_empty() {
        let sample: Vec<&str> = tone_shift
            .new_keywords
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        indicators.push(format!("Emerging keywords: {}", sample.join(", ")));
    }

    if !analysis.actor_mentions.is_empty() {
        let sample: Vec<&str> = analysis
            .actor_mentions
            .iter()
            .take(3)
            .map(|m| m.name.as_str())
            .collect();
        indicators.push(format!("Key actors: {}", sample.join(", ")));
    }

    indicators
}

/// Illustrative pattern labels keyed to the trajectory and triggered by
/// keywords in the analysis.
fn find_similar_patterns(trajectory: Trajectory, analysis: &RhetoricAnalysis) -> Vec<String> {
    let mut patterns = Vec::new();

    let phrase_contains = |needle: &str| {
        analysis
            .key_phrases
            .iter()
            .any(|p| p.phrase.contains(needle))
    };

    match trajectory {
        Trajectory::Escalating => {
            if phrase_contains("military") {
                patterns.push(
                    "Military rhetoric escalation (similar to pre-conflict situations)"
                        .to_string(),
                );
            }
            if analysis
                .tone_shift
                .new_keywords
                .iter()
                .any(|kw| kw.contains("sanction"))
            {
                patterns
                    .push("Economic sanctions pattern (similar to trade war scenarios)".to_string());
            }
            if analysis.urgency_indicators.len() > HIGH_URGENCY_COUNT {
                patterns.push("High urgency pattern (similar to crisis situations)".to_string());
            }
        }
        Trajectory::DeEscalating => {
            if phrase_contains("dialogue") || phrase_contains("talk") {
                patterns.push(
                    "Diplomatic engagement pattern (similar to resolution scenarios)".to_string(),
                );
            }
            if analysis.tone_shift.shift_direction == ShiftDirection::Improving {
                patterns
                    .push("Improving tone pattern (similar to post-crisis recovery)".to_string());
            }
        }
        Trajectory::Stable => {
            patterns.push(
                "Stable monitoring phase (similar to ongoing situations without major changes)"
                    .to_string(),
            );
        }
    }

    patterns
}

/// Conditions that could accelerate or redirect the trajectory.
fn identify_risk_factors(analysis: &RhetoricAnalysis) -> Vec<String> {
    let mut risk_factors = Vec::new();

    if analysis.urgency_indicators.len() > HIGH_URGENCY_COUNT {
        risk_factors
            .push("High level of urgency indicators suggest rapid escalation risk".to_string());
    }

    let top_actors: Vec<&str> = analysis
        .actor_mentions
        .iter()
        .take(5)
        .map(|m| m.name.as_str())
        .collect();
    if top_actors.len() >= 3 {
        risk_factors.push(format!(
            "Multiple actors involved ({}), increasing complexity",
            top_actors.join(", ")
        ));
    }

    if !analysis.sentiment_trend.is_empty() {
        let recent: Vec<f64> = analysis
            .sentiment_trend
            .iter()
            .rev()
            .take(5)
            .map(|p| p.sentiment_score)
            .collect();
        let recent_mean = recent.iter().sum::<f64>() / recent.len() as f64;
        if recent_mean < -0.3 {
            risk_factors
                .push("Persistently negative sentiment indicates deep tensions".to_string());
        }
    }

    if analysis.linguistic_features.article_frequency > 3.0 {
        risk_factors
            .push("Rapidly increasing media coverage suggests escalating importance".to_string());
    }

    let found: Vec<&str> = HIGH_RISK_KEYWORDS
        .iter()
        .filter(|kw| {
            analysis
                .key_phrases
                .iter()
                .any(|p| p.phrase.contains(**kw))
        })
        .copied()
        .collect();
    if !found.is_empty() {
        risk_factors.push(format!(
            "Presence of high-risk keywords: {}",
            found.join(", ")
        ));
    }

    risk_factors
}

/// Coverage attention measures over the cluster's timeline.
fn calculate_attention_metrics(cluster: &EventCluster) -> AttentionMetrics {
    let sorted = cluster.articles_by_publish_time();

    let coverage_intensity = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => {
            let span = (last.published_at - first.published_at).num_days();
            cluster.article_count as f64 / std::cmp::max(1, span) as f64
        }
        _ => 0.0,
    };

    let mut sources: Vec<String> = Vec::new();
    for article in &sorted {
        if !sources.contains(&article.source) {
            sources.push(article.source.clone());
        }
    }

    let coverage_trend = if sorted.len() >= 4 {
        let early_count = sorted.len() / 2;
        let recent_count = sorted.len() - early_count;
        if recent_count as f64 > early_count as f64 * 1.5 {
            CoverageTrend::Increasing
        } else if (recent_count as f64) < early_count as f64 * 0.5 {
            CoverageTrend::Decreasing
        } else {
            CoverageTrend::Stable
        }
    } else {
        CoverageTrend::InsufficientData
    };

    AttentionMetrics {
        coverage_intensity,
        source_diversity: sources.len(),
        coverage_trend,
        total_articles: cluster.article_count,
        sources,
    }
}
