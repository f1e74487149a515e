use chrono::Utc;
use std::collections::HashSet;
use tracing::info;

use crate::analysis::TextAnalyzer;
use crate::article::Article;
use crate::clustering::EventCluster;
use crate::PipelineConfig;

use super::types::{
    ActorMention, KeyPhrase, LinguisticFeatures, Period, RhetoricAnalysis, SentimentPoint,
    ShiftDirection, Tone, ToneShift,
};
use super::{MAX_SHIFT_KEYWORDS, TARGET_RHETORIC};

/// Examines how a single cluster's rhetoric evolves over time.
pub struct RhetoricAnalyzer {
    config: PipelineConfig,
    analyzer: TextAnalyzer,
}

impl RhetoricAnalyzer {
    pub fn new(config: PipelineConfig, analyzer: TextAnalyzer) -> Self {
        Self { config, analyzer }
    }

    pub(super) fn text_analyzer(&self) -> &TextAnalyzer {
        &self.analyzer
    }

    /// Performs the full rhetoric analysis for one cluster.
    ///
    /// Deterministic given the cluster's members; only `analysis_date`
    /// depends on the wall clock.
    pub fn analyze(&self, cluster: &EventCluster) -> RhetoricAnalysis {
        info!(
            target: TARGET_RHETORIC,
            "Analyzing rhetoric for: {}", cluster.event_name
        );

        let sorted = cluster.articles_by_publish_time();

        let sentiment_trend = sentiment_trend(&sorted);
        let key_phrases = self.key_phrases(&sorted);
        let tone_shift = self.tone_shift(&sorted);
        let urgency_indicators = self.urgency_indicators(&sorted);
        let actor_mentions = self.actor_mentions(&sorted);
        let linguistic_features = linguistic_features(&sorted);
        let rhetoric_evolution =
            narrative(&sentiment_trend, &tone_shift, &urgency_indicators);

        RhetoricAnalysis {
            cluster_id: cluster.id.clone(),
            event_name: cluster.event_name.clone(),
            analysis_date: Utc::now(),
            time_period_days: self.config.time_period_days,
            sentiment_trend,
            key_phrases,
            tone_shift,
            urgency_indicators,
            actor_mentions,
            linguistic_features,
            rhetoric_evolution,
        }
    }

    /// Top two-word phrases per period. Fewer than four articles are treated
    /// as a single "early" period; otherwise the timeline splits at its
    /// midpoint.
    fn key_phrases(&self, sorted: &[&Article]) -> Vec<KeyPhrase> {
        let periods: Vec<(Period, &[&Article])> = if sorted.len() < 4 {
            vec![(Period::Early, sorted)]
        } else {
            let mid = sorted.len() / 2;
            vec![(Period::Early, &sorted[..mid]), (Period::Recent, &sorted[mid..])]
        };

        let mut phrases = Vec::new();
        for (period, articles) in periods {
            let text = articles
                .iter()
                .map(|a| a.full_text())
                .collect::<Vec<_>>()
                .join(" ");

            for (phrase, frequency) in self.analyzer.extract_phrases(&text, 2).into_iter().take(10)
            {
                phrases.push(KeyPhrase {
                    phrase,
                    frequency,
                    period,
                });
            }
        }

        phrases
    }

    /// Measures the tone change between the early and late halves of the
    /// timeline. With fewer than two members there is nothing to split, so a
    /// neutral, stable shift is reported.
    fn tone_shift(&self, sorted: &[&Article]) -> ToneShift {
        if sorted.len() < 2 {
            return ToneShift::default();
        }

        let mid = std::cmp::max(1, sorted.len() / 2);
        let (early, recent) = sorted.split_at(mid);

        let early_texts: Vec<String> = early.iter().map(|a| a.full_text()).collect();
        let recent_texts: Vec<String> = recent.iter().map(|a| a.full_text()).collect();

        let comparison = self.analyzer.compare_rhetoric(&early_texts, &recent_texts);

        let initial_tone = Tone::from_score(stored_mean_sentiment(early));
        let current_tone = Tone::from_score(stored_mean_sentiment(recent));

        let mut new_keywords = comparison.new_keywords;
        new_keywords.truncate(MAX_SHIFT_KEYWORDS);
        let mut dropped_keywords = comparison.dropped_keywords;
        dropped_keywords.truncate(MAX_SHIFT_KEYWORDS);

        ToneShift {
            initial_tone,
            current_tone,
            shift_magnitude: comparison.sentiment_change.abs(),
            shift_direction: shift_direction(comparison.sentiment_change),
            sentiment_change: comparison.sentiment_change,
            urgency_change: comparison.urgency_change,
            new_keywords,
            dropped_keywords,
        }
    }

    /// Union of urgency markers across all members, in order of first
    /// appearance.
    fn urgency_indicators(&self, sorted: &[&Article]) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut indicators = Vec::new();

        for article in sorted {
            for term in self.analyzer.detect_urgency(&article.full_text()) {
                if seen.insert(term.clone()) {
                    indicators.push(term);
                }
            }
        }

        indicators
    }

    /// Frequency-ranked actor tallies across all members.
    fn actor_mentions(&self, sorted: &[&Article]) -> Vec<ActorMention> {
        let mut counts: Vec<ActorMention> = Vec::new();

        for article in sorted {
            let entities = self.analyzer.extract_entities(&article.full_text());
            for name in entities.all() {
                match counts.iter_mut().find(|m| &m.name == name) {
                    Some(mention) => mention.count += 1,
                    None => counts.push(ActorMention {
                        name: name.clone(),
                        count: 1,
                    }),
                }
            }
        }

        counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.name.cmp(&b.name)));
        counts
    }
}

/// One trend point per member carrying a stored sentiment score, in publish
/// order.
fn sentiment_trend(sorted: &[&Article]) -> Vec<SentimentPoint> {
    sorted
        .iter()
        .filter_map(|article| {
            article.sentiment_score.map(|score| SentimentPoint {
                date: article.published_at,
                sentiment_score: score,
                title: article.title.chars().take(50).collect(),
            })
        })
        .collect()
}

/// Classifies a lexical sentiment change. The stable band is open at its
/// edges: a change of exactly ±0.1 already counts as directional.
pub(crate) fn shift_direction(sentiment_change: f64) -> ShiftDirection {
    if sentiment_change.abs() < 0.1 {
        ShiftDirection::Stable
    } else if sentiment_change > 0.0 {
        ShiftDirection::Improving
    } else {
        ShiftDirection::Deteriorating
    }
}

/// Mean of the stored per-article sentiment scores, ignoring absent ones;
/// 0.0 (neutral) when none are present.
fn stored_mean_sentiment(articles: &[&Article]) -> f64 {
    let scores: Vec<f64> = articles.iter().filter_map(|a| a.sentiment_score).collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

fn linguistic_features(sorted: &[&Article]) -> LinguisticFeatures {
    let title_lengths: Vec<usize> = sorted
        .iter()
        .map(|a| a.title.split_whitespace().count())
        .collect();
    let avg_title_length = if title_lengths.is_empty() {
        0.0
    } else {
        title_lengths.iter().sum::<usize>() as f64 / title_lengths.len() as f64
    };

    let mut sources: Vec<String> = Vec::new();
    for article in sorted {
        if !sources.contains(&article.source) {
            sources.push(article.source.clone());
        }
    }

    let time_span_days = match (
        sorted.iter().map(|a| a.published_at).min(),
        sorted.iter().map(|a| a.published_at).max(),
    ) {
        (Some(first), Some(last)) => (last - first).num_days(),
        _ => 0,
    };

    LinguisticFeatures {
        avg_title_length,
        source_diversity: sources.len(),
        time_span_days,
        article_frequency: sorted.len() as f64 / std::cmp::max(1, time_span_days) as f64,
        sources,
    }
}

/// Assembles the narrative description: tone sentence, urgency sentence,
/// emerging-keyword sentence, recent-sentiment sentence, in that order.
fn narrative(
    sentiment_trend: &[SentimentPoint],
    tone_shift: &ToneShift,
    urgency_indicators: &[String],
) -> String {
    let mut parts: Vec<String> = Vec::new();

    match tone_shift.shift_direction {
        ShiftDirection::Stable => parts.push(format!(
            "The rhetoric has remained relatively stable, maintaining a {} tone.",
            tone_shift.current_tone
        )),
        ShiftDirection::Deteriorating => parts.push(format!(
            "The rhetoric has shifted from {} to {}, indicating a deterioration in tone.",
            tone_shift.initial_tone, tone_shift.current_tone
        )),
        ShiftDirection::Improving => parts.push(format!(
            "The rhetoric has shifted from {} to {}, showing improvement.",
            tone_shift.initial_tone, tone_shift.current_tone
        )),
    }

    if !urgency_indicators.is_empty() {
        let sample: Vec<&str> = urgency_indicators
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        parts.push(format!(
            "Urgency indicators such as '{}' suggest heightened concern.",
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
        parts.push(format!(
            "New keywords emerging include: {}.",
            sample.join(", ")
        ));
    }

    if sentiment_trend.len() > 1 {
        let recent: Vec<f64> = sentiment_trend
            .iter()
            .rev()
            .take(5)
            .map(|p| p.sentiment_score)
            .collect();
        let avg_recent = recent.iter().sum::<f64>() / recent.len() as f64;

        if avg_recent < -0.2 {
            parts.push("Recent coverage has been predominantly negative.".to_string());
        } else if avg_recent > 0.2 {
            parts.push("Recent coverage has been predominantly positive.".to_string());
        }
    }

    parts.join(" ")
}
