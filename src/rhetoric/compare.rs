use tracing::info;

use crate::clustering::EventCluster;

use super::analyzer::RhetoricAnalyzer;
use super::types::{ClusterComparison, SentimentInterpretation, SentimentSummary};
use super::TARGET_RHETORIC;

impl RhetoricAnalyzer {
    /// Compares rhetoric across clusters, picking out the extremes.
    ///
    /// Returns an empty comparison when no clusters are supplied.
    pub fn compare_clusters(&self, clusters: &[EventCluster]) -> ClusterComparison {
        info!(
            target: TARGET_RHETORIC,
            "Comparing rhetoric across {} event clusters",
            clusters.len()
        );

        if clusters.is_empty() {
            return ClusterComparison::default();
        }

        struct Metrics<'a> {
            cluster: &'a EventCluster,
            avg_sentiment: f64,
            urgency_count: usize,
        }

        let metrics: Vec<Metrics> = clusters
            .iter()
            .map(|cluster| {
                let urgency_count = cluster
                    .articles
                    .iter()
                    .map(|a| self.text_analyzer().detect_urgency(&a.full_text()).len())
                    .sum();
                Metrics {
                    cluster,
                    avg_sentiment: cluster.mean_sentiment(),
                    urgency_count,
                }
            })
            .collect();

        // First cluster wins ties throughout.
        let most_negative = extreme_by(&metrics, |a, b| a.avg_sentiment < b.avg_sentiment);
        let most_positive = extreme_by(&metrics, |a, b| a.avg_sentiment > b.avg_sentiment);
        let most_urgent = extreme_by(&metrics, |a, b| a.urgency_count > b.urgency_count);
        let most_active = extreme_by(&metrics, |a, b| {
            a.cluster.article_count > b.cluster.article_count
        });

        let overall =
            metrics.iter().map(|m| m.avg_sentiment).sum::<f64>() / metrics.len() as f64;
        let interpretation = if overall < -0.1 {
            SentimentInterpretation::Negative
        } else if overall > 0.1 {
            SentimentInterpretation::Positive
        } else {
            SentimentInterpretation::Neutral
        };

        fn extreme_by<'a, F>(metrics: &[Metrics<'a>], better: F) -> Option<String>
        where
            F: Fn(&Metrics, &Metrics) -> bool,
        {
            let mut best: Option<&Metrics> = None;
            for m in metrics {
                match best {
                    Some(current) if !better(m, current) => {}
                    _ => best = Some(m),
                }
            }
            best.map(|m| m.cluster.event_name.clone())
        }

        ClusterComparison {
            most_negative,
            most_positive,
            most_urgent,
            most_active,
            sentiment_summary: Some(SentimentSummary {
                overall,
                interpretation,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TextAnalyzer;
    use crate::article::Article;
    use crate::PipelineConfig;
    use chrono::{TimeZone, Utc};

    fn member(id: &str, text: &str, sentiment: f64) -> Article {
        Article {
            id: id.to_string(),
            title: text.to_string(),
            description: None,
            url: format!("https://example.com/{id}"),
            source: "wire".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            keywords: Vec::new(),
            sentiment_score: Some(sentiment),
            embedding: Some(vec![1.0, 0.0]),
        }
    }

    fn cluster_named(name: &str, articles: Vec<Article>) -> EventCluster {
        EventCluster {
            id: format!("cluster_{name}"),
            event_name: name.to_string(),
            article_count: articles.len(),
            articles,
            centroid_embedding: None,
            keywords: Vec::new(),
            first_seen: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            last_updated: Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_input_yields_empty_comparison() {
        let analyzer = RhetoricAnalyzer::new(PipelineConfig::default(), TextAnalyzer::new());
        let comparison = analyzer.compare_clusters(&[]);
        assert!(comparison.most_negative.is_none());
        assert!(comparison.most_positive.is_none());
        assert!(comparison.sentiment_summary.is_none());
    }

    #[test]
    fn extremes_are_identified() {
        let grim = cluster_named(
            "Grim Event",
            vec![
                member("g1", "Urgent crisis deepens", -0.8),
                member("g2", "Breaking: imminent escalation feared", -0.7),
            ],
        );
        let calm = cluster_named(
            "Calm Event",
            vec![
                member("c1", "Steady diplomatic progress", 0.6),
                member("c2", "Cooperation continues", 0.5),
                member("c3", "Agreement near", 0.4),
            ],
        );

        let analyzer = RhetoricAnalyzer::new(PipelineConfig::default(), TextAnalyzer::new());
        let comparison = analyzer.compare_clusters(&[grim, calm]);

        assert_eq!(comparison.most_negative.as_deref(), Some("Grim Event"));
        assert_eq!(comparison.most_positive.as_deref(), Some("Calm Event"));
        assert_eq!(comparison.most_urgent.as_deref(), Some("Grim Event"));
        assert_eq!(comparison.most_active.as_deref(), Some("Calm Event"));

        let summary = comparison.sentiment_summary.unwrap();
        assert_eq!(summary.interpretation, SentimentInterpretation::Negative);
    }

    #[test]
    fn near_zero_overall_sentiment_reads_neutral() {
        let a = cluster_named("A", vec![member("a1", "story", 0.05)]);
        let b = cluster_named("B", vec![member("b1", "story", -0.05)]);

        let analyzer = RhetoricAnalyzer::new(PipelineConfig::default(), TextAnalyzer::new());
        let comparison = analyzer.compare_clusters(&[a, b]);
        let summary = comparison.sentiment_summary.unwrap();
        assert_eq!(summary.interpretation, SentimentInterpretation::Neutral);
    }
}
