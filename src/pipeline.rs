use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::TextAnalyzer;
use crate::article::Article;
use crate::clustering::{ClusterStats, ClusteringEngine, EventCluster};
use crate::rhetoric::{ClusterComparison, RhetoricAnalysis, RhetoricAnalyzer};
use crate::trajectory::{EventPrediction, SummaryReport, TrajectoryPredictor};
use crate::{PipelineConfig, TARGET_PIPELINE};

/// Output of a full pipeline run, serializable as one JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub generated_at: DateTime<Utc>,
    pub total_articles: usize,
    pub total_clusters: usize,
    pub clusters: Vec<EventCluster>,
    pub cluster_stats: ClusterStats,
    pub analyses: Vec<RhetoricAnalysis>,
    /// Present only when more than one cluster was formed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_cluster_comparison: Option<ClusterComparison>,
    pub predictions: Vec<EventPrediction>,
    pub prediction_summary: SummaryReport,
}

/// Coordinates the clustering, rhetoric, and prediction stages over one
/// batch of articles.
pub struct Pipeline {
    engine: ClusteringEngine,
    rhetoric: RhetoricAnalyzer,
    predictor: TrajectoryPredictor,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            engine: ClusteringEngine::new(config.clone(), TextAnalyzer::new()),
            rhetoric: RhetoricAnalyzer::new(config, TextAnalyzer::new()),
            predictor: TrajectoryPredictor::new(),
        }
    }

    /// Runs the full analysis over a batch of articles: cluster, analyze
    /// rhetoric per cluster, predict per cluster, then aggregate.
    pub fn run(&self, articles: &[Article]) -> PipelineReport {
        info!(
            target: TARGET_PIPELINE,
            "Starting analysis of {} articles", articles.len()
        );

        let clusters = self.engine.cluster(articles);
        self.report_for(articles.len(), clusters)
    }

    /// Incremental variant: folds a new batch into existing clusters before
    /// analyzing, so long-running events keep their identities.
    pub fn merge_and_run(
        &self,
        existing: Vec<EventCluster>,
        new_articles: &[Article],
    ) -> PipelineReport {
        info!(
            target: TARGET_PIPELINE,
            "Merging {} new articles into {} existing clusters",
            new_articles.len(),
            existing.len()
        );

        let clusters = self.engine.merge_incremental(existing, new_articles);
        self.report_for(new_articles.len(), clusters)
    }

    fn report_for(&self, total_articles: usize, clusters: Vec<EventCluster>) -> PipelineReport {
        info!(
            target: TARGET_PIPELINE,
            "Formed {} event clusters", clusters.len()
        );

        let cluster_stats = self.engine.cluster_statistics(&clusters);

        let analyses: Vec<RhetoricAnalysis> = clusters
            .iter()
            .map(|cluster| self.rhetoric.analyze(cluster))
            .collect();
        info!(
            target: TARGET_PIPELINE,
            "Completed rhetoric analysis for {} clusters", analyses.len()
        );

        let cross_cluster_comparison = if clusters.len() > 1 {
            Some(self.rhetoric.compare_clusters(&clusters))
        } else {
            None
        };

        let predictions: Vec<EventPrediction> = clusters
            .iter()
            .zip(analyses.iter())
            .map(|(cluster, analysis)| self.predictor.predict(cluster, analysis))
            .collect();
        let prediction_summary = self.predictor.summarize(&predictions);
        info!(
            target: TARGET_PIPELINE,
            "Generated {} predictions ({} escalating)",
            predictions.len(),
            prediction_summary.escalating_count
        );

        PipelineReport {
            generated_at: Utc::now(),
            total_articles,
            total_clusters: clusters.len(),
            cluster_stats,
            analyses,
            cross_cluster_comparison,
            predictions,
            prediction_summary,
            clusters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(id: usize, title: &str, embedding: Vec<f32>, sentiment: f64) -> Article {
        Article {
            id: format!("a{id}"),
            title: title.to_string(),
            description: Some("Reports from the region continue".to_string()),
            url: format!("https://example.com/{id}"),
            source: format!("outlet-{}", id % 4),
            published_at: Utc
                .with_ymd_and_hms(2025, 6, 1 + (id as u32 % 20), 9, 0, 0)
                .unwrap(),
            keywords: Vec::new(),
            sentiment_score: Some(sentiment),
            embedding: Some(embedding),
        }
    }

    fn two_event_batch() -> Vec<Article> {
        let mut articles = Vec::new();
        for i in 0..5 {
            articles.push(article(
                i,
                "Border tensions escalate as military forces mobilize",
                vec![1.0, 0.0],
                -0.4,
            ));
        }
        for i in 5..10 {
            articles.push(article(
                i,
                "Trade agreement talks show progress between delegations",
                vec![0.0, 1.0],
                0.3,
            ));
        }
        articles
    }

    #[test]
    fn run_produces_full_report_for_two_events() {
        let pipeline = Pipeline::new(PipelineConfig::default());
        let report = pipeline.run(&two_event_batch());

        assert_eq!(report.total_articles, 10);
        assert_eq!(report.total_clusters, 2);
        assert_eq!(report.clusters.len(), 2);
        assert!(report.clusters.iter().all(|c| c.article_count == 5));
        assert_eq!(report.analyses.len(), 2);
        assert_eq!(report.predictions.len(), 2);
        assert_eq!(report.prediction_summary.total_events, 2);
        assert_eq!(report.cluster_stats.total_clusters, 2);
        assert_eq!(report.cluster_stats.total_articles, 10);

        // Two clusters, so the cross comparison runs
        let comparison = report.cross_cluster_comparison.as_ref().unwrap();
        assert!(comparison.most_negative.is_some());
        assert!(comparison.most_positive.is_some());

        // Analyses and predictions line up with their clusters
        for (cluster, analysis) in report.clusters.iter().zip(report.analyses.iter()) {
            assert_eq!(cluster.id, analysis.cluster_id);
        }
        for (cluster, prediction) in report.clusters.iter().zip(report.predictions.iter()) {
            assert_eq!(cluster.id, prediction.cluster_id);
        }
    }

    #[test]
    fn empty_batch_yields_empty_report() {
        let pipeline = Pipeline::new(PipelineConfig::default());
        let report = pipeline.run(&[]);

        assert_eq!(report.total_articles, 0);
        assert_eq!(report.total_clusters, 0);
        assert!(report.analyses.is_empty());
        assert!(report.predictions.is_empty());
        assert!(report.cross_cluster_comparison.is_none());
        assert_eq!(
            report.prediction_summary.status,
            crate::trajectory::ReportStatus::NoPredictions
        );
    }

    #[test]
    fn merge_and_run_keeps_existing_cluster_identity() {
        let pipeline = Pipeline::new(PipelineConfig::default());
        let report = pipeline.run(&two_event_batch());
        let ids: Vec<String> = report.clusters.iter().map(|c| c.id.clone()).collect();

        let late = vec![article(
            20,
            "Further escalation reported along the border",
            vec![1.0, 0.0],
            -0.5,
        )];
        let merged = pipeline.merge_and_run(report.clusters, &late);

        assert_eq!(merged.total_clusters, 2);
        assert!(merged.clusters.iter().any(|c| ids.contains(&c.id)));
        assert!(merged
            .clusters
            .iter()
            .any(|c| c.articles.iter().any(|a| a.id == "a20")));
    }

    #[test]
    fn jittered_embeddings_still_form_two_events() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let mut jitter = |base: [f32; 2]| -> Vec<f32> {
            base.iter()
                .map(|v| v + rng.random_range(-0.05..0.05))
                .collect()
        };

        let mut articles = Vec::new();
        for i in 0..5 {
            articles.push(article(
                i,
                "Border tensions escalate as military forces mobilize",
                jitter([1.0, 0.0]),
                -0.4,
            ));
        }
        for i in 5..10 {
            articles.push(article(
                i,
                "Trade agreement talks show progress between delegations",
                jitter([0.0, 1.0]),
                0.3,
            ));
        }

        let pipeline = Pipeline::new(PipelineConfig::default());
        let report = pipeline.run(&articles);
        assert_eq!(report.total_clusters, 2);
        assert!(report.clusters.iter().all(|c| c.article_count == 5));
    }

    #[test]
    fn report_serializes_to_json() {
        let pipeline = Pipeline::new(PipelineConfig::default());
        let report = pipeline.run(&two_event_batch());

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"total_clusters\":2"));
        assert!(json.contains("cross_cluster_comparison"));
    }
}
