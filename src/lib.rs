pub mod analysis;
pub mod article;
pub mod clustering;
pub mod logging;
pub mod pipeline;
pub mod rhetoric;
pub mod trajectory;

pub const TARGET_PIPELINE: &str = "pipeline";

pub use article::Article;
pub use clustering::{ClusteringEngine, EventCluster};
pub use pipeline::{Pipeline, PipelineReport};
pub use rhetoric::{RhetoricAnalysis, RhetoricAnalyzer};
pub use trajectory::{EventPrediction, Trajectory, TrajectoryPredictor};

use serde::{Deserialize, Serialize};

/// Configuration shared across the clustering, rhetoric, and prediction stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum cosine similarity for two articles to be considered part of
    /// the same event. Also the acceptance threshold for incremental merges.
    pub similarity_threshold: f32,
    /// Minimum number of embedded articles required to form a cluster.
    pub min_cluster_size: usize,
    /// Analysis window hint, in days. Recorded on each analysis; does not
    /// filter input.
    pub time_period_days: i64,
    /// When true, cluster centroids are recomputed after each incremental
    /// merge batch. Off by default: the upstream design leaves centroids
    /// stale after merges, so repeated merges drift them away from the
    /// member mean.
    pub recompute_centroids_on_merge: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.7,
            min_cluster_size: 2,
            time_period_days: 30,
            recompute_centroids_on_merge: false,
        }
    }
}
