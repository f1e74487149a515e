use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::article::Article;

/// A growing group of articles believed to describe one ongoing event.
///
/// Invariants: every member carries an embedding, `article_count` equals
/// `articles.len()`, and `first_seen <= last_updated`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCluster {
    /// Content-derived identifier, stable for a given membership.
    pub id: String,
    /// Human-readable label built from entities and keywords.
    pub event_name: String,
    /// Members in arrival order, unique by article id.
    pub articles: Vec<Article>,
    /// Mean of member embeddings. Not refreshed by `add_article`; the
    /// clustering engine decides when to recompute it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid_embedding: Option<Vec<f32>>,
    /// Keywords occurring in a meaningful share of members.
    pub keywords: Vec<String>,
    /// Earliest member publish time.
    pub first_seen: DateTime<Utc>,
    /// Latest member publish time, bumped to now on membership change.
    pub last_updated: DateTime<Utc>,
    pub article_count: usize,
}

impl EventCluster {
    /// Appends an article and refreshes the bookkeeping fields.
    ///
    /// The centroid is intentionally left untouched; see
    /// `PipelineConfig::recompute_centroids_on_merge`.
    pub fn add_article(&mut self, article: Article) {
        self.articles.push(article);
        self.article_count = self.articles.len();
        self.last_updated = Utc::now();
    }

    /// Mean stored sentiment over members that carry one; 0.0 when none do.
    pub fn mean_sentiment(&self) -> f64 {
        let scores: Vec<f64> = self
            .articles
            .iter()
            .filter_map(|a| a.sentiment_score)
            .collect();
        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().sum::<f64>() / scores.len() as f64
    }

    /// Members ordered by publish time, ascending.
    pub fn articles_by_publish_time(&self) -> Vec<&Article> {
        let mut sorted: Vec<&Article> = self.articles.iter().collect();
        sorted.sort_by_key(|a| a.published_at);
        sorted
    }
}

/// Aggregate statistics over a cluster set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterStats {
    pub total_clusters: usize,
    pub total_articles: usize,
    pub avg_articles_per_cluster: f64,
    pub largest_cluster_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_cluster_name: Option<String>,
}
