use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::analysis::similarity::mean_vector;
use crate::analysis::TextAnalyzer;
use crate::article::Article;
use crate::PipelineConfig;

use super::density::{self, NOISE};
use super::naming::generate_event_name;
use super::types::{ClusterStats, EventCluster};
use super::{MAX_CLUSTER_KEYWORDS, TARGET_CLUSTERING};

/// Groups articles into event clusters by embedding similarity.
pub struct ClusteringEngine {
    config: PipelineConfig,
    analyzer: TextAnalyzer,
}

impl ClusteringEngine {
    pub fn new(config: PipelineConfig, analyzer: TextAnalyzer) -> Self {
        Self { config, analyzer }
    }

    /// Clusters a batch of articles into events.
    ///
    /// Only articles carrying an embedding participate; the rest are skipped
    /// (not discarded — that is the caller's concern). Articles falling in no
    /// dense region are noise and appear in no cluster. Any failure inside
    /// the clustering primitive fails closed: the whole batch yields zero
    /// clusters rather than partial output.
    ///
    /// # Arguments
    /// * `articles` - input batch, embeddings already resolved upstream
    ///
    /// # Returns
    /// * Clusters sorted by article count, descending
    pub fn cluster(&self, articles: &[Article]) -> Vec<EventCluster> {
        info!(
            target: TARGET_CLUSTERING,
            "Clustering {} articles into events",
            articles.len()
        );

        let embedded: Vec<&Article> = articles.iter().filter(|a| a.has_embedding()).collect();

        if embedded.len() < self.config.min_cluster_size {
            info!(
                target: TARGET_CLUSTERING,
                "Not enough articles with embeddings to cluster ({} < {})",
                embedded.len(),
                self.config.min_cluster_size
            );
            return Vec::new();
        }

        let points: Vec<&[f32]> = embedded
            .iter()
            .filter_map(|a| a.embedding.as_deref())
            .collect();

        let eps = 1.0 - self.config.similarity_threshold;
        let labels = match density::dbscan(&points, eps, self.config.min_cluster_size) {
            Ok(labels) => labels,
            Err(e) => {
                warn!(
                    target: TARGET_CLUSTERING,
                    "Clustering failed, returning no clusters: {}", e
                );
                return Vec::new();
            }
        };

        // Group members by label, dropping noise.
        let mut groups: BTreeMap<i32, Vec<&Article>> = BTreeMap::new();
        for (article, &label) in embedded.iter().zip(labels.iter()) {
            if label != NOISE {
                groups.entry(label).or_default().push(article);
            }
        }
        let noise_count = labels.iter().filter(|&&l| l == NOISE).count();

        let mut clusters: Vec<EventCluster> = groups
            .into_values()
            .map(|members| self.build_cluster(&members))
            .collect();

        clusters.sort_by(|a, b| b.article_count.cmp(&a.article_count));

        info!(
            target: TARGET_CLUSTERING,
            "Created {} event clusters ({} articles left as noise)",
            clusters.len(),
            noise_count
        );

        clusters
    }

    /// Merges new articles into existing clusters, creating new clusters for
    /// the remainder.
    ///
    /// Each embedded article goes to the existing cluster whose centroid it
    /// is most similar to, provided that similarity reaches the configured
    /// threshold; the first cluster reaching the maximum wins ties. Articles
    /// matching nothing are batch-clustered and appended. Articles without an
    /// embedding are dropped from the merge.
    ///
    /// Assigned articles are appended without recomputing the centroid
    /// unless `recompute_centroids_on_merge` is set.
    pub fn merge_incremental(
        &self,
        mut clusters: Vec<EventCluster>,
        new_articles: &[Article],
    ) -> Vec<EventCluster> {
        info!(
            target: TARGET_CLUSTERING,
            "Merging {} new articles into {} existing clusters",
            new_articles.len(),
            clusters.len()
        );

        let mut unassigned: Vec<Article> = Vec::new();
        let mut touched: Vec<usize> = Vec::new();

        for article in new_articles {
            let Some(embedding) = article.embedding.as_deref().filter(|e| !e.is_empty()) else {
                continue;
            };

            let mut best: Option<usize> = None;
            let mut best_similarity = 0.0f32;

            for (index, cluster) in clusters.iter().enumerate() {
                let Some(centroid) = cluster.centroid_embedding.as_deref() else {
                    continue;
                };
                let similarity = match self.analyzer.cosine_similarity(embedding, centroid) {
                    Ok(s) => s,
                    Err(e) => {
                        debug!(
                            target: TARGET_CLUSTERING,
                            "Skipping centroid comparison for cluster {}: {}", cluster.id, e
                        );
                        continue;
                    }
                };

                if similarity > best_similarity && similarity >= self.config.similarity_threshold {
                    best_similarity = similarity;
                    best = Some(index);
                }
            }

            match best {
                Some(index) => {
                    clusters[index].add_article(article.clone());
                    touched.push(index);
                }
                None => unassigned.push(article.clone()),
            }
        }

        if self.config.recompute_centroids_on_merge {
            for &index in &touched {
                let members: Vec<&[f32]> = clusters[index]
                    .articles
                    .iter()
                    .filter_map(|a| a.embedding.as_deref())
                    .collect();
                clusters[index].centroid_embedding = mean_vector(&members);
            }
        }

        if !unassigned.is_empty() {
            let new_clusters = self.cluster(&unassigned);
            clusters.extend(new_clusters);
        }

        info!(
            target: TARGET_CLUSTERING,
            "Updated cluster set: {} total",
            clusters.len()
        );

        clusters
    }

    /// Aggregate statistics over a cluster set; all zeros on empty input.
    pub fn cluster_statistics(&self, clusters: &[EventCluster]) -> ClusterStats {
        let Some(largest) = clusters.iter().max_by_key(|c| c.article_count) else {
            return ClusterStats::default();
        };

        let total_articles: usize = clusters.iter().map(|c| c.article_count).sum();

        ClusterStats {
            total_clusters: clusters.len(),
            total_articles,
            avg_articles_per_cluster: total_articles as f64 / clusters.len() as f64,
            largest_cluster_size: largest.article_count,
            largest_cluster_name: Some(largest.event_name.clone()),
        }
    }

    fn build_cluster(&self, members: &[&Article]) -> EventCluster {
        let keywords = shared_keywords(members);
        let event_name = generate_event_name(&self.analyzer, members, &keywords);

        let embeddings: Vec<&[f32]> = members.iter().filter_map(|a| a.embedding.as_deref()).collect();
        let centroid_embedding = mean_vector(&embeddings);

        let first_seen = members.iter().map(|a| a.published_at).min().unwrap_or_default();
        let last_updated = members.iter().map(|a| a.published_at).max().unwrap_or_default();

        EventCluster {
            id: cluster_id(members),
            event_name,
            articles: members.iter().map(|a| (*a).clone()).collect(),
            centroid_embedding,
            keywords,
            first_seen,
            last_updated,
            article_count: members.len(),
        }
    }
}

/// Deterministic content-derived cluster id: stable across reruns for the
/// same membership regardless of arrival order.
fn cluster_id(members: &[&Article]) -> String {
    let mut ids: Vec<&str> = members.iter().map(|a| a.id.as_str()).collect();
    ids.sort_unstable();

    let mut hasher = Sha256::new();
    for id in ids {
        hasher.update(id.as_bytes());
    }
    let digest = format!("{:x}", hasher.finalize());
    format!("cluster_{}", &digest[..12])
}

/// Keywords occurring in at least `max(2, n/3)` members, ranked by frequency
/// then first appearance, capped at `MAX_CLUSTER_KEYWORDS`.
fn shared_keywords(members: &[&Article]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for article in members {
        for keyword in &article.keywords {
            match counts.iter_mut().find(|(existing, _)| existing == keyword) {
                Some((_, count)) => *count += 1,
                None => counts.push((keyword.clone(), 1)),
            }
        }
    }

    let min_occurrences = std::cmp::max(2, members.len() / 3);
    let mut qualified: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_occurrences)
        .collect();
    // Stable sort keeps first-seen order between equal counts.
    qualified.sort_by(|a, b| b.1.cmp(&a.1));

    qualified
        .into_iter()
        .take(MAX_CLUSTER_KEYWORDS)
        .map(|(keyword, _)| keyword)
        .collect()
}
