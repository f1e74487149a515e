use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A single news article supplied to the pipeline.
///
/// Articles arrive with keywords, sentiment and (optionally) an embedding
/// already resolved by the ingestion layer; the core never performs I/O to
/// fill in missing fields. An article without an embedding is tolerated
/// everywhere but silently skipped by clustering and merging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier, derived from the source URL.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Precomputed sentiment in [-1.0, 1.0], if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    /// Semantic embedding from the ingestion layer, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Article {
    /// Derives a stable article id from a source URL.
    ///
    /// # Arguments
    /// * `url` - The article's canonical URL
    ///
    /// # Returns
    /// * The first 16 hex characters of the URL's SHA-256 digest
    pub fn id_from_url(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..16].to_string()
    }

    /// Returns true when the article carries a non-empty embedding.
    pub fn has_embedding(&self) -> bool {
        self.embedding.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Title and description joined into one text for lexical analysis.
    pub fn full_text(&self) -> String {
        match self.description.as_deref() {
            Some(description) => format!("{} {}", self.title, description),
            None => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn article(id: &str, title: &str) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            url: format!("https://example.com/{id}"),
            source: "example".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            keywords: Vec::new(),
            sentiment_score: None,
            embedding: None,
        }
    }

    #[test]
    fn id_from_url_is_stable_and_short() {
        let a = Article::id_from_url("https://example.com/news/1");
        let b = Article::id_from_url("https://example.com/news/1");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert_ne!(a, Article::id_from_url("https://example.com/news/2"));
    }

    #[test]
    fn has_embedding_rejects_empty_vectors() {
        let mut a = article("a1", "Summit announced");
        assert!(!a.has_embedding());
        a.embedding = Some(vec![]);
        assert!(!a.has_embedding());
        a.embedding = Some(vec![0.1, 0.2]);
        assert!(a.has_embedding());
    }

    #[test]
    fn full_text_joins_title_and_description() {
        let mut a = article("a1", "Talks resume");
        assert_eq!(a.full_text(), "Talks resume");
        a.description = Some("Negotiators meet in Geneva".to_string());
        assert_eq!(a.full_text(), "Talks resume Negotiators meet in Geneva");
    }
}
