pub mod entities;
pub mod keywords;
pub mod sentiment;
pub mod similarity;
pub mod urgency;

pub use entities::ExtractedEntities;
pub use similarity::cosine_similarity;

/// Number of top keywords drawn from each period when comparing rhetoric
pub const COMPARISON_KEYWORDS: usize = 20;

/// Lexical text analysis used by every pipeline stage.
///
/// Pure functions over text: no model state, no I/O. Construct one instance
/// per process and pass it to the stages that need it; embeddings themselves
/// are produced upstream and arrive attached to articles.
#[derive(Debug, Default)]
pub struct TextAnalyzer;

impl TextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Extracts the `top_n` most frequent keywords from `text`.
    pub fn extract_keywords(&self, text: &str, top_n: usize) -> Vec<String> {
        keywords::extract_keywords(text, top_n)
    }

    /// Extracts the 20 most frequent n-gram phrases from `text`.
    pub fn extract_phrases(&self, text: &str, n_gram: usize) -> Vec<(String, usize)> {
        keywords::extract_phrases(text, n_gram)
    }

    /// Scores `text` in [-1.0, 1.0] by lexicon hit counting.
    pub fn sentiment(&self, text: &str) -> f64 {
        sentiment::score(text)
    }

    /// Returns urgency markers matched in `text`, deduplicated, in order of
    /// first appearance.
    pub fn detect_urgency(&self, text: &str) -> Vec<String> {
        urgency::detect(text)
    }

    /// Returns country, leader, and organization mentions found in `text`.
    pub fn extract_entities(&self, text: &str) -> ExtractedEntities {
        entities::extract(text)
    }

    /// Cosine similarity between two embeddings.
    ///
    /// # Returns
    /// * `Err` on dimension mismatch or near-zero magnitude
    pub fn cosine_similarity(&self, a: &[f32], b: &[f32]) -> anyhow::Result<f32> {
        similarity::cosine_similarity(a, b)
    }

    /// Compares the rhetoric of two groups of texts (typically the early and
    /// recent halves of a cluster's timeline).
    pub fn compare_rhetoric(&self, early: &[String], recent: &[String]) -> RhetoricComparison {
        let early_text = early.join(" ");
        let recent_text = recent.join(" ");

        let early_keywords = keywords::extract_keywords(&early_text, COMPARISON_KEYWORDS);
        let recent_keywords = keywords::extract_keywords(&recent_text, COMPARISON_KEYWORDS);

        // Keyword diffs keep extraction (frequency) rank.
        let new_keywords: Vec<String> = recent_keywords
            .iter()
            .filter(|kw| !early_keywords.contains(kw))
            .cloned()
            .collect();
        let dropped_keywords: Vec<String> = early_keywords
            .iter()
            .filter(|kw| !recent_keywords.contains(kw))
            .cloned()
            .collect();

        let early_sentiment = mean_sentiment(early);
        let recent_sentiment = mean_sentiment(recent);

        let early_urgency: i64 = early
            .iter()
            .map(|t| urgency::detect(t).len() as i64)
            .sum();
        let recent_urgency: i64 = recent
            .iter()
            .map(|t| urgency::detect(t).len() as i64)
            .sum();

        RhetoricComparison {
            sentiment_change: recent_sentiment - early_sentiment,
            urgency_change: recent_urgency - early_urgency,
            new_keywords,
            dropped_keywords,
        }
    }
}

fn mean_sentiment(texts: &[String]) -> f64 {
    if texts.is_empty() {
        return 0.0;
    }
    texts.iter().map(|t| sentiment::score(t)).sum::<f64>() / texts.len() as f64
}

/// How the rhetoric of a recent period differs from an earlier one.
#[derive(Debug, Clone)]
pub struct RhetoricComparison {
    /// Mean lexical sentiment of the recent texts minus the early texts.
    pub sentiment_change: f64,
    /// Total urgency-marker count of the recent texts minus the early texts.
    pub urgency_change: i64,
    /// Top keywords present only in the recent period.
    pub new_keywords: Vec<String>,
    /// Top keywords present only in the early period.
    pub dropped_keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_rhetoric_detects_deterioration() {
        let analyzer = TextAnalyzer::new();
        let early = vec![
            "Leaders praise peace agreement and cooperation".to_string(),
            "Diplomatic dialogue brings progress".to_string(),
        ];
        let recent = vec![
            "Military threat raises fears of war".to_string(),
            "Crisis deepens as sanctions and hostility mount".to_string(),
        ];

        let cmp = analyzer.compare_rhetoric(&early, &recent);
        assert!(cmp.sentiment_change < 0.0);
        assert!(cmp.new_keywords.iter().any(|k| k == "military"));
        assert!(cmp.dropped_keywords.iter().any(|k| k == "peace"));
    }

    #[test]
    fn compare_rhetoric_counts_urgency_shift() {
        let analyzer = TextAnalyzer::new();
        let early = vec!["Routine ministerial meeting scheduled".to_string()];
        let recent = vec![
            "Breaking: urgent crisis talks tonight".to_string(),
            "Imminent deadline forces emergency session".to_string(),
        ];

        let cmp = analyzer.compare_rhetoric(&early, &recent);
        assert!(cmp.urgency_change >= 4);
    }

    #[test]
    fn compare_rhetoric_is_neutral_for_empty_input() {
        let analyzer = TextAnalyzer::new();
        let cmp = analyzer.compare_rhetoric(&[], &[]);
        assert_eq!(cmp.sentiment_change, 0.0);
        assert_eq!(cmp.urgency_change, 0);
        assert!(cmp.new_keywords.is_empty());
        assert!(cmp.dropped_keywords.is_empty());
    }
}
