use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    static ref STOP_WORDS: HashSet<&'static str> = [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
        "of", "with", "by", "from", "as", "is", "was", "are", "were", "been",
        "be", "have", "has", "had", "do", "does", "did", "will", "would",
        "could", "should", "may", "might", "must", "can", "that", "this",
        "these", "those", "it", "its", "he", "she", "they", "them", "their",
    ]
    .iter()
    .copied()
    .collect();
}

/// Splits text into lowercase word tokens.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Extracts the `top_n` most frequent keywords from `text`.
///
/// Keywords are lowercase tokens longer than three characters that are not
/// stop words. Ties are broken by order of first appearance, so results are
/// deterministic for a given text.
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<String> {
    let tokens = tokenize(text);

    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, token) in tokens.iter().enumerate() {
        if token.chars().count() <= 3 || STOP_WORDS.contains(token.as_str()) {
            continue;
        }
        let entry = counts.entry(token.as_str()).or_insert((0, position));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(word, _, _)| word.to_string())
        .collect()
}

/// Extracts the 20 most frequent `n_gram`-word phrases from `text`.
///
/// All tokens participate (no stop-word filtering); ties are broken by order
/// of first appearance.
pub fn extract_phrases(text: &str, n_gram: usize) -> Vec<(String, usize)> {
    let tokens = tokenize(text);
    if n_gram == 0 || tokens.len() < n_gram {
        return Vec::new();
    }

    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, window) in tokens.windows(n_gram).enumerate() {
        let phrase = window.join(" ");
        let entry = counts.entry(phrase).or_insert((0, position));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(phrase, (count, first))| (phrase, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(20)
        .map(|(phrase, count, _)| (phrase, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_skip_stop_words_and_short_tokens() {
        let keywords = extract_keywords(
            "The sanctions and the sanctions on the port were new sanctions",
            5,
        );
        assert_eq!(keywords[0], "sanctions");
        assert!(!keywords.contains(&"the".to_string()));
        // "port" and "new" have four and three characters respectively
        assert!(!keywords.contains(&"new".to_string()));
        assert!(keywords.contains(&"port".to_string()));
    }

    #[test]
    fn keyword_ties_break_by_first_appearance() {
        let keywords = extract_keywords("border troops border troops crossing", 3);
        assert_eq!(keywords, vec!["border", "troops", "crossing"]);
    }

    #[test]
    fn phrases_count_bigrams() {
        let phrases = extract_phrases("naval blockade tightens naval blockade", 2);
        assert_eq!(phrases[0], ("naval blockade".to_string(), 2));
    }

    #[test]
    fn phrases_handle_short_input() {
        assert!(extract_phrases("word", 2).is_empty());
        assert!(extract_phrases("", 2).is_empty());
    }
}
