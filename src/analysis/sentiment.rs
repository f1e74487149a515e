use lazy_static::lazy_static;
use std::collections::HashSet;

use super::keywords::tokenize;

lazy_static! {
    static ref POSITIVE_WORDS: HashSet<&'static str> = [
        "peace", "agreement", "cooperation", "dialogue", "resolve", "support",
        "alliance", "positive", "success", "progress", "stability", "diplomatic",
    ]
    .iter()
    .copied()
    .collect();
    static ref NEGATIVE_WORDS: HashSet<&'static str> = [
        "war", "conflict", "crisis", "threat", "attack", "violence", "tension",
        "dispute", "sanctions", "invasion", "hostility", "aggression", "warning",
        "menacing", "escalate", "condemn", "oppose",
    ]
    .iter()
    .copied()
    .collect();
}

/// Scores text in [-1.0, 1.0] by counting lexicon hits.
///
/// Returns 0.0 when no lexicon word appears.
pub fn score(text: &str) -> f64 {
    let mut positive = 0usize;
    let mut negative = 0usize;

    for token in tokenize(text) {
        if POSITIVE_WORDS.contains(token.as_str()) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(token.as_str()) {
            negative += 1;
        }
    }

    let total = positive + negative;
    if total == 0 {
        return 0.0;
    }

    (positive as f64 - negative as f64) / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_scores_positive() {
        assert_eq!(score("Historic peace agreement brings cooperation"), 1.0);
    }

    #[test]
    fn negative_text_scores_negative() {
        assert_eq!(score("War and invasion threat"), -1.0);
    }

    #[test]
    fn mixed_text_is_proportional() {
        // one positive hit, one negative hit
        let s = score("peace talks amid war fears");
        assert!(s.abs() < f64::EPSILON);
    }

    #[test]
    fn neutral_text_scores_zero() {
        assert_eq!(score("Weather forecast for the weekend"), 0.0);
    }
}
