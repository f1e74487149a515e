use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref URGENCY_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"\b(imminent|urgent|immediate|breaking|crisis|emergency)\b").unwrap(),
        Regex::new(r"\b(escalat\w+|intensif\w+)\b").unwrap(),
        Regex::new(r"\b(deadline|ultimatum)\b").unwrap(),
        Regex::new(r"\b(critical|crucial|vital)\b").unwrap(),
        Regex::new(r"\b(now|today|tonight|must)\b").unwrap(),
    ];
}

/// Returns urgency markers matched in `text`.
///
/// Deduplicated, in order of first appearance per pattern. Inflected matches
/// keep their surface form ("escalating", not a stem).
pub fn detect(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let mut indicators = Vec::new();

    for pattern in URGENCY_PATTERNS.iter() {
        for capture in pattern.find_iter(&lower) {
            let term = capture.as_str().to_string();
            if seen.insert(term.clone()) {
                indicators.push(term);
            }
        }
    }

    indicators
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_and_dedupes_markers() {
        let found = detect("Urgent: urgent crisis talks set a deadline for today");
        assert_eq!(
            found,
            vec!["urgent", "crisis", "deadline", "today"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn matches_inflected_stems() {
        let found = detect("Fighting is escalating and shelling intensified overnight");
        assert!(found.contains(&"escalating".to_string()));
        assert!(found.contains(&"intensified".to_string()));
    }

    #[test]
    fn calm_text_yields_nothing() {
        assert!(detect("Quarterly trade figures released").is_empty());
    }
}
