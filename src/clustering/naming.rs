use crate::analysis::TextAnalyzer;
use crate::article::Article;

use super::{EVENT_NAME_MAX_LEN, FALLBACK_EVENT_NAME};

/// Builds a human-readable event name for a cluster.
///
/// Preference order: most-mentioned leader, up to two most-mentioned
/// countries, and the cluster's top keyword, joined with " - ". Falls back to
/// the dominant title keywords, then to a fixed placeholder.
pub fn generate_event_name(
    analyzer: &TextAnalyzer,
    articles: &[&Article],
    keywords: &[String],
) -> String {
    let mut leader_counts: Vec<(String, usize)> = Vec::new();
    let mut country_counts: Vec<(String, usize)> = Vec::new();

    for article in articles {
        let entities = analyzer.extract_entities(&article.title);
        for leader in entities.leaders {
            tally(&mut leader_counts, leader);
        }
        for country in entities.countries {
            tally(&mut country_counts, country);
        }
    }

    let mut name_parts: Vec<String> = Vec::new();

    if let Some((leader, _)) = top_entry(&leader_counts) {
        name_parts.push(title_case(leader));
    }

    // Stable sort keeps first-seen order between equal counts.
    country_counts.sort_by(|a, b| b.1.cmp(&a.1));
    for (country, _) in country_counts.iter().take(2) {
        name_parts.push(title_case(country));
    }

    if let Some(keyword) = keywords.first() {
        name_parts.push(keyword.clone());
    }

    if name_parts.is_empty() {
        let all_titles: Vec<String> = articles.iter().map(|a| a.title.clone()).collect();
        let fallback = analyzer.extract_keywords(&all_titles.join(" "), 3);
        name_parts = fallback.iter().take(2).map(|kw| title_case(kw)).collect();
    }

    let event_name = if name_parts.is_empty() {
        FALLBACK_EVENT_NAME.to_string()
    } else {
        name_parts.join(" - ")
    };

    truncate_chars(&event_name, EVENT_NAME_MAX_LEN)
}

fn tally(counts: &mut Vec<(String, usize)>, name: String) {
    match counts.iter_mut().find(|(existing, _)| *existing == name) {
        Some((_, count)) => *count += 1,
        None => counts.push((name, 1)),
    }
}

/// Entry with the strictly highest count; first-seen wins ties.
fn top_entry(counts: &[(String, usize)]) -> Option<(&str, usize)> {
    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        if best.map(|(_, c)| *count > c).unwrap_or(true) {
            best = Some((name.as_str(), *count));
        }
    }
    best
}

/// Capitalizes the first letter of each whitespace-separated word.
pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
