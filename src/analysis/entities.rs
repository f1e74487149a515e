use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::keywords::tokenize;

// Fixed lexicons, in output order. Extraction walks these rather than the
// text so results are deterministic.
const COUNTRIES: &[&str] = &[
    "china", "russia", "usa", "america", "iran", "israel", "ukraine",
    "taiwan", "india", "pakistan", "korea", "japan", "germany", "france",
    "britain", "turkey", "syria", "iraq", "afghanistan", "greenland",
];

const LEADERS: &[&str] = &[
    "trump", "biden", "xi", "putin", "modi", "macron", "scholz",
    "erdogan", "netanyahu", "zelensky",
];

const ORGANIZATIONS: &[&str] = &["nato", "un", "eu", "brics", "who", "wto", "imf", "opec"];

/// Country, leader, and organization mentions found in a text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub countries: Vec<String>,
    pub leaders: Vec<String>,
    pub organizations: Vec<String>,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.leaders.is_empty() && self.organizations.is_empty()
    }

    /// All entities across the three categories, countries first.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.countries
            .iter()
            .chain(self.leaders.iter())
            .chain(self.organizations.iter())
    }
}

/// Returns the known entities mentioned in `text`.
pub fn extract(text: &str) -> ExtractedEntities {
    let words: HashSet<String> = tokenize(text).into_iter().collect();

    let hits = |lexicon: &[&str]| -> Vec<String> {
        lexicon
            .iter()
            .filter(|name| words.contains(**name))
            .map(|name| name.to_string())
            .collect()
    };

    ExtractedEntities {
        countries: hits(COUNTRIES),
        leaders: hits(LEADERS),
        organizations: hits(ORGANIZATIONS),
    }
}
