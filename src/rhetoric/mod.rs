// Module declarations
pub mod analyzer;
pub mod compare;
pub mod types;

pub use analyzer::RhetoricAnalyzer;
pub use types::{
    ActorMention, ClusterComparison, KeyPhrase, LinguisticFeatures, Period, RhetoricAnalysis,
    SentimentPoint, ShiftDirection, Tone, ToneShift,
};

// Module-level constants
pub const TARGET_RHETORIC: &str = "rhetoric";

/// Cap on new/dropped keywords reported by a tone shift
pub const MAX_SHIFT_KEYWORDS: usize = 5;
