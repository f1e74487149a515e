// Module declarations
pub mod outlook;
pub mod predictor;
pub mod types;

pub use predictor::TrajectoryPredictor;
pub use types::{
    AttentionMetrics, CoverageTrend, EventPrediction, ReportStatus, SummaryReport, Trajectory,
};

// Module-level constants
pub const TARGET_TRAJECTORY: &str = "trajectory";

/// Urgency-indicator count above which an event reads as high urgency
pub const HIGH_URGENCY_COUNT: usize = 5;

/// Keywords whose presence among key phrases marks elevated risk
pub const HIGH_RISK_KEYWORDS: &[&str] = &["military", "invasion", "war", "weapon", "strike", "attack"];
