// Module declarations
pub mod density;
pub mod engine;
pub mod naming;
pub mod types;

pub use engine::ClusteringEngine;
pub use types::{ClusterStats, EventCluster};

// Module-level constants
pub const TARGET_CLUSTERING: &str = "clustering";

/// Maximum number of shared keywords kept on a cluster
pub const MAX_CLUSTER_KEYWORDS: usize = 10;

/// Maximum length of a generated event name
pub const EVENT_NAME_MAX_LEN: usize = 100;

/// Label used when no entities or keywords resolve to a usable event name
pub const FALLBACK_EVENT_NAME: &str = "Geopolitical Event";
