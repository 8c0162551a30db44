use std::time::Duration;

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum time between autosave snapshots.
    pub autosave_interval: Duration,
    /// Storage key the draft snapshot is saved under.
    pub autosave_key: String,
    /// Platforms refreshed after every commit, in publish order.
    pub preview_platforms: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            autosave_interval: Duration::from_secs(5),
            autosave_key: "tagsmith:draft".to_string(),
            preview_platforms: vec![
                "google".to_string(),
                "facebook".to_string(),
                "twitter".to_string(),
                "linkedin".to_string(),
            ],
        }
    }
}
