//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Reuse harmony metrics computed from identical inputs
    #[serde(default)]
    pub enable_balance_cache: bool,
}
