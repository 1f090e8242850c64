//! Analytics configuration.
//!
//! Only the behavioural segmentation thresholds are tunable; the cost-range
//! buckets are fixed ordered branches whose boundary tie-breaks are part of
//! the reported contract (see cost_segmentation.rs).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub segmentation: SegmentationConfig,
}

/// Thresholds for the customer lifetime segmentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// A customer must have been ordering for strictly more than this many
    /// whole calendar months to leave the "new" segment.
    pub loyalty_min_months: i64,
    /// Lifetime spend strictly above this marks a long-lived customer "vip"
    /// rather than "regular".
    pub vip_spend_threshold: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            loyalty_min_months: 12,
            vip_spend_threshold: 5000.0,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Load from a JSON file. In tests, use AnalyticsConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: AnalyticsConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
