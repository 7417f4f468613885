//! Drag configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How many items a free-form zone may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneCapacity {
    /// A zone holds one item; a correct drop onto an occupied zone is rejected
    #[default]
    Single,
    Multiple,
}

/// Which target wins when the pointer is inside several at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First match in registration order
    #[default]
    FirstRegistered,
    /// Smallest measured area; equal areas fall back to registration order
    SmallestArea,
}

/// Drag configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// How long a zone shows the rejected flash (milliseconds)
    pub flash_duration_ms: u64,

    pub zone_capacity: ZoneCapacity,

    pub tie_break: TieBreak,

    /// Treat a release outside the host viewport as a cancel
    pub cancel_outside_viewport: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            flash_duration_ms: 400,
            zone_capacity: ZoneCapacity::Single,
            tie_break: TieBreak::FirstRegistered,
            cancel_outside_viewport: true,
        }
    }
}

impl DragConfig {
    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: DragConfig =
            serde_json::from_str(r#"{ "tie_break": "smallest_area" }"#).unwrap();

        assert_eq!(config.tie_break, TieBreak::SmallestArea);
        assert_eq!(config.flash_duration(), Duration::from_millis(400));
        assert_eq!(config.zone_capacity, ZoneCapacity::Single);
        assert!(config.cancel_outside_viewport);
    }
}
