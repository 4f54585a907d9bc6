use serde::{Deserialize, Serialize};

/// Total capacity assumed for the storage area: 5 MiB.
pub const ASSUMED_CAPACITY_BYTES: i64 = 5 * 1024 * 1024;

/// Heuristic usage report for the storage area.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuotaEstimate {
    pub used_bytes: i64,
    pub remaining_bytes: i64,
    pub remaining_percent: f64,
}

impl QuotaEstimate {
    /// Builds an estimate from a byte count against the fixed capacity.
    pub fn from_used(used_bytes: i64) -> Self {
        let remaining_bytes = ASSUMED_CAPACITY_BYTES - used_bytes;
        Self {
            used_bytes,
            remaining_bytes,
            remaining_percent: remaining_bytes as f64 / ASSUMED_CAPACITY_BYTES as f64 * 100.0,
        }
    }
}

impl Default for QuotaEstimate {
    fn default() -> Self {
        Self::from_used(0)
    }
}
