//! Quota Estimator for LinkStash.
//!
//! Approximates how much of the storage area is in use. Every stored value
//! is charged two bytes per UTF-16 code unit and compared with a fixed 5 MiB
//! capacity; keys themselves are not charged. This is a heuristic and makes
//! no attempt to query the real limits of the backing store.

use tracing::warn;

use crate::database::KeyValueStore;
use crate::types::errors::StorageError;
use crate::types::quota::QuotaEstimate;

/// Bytes charged for a stored value.
pub fn value_bytes(value: &str) -> i64 {
    value.encode_utf16().count() as i64 * 2
}

/// Sums the charge for every value currently in the store.
pub fn used_bytes<S: KeyValueStore + ?Sized>(store: &S) -> Result<i64, StorageError> {
    Ok(store
        .entries()?
        .iter()
        .map(|(_, value)| value_bytes(value))
        .sum())
}

/// Usage the store would report after replacing `key` with `new_value`.
pub fn projected_usage<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    new_value: &str,
) -> Result<i64, StorageError> {
    let others: i64 = store
        .entries()?
        .iter()
        .filter(|(k, _)| k != key)
        .map(|(_, value)| value_bytes(value))
        .sum();
    Ok(others + value_bytes(new_value))
}

/// Computes a usage estimate for the store.
///
/// Never fails: if the store cannot be enumerated the estimate reports zero
/// usage and the failure is logged.
pub fn estimate<S: KeyValueStore + ?Sized>(store: &S) -> QuotaEstimate {
    match used_bytes(store) {
        Ok(used) => QuotaEstimate::from_used(used),
        Err(e) => {
            warn!(error = %e, "could not enumerate storage for quota estimate");
            QuotaEstimate::default()
        }
    }
}
