//! Key ordering for serialized payloads.
//!
//! Gateways and existing test fixtures compare payloads byte for byte, so
//! the order in which object keys are written is part of the wire format.
//! [`KeyOrder::Legacy`] writes keys in the iteration order of the hash table
//! that earlier APNS clients kept their payload dictionaries in (Java's
//! `HashMap`): keys are grouped by bucket, and keys that share a bucket keep
//! the order they were inserted in.

use serde::{Deserialize, Serialize};

/// Bucket count of a freshly created table.
pub(crate) const INITIAL_BUCKETS: usize = 16;

/// Chain length at which the table grows instead of chaining further.
const TREEIFY_THRESHOLD: usize = 8;

/// Below this many buckets an overlong chain doubles the table.
const MIN_TREEIFY_BUCKETS: usize = 64;

/// Order in which object keys are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOrder {
    /// Hash-bucket order of the legacy payload dictionaries. Reals outside
    /// `[1e-3, 1e7)` are also written in the legacy exponent form (`1.0E-4`).
    #[default]
    Legacy,
    /// Plain insertion order.
    Insertion,
}

/// Hash of `key` as computed over its UTF-16 code units.
fn legacy_hash(key: &str) -> u32 {
    let hash = key
        .encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)));
    hash ^ (hash >> 16)
}

/// Bucket `key` falls into in a table of `buckets` buckets.
///
/// `buckets` is always a power of two.
pub(crate) fn bucket_index(key: &str, buckets: usize) -> usize {
    legacy_hash(key) as usize & (buckets - 1)
}

/// Bucket count after `new_key` is added to a table holding `keys`.
///
/// `len_after` is the entry count including `new_key`. Tables never shrink.
pub(crate) fn grown_buckets<'a>(
    buckets: usize,
    new_key: &str,
    keys: impl Iterator<Item = &'a str>,
    len_after: usize,
) -> usize {
    let mut buckets = buckets;

    let target = bucket_index(new_key, buckets);
    let chained = keys.filter(|key| bucket_index(key, buckets) == target).count();
    if chained >= TREEIFY_THRESHOLD && buckets < MIN_TREEIFY_BUCKETS {
        buckets *= 2;
    }

    // 0.75 load factor
    if len_after > buckets / 4 * 3 {
        buckets *= 2;
    }

    buckets
}

/// Positions of `keys` in the order they should be written.
pub(crate) fn ordered_positions<'a>(
    keys: impl Iterator<Item = &'a str>,
    buckets: usize,
    order: KeyOrder,
) -> Vec<usize> {
    match order {
        KeyOrder::Insertion => keys.enumerate().map(|(pos, _)| pos).collect(),
        KeyOrder::Legacy => {
            let mut slots: Vec<(usize, usize)> = keys
                .enumerate()
                .map(|(pos, key)| (bucket_index(key, buckets), pos))
                .collect();
            slots.sort_unstable();
            slots.into_iter().map(|(_, pos)| pos).collect()
        }
    }
}
