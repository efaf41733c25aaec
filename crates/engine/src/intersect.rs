//! Intersection of identifier collections
//!
//! Used by the query path when more than one indexed field is constrained.
//! The shortest collection is walked first and seeds a per-id counter; every
//! following collection can only advance ids whose counter equals the number
//! of collections already walked. An id is emitted when the last collection
//! confirms it, so each id appears once even if an input repeats it.
//!
//! Cost is O(sum of collection sizes) with memory bounded by the shortest
//! collection. Output follows the order of the last collection walked.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Identifiers present in every collection, each exactly once
///
/// Zero collections yield nothing; a single collection yields its ids
/// de-duplicated in their original order. The result is deterministic for a
/// given input order.
pub fn intersect<T, C>(collections: &[C]) -> Vec<T>
where
    T: Copy + Eq + Hash,
    C: AsRef<[T]>,
{
    match collections.len() {
        0 => return Vec::new(),
        1 => {
            let mut seen = HashSet::new();
            return collections[0]
                .as_ref()
                .iter()
                .copied()
                .filter(|id| seen.insert(*id))
                .collect();
        }
        _ => {}
    }

    let shortest = collections
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| c.as_ref().len())
        .map(|(i, _)| i)
        .unwrap_or(0);
    let last_pass = collections.len() - 1;

    let mut confirmed: HashMap<T, usize> =
        HashMap::with_capacity(collections[shortest].as_ref().len());
    let mut result = Vec::new();

    let walk = std::iter::once(shortest).chain((0..collections.len()).filter(|&i| i != shortest));
    for (pass, idx) in walk.enumerate() {
        let ids = collections[idx].as_ref();
        if pass == 0 {
            for &id in ids {
                confirmed.insert(id, 1);
            }
            continue;
        }

        let mut advanced = 0usize;
        for &id in ids {
            if let Some(count) = confirmed.get_mut(&id) {
                if *count == pass {
                    *count += 1;
                    advanced += 1;
                    if pass == last_pass {
                        result.push(id);
                    }
                }
            }
        }
        if advanced == 0 {
            return Vec::new();
        }
    }

    result
}
