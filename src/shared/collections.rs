//! Helpers for the multi-valued fields of OCPI objects.
//!
//! Lists are kept duplicate-free in first-occurrence order, so comparing them
//! as sets (same length, every element contained in the other side) is exact.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Removes duplicates while keeping the first occurrence of every element.
pub fn distinct<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::new();
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

/// Order-independent equality: same count and every element of `a` is in `b`.
pub fn set_eq<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().all(|item| b.contains(item))
}

/// Order-independent comparison, consistent with [`set_eq`] for distinct lists.
pub fn set_cmp<T: Ord>(a: &[T], b: &[T]) -> Ordering {
    let mut left: Vec<&T> = a.iter().collect();
    let mut right: Vec<&T> = b.iter().collect();
    left.sort();
    right.sort();
    left.cmp(&right)
}

/// Order-independent hash, consistent with [`set_eq`].
pub fn hash_set<T: Hash, H: Hasher>(items: &[T], state: &mut H) {
    let combined = items
        .iter()
        .map(|item| {
            let mut hasher = DefaultHasher::new();
            item.hash(&mut hasher);
            hasher.finish()
        })
        .fold(0u64, u64::wrapping_add);

    state.write_usize(items.len());
    state.write_u64(combined);
}
