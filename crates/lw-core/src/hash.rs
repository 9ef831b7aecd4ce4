//! Fast hash map aliases.
//!
//! Highlight spans are keyed by line number, so the maps built on every
//! refresh use the Fx hash algorithm from `rustc-hash`, which is considerably
//! faster than SipHash for small integer keys. None of these maps are exposed
//! to untrusted input, so denial-of-service resistance is not required.
//!
//! # Examples
//!
//! ```
//! use lw_core::{FxHashMap, fx_hash_map};
//!
//! let mut map: FxHashMap<usize, &str> = fx_hash_map();
//! map.insert(12, "ERROR disk full");
//! assert_eq!(map.get(&12), Some(&"ERROR disk full"));
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Creates a new empty [`FxHashMap`].
#[inline]
#[must_use]
pub fn fx_hash_map<K, V>() -> FxHashMap<K, V> {
    FxHashMap::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_hash_map_line_keys() {
        let mut map: FxHashMap<usize, &str> = fx_hash_map();
        map.insert(1, "first");
        map.insert(40_000, "far");
        assert_eq!(map.get(&1), Some(&"first"));
        assert_eq!(map.get(&40_000), Some(&"far"));
        assert_eq!(map.get(&2), None);
    }
}
