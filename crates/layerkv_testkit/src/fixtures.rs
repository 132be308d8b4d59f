//! Fixtures for common map states.

use layerkv_core::TransactionalMap;

/// Builds a map with `pairs` committed to the base.
pub fn map_with<V: Clone>(pairs: &[(&str, V)]) -> TransactionalMap<V> {
    let mut map = TransactionalMap::new();
    for (key, value) in pairs {
        map.set(*key, value.clone());
    }
    map
}

/// Builds a map where level `i` (1-based) sets `key` to `i`.
///
/// The base holds `key = 0`, so the visible value equals the depth.
pub fn layered_map(key: &str, depth: usize) -> TransactionalMap<usize> {
    let mut map = TransactionalMap::new();
    map.set(key, 0);
    for level in 1..=depth {
        map.begin();
        map.set(key, level);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_with_commits_to_base() {
        let map = map_with(&[("a", 1), ("b", 2)]);
        assert_eq!(map.depth(), 0);
        assert_eq!(map.list_keys(), vec!["a", "b"]);
    }

    #[test]
    fn layered_map_value_tracks_depth() {
        let mut map = layered_map("k", 3);
        assert_eq!(map.get("k"), Ok(&3));
        map.rollback().unwrap();
        assert_eq!(map.get("k"), Ok(&2));
    }
}
