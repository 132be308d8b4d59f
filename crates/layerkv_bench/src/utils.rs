//! Benchmark utilities.

use layerkv_core::TransactionalMap;
use rand::Rng;

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key_{i:08}")).collect()
}

/// Generate a random value.
pub fn random_value() -> u64 {
    rand::thread_rng().gen()
}

/// Build a map with `keys` in the base and `depth` open transactions, each
/// overwriting a tenth of the keys.
pub fn layered_map(keys: &[String], depth: usize) -> TransactionalMap<u64> {
    let mut map = TransactionalMap::new();
    for key in keys {
        map.set(key.as_str(), random_value());
    }
    for level in 0..depth {
        map.begin();
        for key in keys.iter().skip(level % 10).step_by(10) {
            map.set(key.as_str(), random_value());
        }
    }
    map
}
