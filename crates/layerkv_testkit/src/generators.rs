//! Property-based test generators using proptest.
//!
//! Keys are drawn from a small alphabet so that random sequences collide
//! often enough to exercise shadowing, tombstones and merges.

use crate::model::Op;
use proptest::prelude::*;

/// Strategy for keys from a small, colliding key space.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d", "e"]).prop_map(str::to_owned)
}

/// Strategy for arbitrary printable keys.
pub fn wide_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("Invalid regex")
}

/// Strategy for a single operation.
///
/// Transaction boundaries are weighted so that sequences reach depths of
/// three or four regularly.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => key_strategy().prop_map(Op::Get),
        4 => (key_strategy(), -100i64..100).prop_map(|(k, v)| Op::Set(k, v)),
        2 => key_strategy().prop_map(Op::Delete),
        1 => key_strategy().prop_map(Op::Exists),
        2 => Just(Op::Begin),
        1 => Just(Op::Commit),
        1 => Just(Op::Rollback),
        1 => Just(Op::ListKeys),
    ]
}

/// Strategy for an operation sequence, optionally including `clear`.
pub fn ops_strategy(max_len: usize, with_clear: bool) -> impl Strategy<Value = Vec<Op>> {
    let op = if with_clear {
        prop_oneof![20 => op_strategy(), 1 => Just(Op::Clear)].boxed()
    } else {
        op_strategy().boxed()
    };
    prop::collection::vec(op, 0..max_len)
}

/// Strategy for an initial base state.
pub fn base_state_strategy() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec((key_strategy(), any::<i64>()), 0..5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn generated_keys_are_from_alphabet() {
        let mut runner = TestRunner::default();
        for _ in 0..50 {
            let key = key_strategy().new_tree(&mut runner).unwrap().current();
            assert!(["a", "b", "c", "d", "e"].contains(&key.as_str()));
        }
    }

    #[test]
    fn sequences_respect_length() {
        let mut runner = TestRunner::default();
        for _ in 0..20 {
            let ops = ops_strategy(10, true).new_tree(&mut runner).unwrap().current();
            assert!(ops.len() < 10);
        }
    }
}
