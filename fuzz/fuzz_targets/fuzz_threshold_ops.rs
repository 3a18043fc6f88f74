//! Fuzz target: `ThresholdStore`
//!
//! Interprets the input as a stream of (opcode, operand) pairs and
//! applies increment / decrement / set / reload, verifying:
//! - The value never leaves [0, 100]
//! - Storage never holds an out-of-range value
//! - A reload returns the last value that was successfully written
//! - A value whose write failed is written again by the next mutation
//!
//! cargo fuzz run fuzz_threshold_ops

#![no_main]

use libfuzzer_sys::fuzz_target;
use smart_irrigation::control::threshold::{DEFAULT_THRESHOLD, THRESHOLD_KEY, ThresholdStore};

// ── In-memory StoragePort for fuzz testing ────────────────────

use smart_irrigation::app::ports::{StorageError, StoragePort};
use std::collections::HashMap;

struct MemStore {
    data: HashMap<String, i32>,
    fail_writes: bool,
}

impl StoragePort for MemStore {
    fn get_int(&self, key: &str) -> Result<Option<i32>, StorageError> {
        Ok(self.data.get(key).copied())
    }

    fn put_int(&mut self, key: &str, value: i32) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::IoError);
        }
        self.data.insert(key.to_string(), value);
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let mut store = MemStore {
        data: HashMap::new(),
        fail_writes: false,
    };
    let mut t = ThresholdStore::load(&store);
    // Last value that reached storage.
    let mut persisted: Option<u8> = None;

    for pair in data.chunks_exact(2) {
        let (op, arg) = (pair[0] % 5, pair[1]);
        let before = t.current();
        let was_dirty = t.is_dirty();
        let after = match op {
            0 => t.increment(arg, &mut store),
            1 => t.decrement(arg, &mut store),
            2 => t.set_absolute(i32::from(arg as i8) * 3, &mut store),
            3 => {
                store.fail_writes = !store.fail_writes;
                continue;
            }
            _ => {
                let reloaded = ThresholdStore::load(&store);
                assert_eq!(reloaded.current(), persisted.unwrap_or(DEFAULT_THRESHOLD));
                continue;
            }
        };
        if (after != before || was_dirty) && !store.fail_writes {
            persisted = Some(after);
        }
        // A successful write always clears the pending flag.
        assert_eq!(t.is_dirty(), store.fail_writes && (was_dirty || after != before));

        assert!(t.current() <= 100);
        if let Some(&v) = store.data.get(THRESHOLD_KEY) {
            assert!((0..=100).contains(&v));
        }
    }
});
