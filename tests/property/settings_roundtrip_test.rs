//! Property-based tests for the settings key/value store.
//!
//! For any sequence of writes, reading a key returns the last value written
//! to it, and keys never written return the caller's default.

use std::collections::HashMap;
use std::sync::Arc;

use novabrowse::database::Database;
use novabrowse::managers::storage_manager::{StorageManager, StorageManagerTrait};
use proptest::prelude::*;

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("search_engine".to_string()),
        Just("homepage".to_string()),
        "[a-z_]{1,12}",
    ]
}

fn arb_writes() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((arb_key(), ".{0,40}"), 0..30)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn settings_last_write_wins(writes in arb_writes()) {
        let db = Database::open_in_memory().expect("open_in_memory failed");
        let mgr = StorageManager::new(Arc::new(db));
        let mut expected: HashMap<String, String> = HashMap::new();

        for (key, value) in &writes {
            mgr.set_setting(key, value).unwrap();
            expected.insert(key.clone(), value.clone());
        }

        for (key, value) in &expected {
            prop_assert_eq!(&mgr.get_setting(key, "<default>"), value);
        }
    }

    #[test]
    fn unset_keys_return_default(key in "[A-Z]{1,12}", default in ".{0,20}") {
        let db = Database::open_in_memory().expect("open_in_memory failed");
        let mgr = StorageManager::new(Arc::new(db));
        mgr.set_setting("homepage", "https://example.com").unwrap();
        prop_assert_eq!(mgr.get_setting(&key, &default), default);
    }
}
