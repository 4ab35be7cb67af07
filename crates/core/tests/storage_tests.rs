// ═══════════════════════════════════════════════════════════════════
// Storage Tests — snapshot codec, key-value stores, StorageManager
// ═══════════════════════════════════════════════════════════════════

use hearts_dashboard_core::errors::CoreError;
use hearts_dashboard_core::models::dashboard::DashboardState;
use hearts_dashboard_core::models::field::FieldUpdate;
use hearts_dashboard_core::models::settings::DEFAULT_STORAGE_KEY;
use hearts_dashboard_core::services::dashboard_service::DashboardService;
use hearts_dashboard_core::storage::backend::{FileStore, KeyValueStore, MemoryStore};
use hearts_dashboard_core::storage::manager::StorageManager;
use hearts_dashboard_core::storage::snapshot;

/// A state with something in every collection.
fn busy_state() -> DashboardState {
    let svc = DashboardService::new();
    let mut s = DashboardState::default();
    s = svc.update_field(&s, FieldUpdate::TargetAmount(15_000_000));
    s = svc.update_field(&s, FieldUpdate::PricePerUnit(100_000));
    s = svc.update_field(&s, FieldUpdate::HeartsPerTrip(2));
    s = svc.update_field(&s, FieldUpdate::InvestmentPerTrip(30_000));
    s = svc.update_city_price(&s, "caerleon", 95_000);
    s = svc.update_city_price(&s, "caerleon", 98_000);
    s = svc.update_city_price(&s, "martlock", 44_000);
    s = svc.set_active_city(&s, "martlock");
    s = svc.add_history_entry(&s);
    s = svc.complete_trip(&s);
    s = svc.complete_trip(&s);
    s
}

/// Store whose reads and writes always fail.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn name(&self) -> &str {
        "broken"
    }

    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Err(CoreError::StorageRead {
            key: key.to_string(),
            message: "disk on fire".into(),
        })
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::StorageWrite {
            key: key.to_string(),
            message: "quota exceeded".into(),
        })
    }

    fn remove(&mut self, _key: &str) -> Result<(), CoreError> {
        Err(CoreError::StorageUnavailable("gone".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════
// Snapshot codec
// ═══════════════════════════════════════════════════════════════════

mod snapshot_codec {
    use super::*;

    #[test]
    fn round_trip_default() {
        let s = DashboardState::default();
        let json = snapshot::encode(&s).unwrap();
        assert_eq!(snapshot::decode(&json).unwrap(), s);
    }

    #[test]
    fn round_trip_busy_state() {
        let s = busy_state();
        let json = snapshot::encode(&s).unwrap();
        assert_eq!(snapshot::decode(&json).unwrap(), s);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(snapshot::decode("{}").unwrap(), DashboardState::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let s = snapshot::decode(r#"{"targetAmount": 5000, "heartsPerTrip": 3}"#).unwrap();
        assert_eq!(s.target_amount, 5000);
        assert_eq!(s.hearts_per_trip, 3);
        assert_eq!(s.price_per_unit, 0);
        assert_eq!(s.active_city_id, "caerleon");
        assert_eq!(s.cities.len(), 6);
    }

    #[test]
    fn null_counts_as_missing() {
        let s = snapshot::decode(r#"{"targetAmount": null, "cities": null}"#).unwrap();
        assert_eq!(s, DashboardState::default());
    }

    #[test]
    fn unknown_fields_survive_round_trip() {
        let s = snapshot::decode(r#"{"profitPerTrip": 12, "marketPrice": 40000}"#).unwrap();
        assert_eq!(s.extra.len(), 2);

        let json = snapshot::encode(&s).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["profitPerTrip"], 12);
        assert_eq!(value["marketPrice"], 40000);
        assert_eq!(snapshot::decode(&json).unwrap(), s);
    }

    #[test]
    fn partial_city_list_is_completed() {
        let s = snapshot::decode(
            r#"{"cities":[{"id":"lymhurst","name":"Lymhurst","price":43000,"priceHistory":[]}]}"#,
        )
        .unwrap();
        assert_eq!(s.cities.len(), 6);
        assert_eq!(s.city("lymhurst").unwrap().price, 43_000);
        assert_eq!(s.cities[5].id, "lymhurst");
    }

    #[test]
    fn malformed_json_is_error() {
        let err = snapshot::decode("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn non_object_is_error() {
        let err = snapshot::decode("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, CoreError::InvalidSnapshot(_)));
    }

    #[test]
    fn wrong_collection_type_is_error() {
        let err = snapshot::decode(r#"{"cities": 5}"#).unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn odd_scalar_amounts_are_coerced() {
        let s = snapshot::decode(
            r#"{"currentHearts": -3, "targetAmount": 1500.5, "pricePerUnit": "99000",
                "heartsPerTrip": "lots", "investmentPerTrip": true, "tripsCompleted": 4}"#,
        )
        .unwrap();
        assert_eq!(s.current_hearts, 0);
        assert_eq!(s.target_amount, 1500);
        assert_eq!(s.price_per_unit, 99_000);
        assert_eq!(s.hearts_per_trip, 0);
        assert_eq!(s.investment_per_trip, 0);
        assert_eq!(s.trips_completed, 4);
    }

    #[test]
    fn large_whole_amount_is_exact() {
        let s = snapshot::decode(r#"{"targetAmount": 18446744073709551615}"#).unwrap();
        assert_eq!(s.target_amount, u64::MAX);
    }

    #[test]
    fn fractional_city_and_log_amounts_are_coerced() {
        let mut value: serde_json::Value =
            serde_json::from_str(&snapshot::encode(&busy_state()).unwrap()).unwrap();
        value["cities"][3]["price"] = serde_json::json!(98_000.75);
        value["cities"][3]["priceHistory"][0]["price"] = serde_json::json!(-1);
        value["tripLog"][0]["heartsEarned"] = serde_json::json!(2.5);

        let s = snapshot::decode(&value.to_string()).unwrap();
        let caerleon = s.city("caerleon").unwrap();
        assert_eq!(caerleon.price, 98_000);
        assert_eq!(caerleon.price_history[0].price, 0);
        assert_eq!(s.trip_log[0].hearts_earned, 2);
        assert_eq!(s.trip_log.len(), 2);
    }

    #[test]
    fn one_bad_scalar_keeps_every_log() {
        let original = busy_state();
        for patched in [serde_json::json!(-5), serde_json::json!(1500.5)] {
            let mut value: serde_json::Value =
                serde_json::from_str(&snapshot::encode(&original).unwrap()).unwrap();
            value["targetAmount"] = patched;

            let s = snapshot::decode(&value.to_string()).unwrap();
            assert_eq!(s.trips_completed, 2);
            assert_eq!(s.trip_log, original.trip_log);
            assert_eq!(s.history, original.history);
            assert_eq!(s.cities, original.cities);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn clones_share_entries() {
        let mut store = MemoryStore::new();
        let handle = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(handle.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn with_entry_seeds() {
        let store = MemoryStore::with_entry("k", "v");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    #[test]
    fn set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), None);
        store.set(DEFAULT_STORAGE_KEY, "{}").unwrap();
        assert!(dir.path().join("albion-hearts-dashboard.json").exists());
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some("{}"));

        store.remove(DEFAULT_STORAGE_KEY).unwrap();
        store.remove(DEFAULT_STORAGE_KEY).unwrap();
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = FileStore::new(&nested);
        store.set("snap", "{}").unwrap();
        assert!(nested.join("snap.json").exists());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(store.set(key, "{}"), Err(CoreError::StorageUnavailable(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// StorageManager
// ═══════════════════════════════════════════════════════════════════

mod manager {
    use super::*;

    #[test]
    fn save_then_load_round_trip() {
        let mut store = MemoryStore::new();
        let s = busy_state();
        StorageManager::save(&mut store, "k", &s).unwrap();
        assert_eq!(StorageManager::load(&store, "k").unwrap(), Some(s));
    }

    #[test]
    fn save_overwrites() {
        let mut store = MemoryStore::new();
        StorageManager::save(&mut store, "k", &busy_state()).unwrap();
        StorageManager::save(&mut store, "k", &DashboardState::default()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            StorageManager::load(&store, "k").unwrap(),
            Some(DashboardState::default())
        );
    }

    #[test]
    fn load_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(StorageManager::load(&store, "k").unwrap(), None);
    }

    #[test]
    fn load_or_default_on_missing() {
        let store = MemoryStore::new();
        assert_eq!(
            StorageManager::load_or_default(&store, "k"),
            DashboardState::default()
        );
    }

    #[test]
    fn load_or_default_on_garbage() {
        let store = MemoryStore::with_entry("k", "definitely not json");
        assert_eq!(
            StorageManager::load_or_default(&store, "k"),
            DashboardState::default()
        );
    }

    #[test]
    fn load_or_default_keeps_data_behind_negative_target() {
        let mut value: serde_json::Value =
            serde_json::from_str(&snapshot::encode(&busy_state()).unwrap()).unwrap();
        value["targetAmount"] = serde_json::json!(-5);
        let store = MemoryStore::with_entry("k", value.to_string());

        let s = StorageManager::load_or_default(&store, "k");
        assert_eq!(s.target_amount, 0);
        assert_eq!(s.trips_completed, 2);
        assert_eq!(s.trip_log.len(), 2);
        assert_eq!(s.history.len(), 1);
    }

    #[test]
    fn load_or_default_on_read_failure() {
        assert_eq!(
            StorageManager::load_or_default(&BrokenStore, "k"),
            DashboardState::default()
        );
        assert!(StorageManager::load(&BrokenStore, "k").is_err());
    }

    #[test]
    fn save_best_effort_swallows_failure() {
        let mut store = BrokenStore;
        assert!(!StorageManager::save_best_effort(&mut store, "k", &busy_state()));
        assert!(StorageManager::save(&mut store, "k", &busy_state()).is_err());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let s = busy_state();
        StorageManager::save(&mut store, DEFAULT_STORAGE_KEY, &s).unwrap();

        let reopened = FileStore::new(dir.path());
        assert_eq!(
            StorageManager::load(&reopened, DEFAULT_STORAGE_KEY).unwrap(),
            Some(s)
        );
    }

    #[test]
    fn clear_removes_snapshot() {
        let mut store = MemoryStore::new();
        StorageManager::save(&mut store, "k", &busy_state()).unwrap();
        StorageManager::clear(&mut store, "k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn works_through_trait_object() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        StorageManager::save(store.as_mut(), "k", &busy_state()).unwrap();
        assert!(StorageManager::load(store.as_ref(), "k").unwrap().is_some());
    }
}
