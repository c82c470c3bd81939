use pretty_assertions::assert_eq;
use settings_explorer::{
    Explorer, ExplorerConfig, ExplorerError, MemoryStore, StoredSetting,
};
use settings_model::{CachePolicy, Kind, SharedStore, Value};
use settings_test_utils::{sample_catalog, ScriptedStore};
use std::sync::Arc;

fn scripted_explorer(config: ExplorerConfig) -> (Arc<ScriptedStore>, Explorer) {
    let store = Arc::new(
        ScriptedStore::new()
            .with_value("SystemSettings_Display_Brightness", 40)
            .with_value("SystemSettings_Display_NightLight", true)
            .with_value("SystemSettings_Display_Orientation", "Landscape")
            .with_possible_values("SystemSettings_Display_Orientation", &["Landscape", "Portrait"]),
    );
    let shared: SharedStore = store.clone();
    let explorer = Explorer::load(&sample_catalog(), shared, config).unwrap();
    (store, explorer)
}

#[test]
fn descriptors_materialize_on_first_selection_only() {
    let (_, explorer) = scripted_explorer(ExplorerConfig::default());
    let key = "SystemSettings_Display_NightLight";

    let node = explorer.tree().find(key).unwrap();
    assert!(!node.is_attached());
    assert!(explorer.tree().outline().iter().all(|entry| !entry.attached));

    let first = explorer.select(key).unwrap().unwrap();
    let second = explorer.select(key).unwrap().unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(node.is_attached());
    assert_eq!(first.kind(), Kind::Boolean);
}

#[test]
fn sample_catalog_tree_shape() {
    let (_, explorer) = scripted_explorer(ExplorerConfig::default());
    let tree = explorer.tree();

    let roots: Vec<_> = tree.roots().map(|node| node.key()).collect();
    assert_eq!(roots, vec!["SystemSettings", "Standalone"]);

    let system = tree.find("SystemSettings").unwrap();
    let labels: Vec<_> = system.children().map(|node| node.label()).collect();
    assert_eq!(labels, vec!["Display", "Notifications", "Power_Sleep_Timeout_AC"]);

    let power = tree.find("SystemSettings_Power_Sleep_Timeout_AC").unwrap();
    assert!(power.is_leaf());
    assert_eq!(explorer.kind_of(power.key()), Some(Kind::Range));
}

#[test]
fn unparseable_kinds_are_skipped() {
    let (_, explorer) = scripted_explorer(ExplorerConfig::default());
    assert!(explorer.kind_of("SystemSettings_Broken").is_none());
    assert!(matches!(
        explorer.select("SystemSettings_Broken"),
        Err(ExplorerError::NodeNotFound(_))
    ));
    assert_eq!(
        explorer.kind_of("SystemSettings_Notifications_Banner"),
        Some(Kind::Generic)
    );
}

#[test]
fn skip_generic_drops_generic_entries() {
    let (_, explorer) = scripted_explorer(ExplorerConfig::new().with_skip_generic(true));
    assert!(explorer.tree().find("SystemSettings_Notifications_Banner").is_none());
    // Notifications now has a single child and folds into it
    assert!(explorer.tree().find("SystemSettings_Notifications_Reset").is_some());
    assert!(explorer.tree().find("SystemSettings_Notifications").is_none());
}

#[test]
fn property_sheet_for_list_setting() {
    let (_, explorer) = scripted_explorer(ExplorerConfig::default());
    let sheet = explorer
        .properties("SystemSettings_Display_Orientation")
        .unwrap();

    assert_eq!(sheet.kind, Kind::List);
    assert_eq!(
        sheet.get("description").unwrap().text(),
        "Description of SystemSettings_Display_Orientation"
    );
    assert_eq!(sheet.get("value").unwrap().text(), "Landscape");
    assert_eq!(
        sheet.possible_values,
        Some(vec!["Landscape".to_string(), "Portrait".to_string()])
    );
    assert!(sheet.verbs.is_empty());
    assert_eq!(sheet.failures().count(), 0);
}

#[test]
fn property_sheet_lists_action_verbs() {
    let (store, explorer) = scripted_explorer(ExplorerConfig::default());
    let sheet = explorer
        .properties("SystemSettings_Notifications_Reset")
        .unwrap();
    assert_eq!(sheet.verbs, vec!["Invoke"]);
    assert!(sheet.get("value").is_none());

    explorer
        .invoke("SystemSettings_Notifications_Reset", "Invoke")
        .unwrap();
    assert_eq!(store.invocations(), 1);
}

#[test]
fn set_value_round_trips_through_cache() {
    let (store, explorer) = scripted_explorer(ExplorerConfig::default());
    let key = "SystemSettings_Display_Brightness";
    let descriptor = explorer.descriptor(key).unwrap();

    assert_eq!(descriptor.value(), Some(Ok(Value::Int(40))));
    explorer.set_value(key, "85").unwrap();
    assert_eq!(descriptor.value(), Some(Ok(Value::Int(85))));
    assert_eq!(store.reads(), 2);
    assert_eq!(store.writes(), 1);
}

#[test]
fn always_refetch_reads_every_time() {
    let config = ExplorerConfig::new().with_cache_policy(CachePolicy::AlwaysRefetch);
    let (store, explorer) = scripted_explorer(config);
    let descriptor = explorer
        .descriptor("SystemSettings_Display_NightLight")
        .unwrap();

    let _ = descriptor.value();
    let _ = descriptor.value();
    assert_eq!(store.reads(), 2);
}

#[test]
fn memory_store_failures_render_in_sheet() {
    let store = Arc::new(MemoryStore::new());
    store.insert(
        "Network_Proxy",
        StoredSetting::new("Boolean")
            .with_value(true)
            .with_fault("class not registered"),
    );
    store.insert("Network_Metered", StoredSetting::new("Boolean").with_value(false));
    let shared: SharedStore = store.clone();
    let explorer = Explorer::load(store.as_ref(), shared, ExplorerConfig::default()).unwrap();

    let sheet = explorer.properties("Network_Proxy").unwrap();
    assert_eq!(sheet.get("description").unwrap().text(), "class not registered");
    assert_eq!(sheet.get("value").unwrap().text(), "class not registered");
    assert_eq!(sheet.failures().count(), 5);

    let healthy = explorer.properties("Network_Metered").unwrap();
    assert_eq!(healthy.get("value").unwrap().text(), "false");
    assert_eq!(
        healthy.get("description").unwrap().text(),
        "no description available"
    );
}

#[test]
fn set_value_rejects_bad_text_and_locked_settings() {
    let store = Arc::new(MemoryStore::new());
    let mut locked = StoredSetting::new("List")
        .with_value("Sleep")
        .with_possible_values(["Sleep", "Hibernate"]);
    locked.set_by_group_policy = true;
    store.insert("Power_Lid", locked);
    store.insert("Power_Saver", StoredSetting::new("Boolean").with_value(false));
    let shared: SharedStore = store.clone();
    let explorer = Explorer::load(store.as_ref(), shared, ExplorerConfig::default()).unwrap();

    assert!(matches!(
        explorer.set_value("Power_Lid", "Hibernate"),
        Err(ExplorerError::Model(_))
    ));
    assert!(matches!(
        explorer.set_value("Power_Saver", "maybe"),
        Err(ExplorerError::Model(_))
    ));
    explorer.set_value("Power_Saver", "on").unwrap();
    assert_eq!(store.get("Power_Saver").unwrap().value, Some(Value::Bool(true)));
    assert!(matches!(
        explorer.set_value("Power", "on"),
        Err(ExplorerError::NotASetting(_))
    ));
}

#[test]
fn filter_matches_keys_case_insensitively() {
    let (_, explorer) = scripted_explorer(ExplorerConfig::default());
    assert_eq!(
        explorer.filter("display_"),
        vec![
            "SystemSettings_Display_Brightness",
            "SystemSettings_Display_NightLight",
            "SystemSettings_Display_Orientation",
        ]
    );
}

#[test]
fn malformed_identifiers_are_reported_by_the_tree() {
    let store = Arc::new(MemoryStore::new());
    store.insert("A__B", StoredSetting::new("Boolean").with_value(true));
    store.insert("C_", StoredSetting::new("Boolean").with_value(false));
    store.insert("Ok_One", StoredSetting::new("Boolean").with_value(true));
    let shared: SharedStore = store.clone();
    let explorer = Explorer::load(store.as_ref(), shared, ExplorerConfig::default()).unwrap();

    let skipped: Vec<_> = explorer
        .tree()
        .skipped()
        .iter()
        .map(|err| err.identifier().to_string())
        .collect();
    assert_eq!(skipped, vec!["A__B", "C_"]);
    assert_eq!(explorer.catalog().len(), 1);
    assert_eq!(explorer.kind_of("Ok_One"), Some(Kind::Boolean));
    assert!(explorer.kind_of("A__B").is_none());
}
