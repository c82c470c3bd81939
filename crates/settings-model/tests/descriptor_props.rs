use proptest::prelude::*;
use settings_model::{
    render, verbs_for, CachePolicy, Descriptor, DescriptorFactory, Kind, SharedStore, Value,
};
use settings_test_utils::{Accessor, ScriptedStore};
use settings_tree::Identifier;
use std::sync::Arc;

fn id(raw: &str) -> Identifier {
    Identifier::new(raw).unwrap()
}

fn create(store: &Arc<ScriptedStore>, policy: CachePolicy, raw: &str, kind: Kind) -> Descriptor {
    let shared: SharedStore = store.clone();
    DescriptorFactory::with_policy(shared, policy).create(id(raw), kind)
}

fn policy() -> impl Strategy<Value = CachePolicy> {
    prop_oneof![Just(CachePolicy::FetchOnce), Just(CachePolicy::AlwaysRefetch)]
}

proptest! {
    #[test]
    fn prop_cache_policy_controls_store_reads(policy in policy(), gets in 1..10usize) {
        let store = Arc::new(ScriptedStore::new().with_value("A", 5));
        let descriptor = create(&store, policy, "A", Kind::Range);
        let setting = descriptor.as_range().unwrap();

        for _ in 0..gets {
            prop_assert_eq!(setting.get(), Ok(5));
        }

        let expected = match policy {
            CachePolicy::FetchOnce => 1,
            CachePolicy::AlwaysRefetch => gets,
        };
        prop_assert_eq!(store.reads(), expected);
    }

    #[test]
    fn prop_set_then_get_round_trips_range(policy in policy(), initial: i32, written: i32) {
        let store = Arc::new(ScriptedStore::new().with_value("A", initial));
        let descriptor = create(&store, policy, "A", Kind::Range);
        let setting = descriptor.as_range().unwrap();

        prop_assert_eq!(setting.get(), Ok(initial));
        setting.set(written).unwrap();
        prop_assert_eq!(setting.get(), Ok(written));
    }

    #[test]
    fn prop_set_then_get_round_trips_list(initial in "[a-z]{0,8}", written in "[A-Za-z ]{0,12}") {
        let store = Arc::new(ScriptedStore::new().with_value("A", initial.as_str()));
        let descriptor = create(&store, CachePolicy::FetchOnce, "A", Kind::List);
        let setting = descriptor.as_list().unwrap();

        prop_assert_eq!(setting.get(), Ok(initial));
        setting.set(written.clone()).unwrap();
        prop_assert_eq!(setting.get(), Ok(written));
    }
}

#[test]
fn set_then_get_round_trips_boolean() {
    let store = Arc::new(ScriptedStore::new().with_value("A", false));
    let descriptor = create(&store, CachePolicy::FetchOnce, "A", Kind::Boolean);

    descriptor.set_value(Value::Bool(true)).unwrap();
    assert_eq!(descriptor.value(), Some(Ok(Value::Bool(true))));
    assert_eq!(store.writes(), 1);
    assert_eq!(store.reads(), 1);
}

#[test]
fn description_failure_renders_message() {
    let store = Arc::new(ScriptedStore::failing(Accessor::Description, "class not registered"));
    let descriptor = create(&store, CachePolicy::FetchOnce, "A", Kind::Generic);

    let description = descriptor.info().description();
    assert_eq!(description.as_ref().unwrap_err().message(), "class not registered");
    assert_eq!(render(&description), "class not registered");
}

#[test]
fn panicking_accessor_is_contained() {
    let store = Arc::new(ScriptedStore::panicking(Accessor::Value, "corrupted state"));
    let descriptor = create(&store, CachePolicy::FetchOnce, "A", Kind::Boolean);

    let value = descriptor.value().unwrap();
    assert_eq!(value.unwrap_err().message(), "corrupted state");
}

#[test]
fn possible_values_degrade_to_failure_entry() {
    let store = Arc::new(ScriptedStore::failing(Accessor::PossibleValues, "enumeration failed"));
    let descriptor = create(&store, CachePolicy::FetchOnce, "A", Kind::List);
    assert_eq!(descriptor.possible_values(), Some(vec!["enumeration failed".to_string()]));
}

#[test]
fn action_verb_reaches_store() {
    let store = Arc::new(ScriptedStore::new());
    let descriptor = create(&store, CachePolicy::FetchOnce, "Reset", Kind::Action);

    verbs_for(&descriptor).invoke("Invoke").unwrap();
    verbs_for(&descriptor).invoke("Invoke").unwrap();
    assert_eq!(store.invocations(), 2);
}

#[test]
fn failed_invocation_surfaces() {
    let store = Arc::new(ScriptedStore::failing(Accessor::Invoke, "device busy"));
    let descriptor = create(&store, CachePolicy::FetchOnce, "Reset", Kind::Action);
    assert!(descriptor.verbs().invoke("Invoke").is_err());
}
