//! Integration tests for tracing and event monitoring.
//!
//! The trace callback sees every successful `remember` and `make`. Failed calls
//! are reported through their `RegistryError` only.

use named_singleton::{scoped, RegistryEvent};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct Widget;

fn collect(registry: &named_singleton::Registry) -> Arc<Mutex<Vec<String>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    registry.set_trace_callback(move |event| {
        events_clone.lock().unwrap().push(format!("{}", event));
    });

    events
}

#[test_log::test]
fn test_basic_tracing() {
    let registry = scoped();
    let events = collect(&registry);

    registry.remember(|| Widget, "widget", false).unwrap();
    let _ = registry.make("widget");

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0], "remember { name: widget, replaced: false }");
    assert_eq!(captured[1], "make { name: widget, found: true, fallback: false }");
}

#[test_log::test]
fn test_trace_forced_replace() {
    let registry = scoped();
    let events = collect(&registry);

    registry.remember(|| Widget, "widget", false).unwrap();
    registry.remember(|| Widget, "widget", true).unwrap();

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[1], "remember { name: widget, replaced: true }");
}

#[test]
fn test_trace_make_found_and_not_found() {
    let registry = scoped();
    let events = collect(&registry);

    registry.remember(|| Widget, "widget", false).unwrap();
    let _ = registry.make("");
    let _ = registry.make("gadget");

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 3);
    assert!(captured[1].contains("found: true, fallback: true"));
    assert!(captured[2].contains("found: false, fallback: false"));
}

#[test]
fn test_failures_emit_nothing() {
    let registry = scoped();
    let events = collect(&registry);

    let _ = registry.make("");
    let _ = registry.remember(|| 5i32, "scalar", false);

    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_events_are_structured() {
    let registry = scoped();
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    registry.set_trace_callback(move |event| {
        events_clone.lock().unwrap().push(event.clone());
    });

    registry.remember(|| Widget, "", false).unwrap();

    let captured = events.lock().unwrap();
    assert_eq!(
        captured[0],
        RegistryEvent::Remember {
            name: std::any::type_name::<Widget>().to_string(),
            replaced: false,
        }
    );
}

#[test]
fn test_clear_trace_callback_stops_events() {
    let registry = scoped();
    let events = collect(&registry);

    registry.remember(|| Widget, "one", false).unwrap();
    assert_eq!(events.lock().unwrap().len(), 1);

    registry.clear_trace_callback();

    registry.remember(|| Widget, "two", false).unwrap();
    let _ = registry.make("two");

    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn test_callback_may_reenter_registry() {
    let registry = Arc::new(scoped());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let registry_clone = Arc::downgrade(&registry);
    let seen_clone = seen.clone();
    registry.set_trace_callback(move |event| {
        if let (RegistryEvent::Remember { name, .. }, Some(registry)) =
            (event, registry_clone.upgrade())
        {
            seen_clone.lock().unwrap().push(registry.contains(name));
        }
    });

    registry.remember(|| Widget, "widget", false).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![true]);
}

#[test]
fn test_tracing_is_per_registry() {
    let traced = scoped();
    let untraced = scoped();
    let events = collect(&traced);

    traced.remember(|| Widget, "a", false).unwrap();
    untraced.remember(|| Widget, "b", false).unwrap();

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert!(captured[0].contains("name: a"));
}
