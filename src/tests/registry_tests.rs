//! Unit tests for the registry service.

use std::sync::Arc;

use super::fixtures::{
    Labelled, MockPassLoader, Shape, Square, rectangle, registry, square, teapot,
};
use crate::adapters::{ManifestLoader, Module};
use crate::domain::{Capability, Constructor, Entry};
use crate::ports::{DiscoveredComponent, DiscoveryError};
use crate::services::{CacheMode, Registry, RegistryOptions};
use rstest::rstest;

fn keys(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.key().as_str()).collect()
}

// ── Registration ───────────────────────────────────────────────────

#[rstest]
fn registering_the_same_tuple_twice_keeps_one_entry(registry: Arc<Registry>) {
    registry.register("square", square(), Some("lib1"), None);
    registry.register("square", square(), Some("lib1"), None);

    assert_eq!(registry.len(), 1);
}

#[rstest]
fn duplicate_detection_ignores_case(registry: Arc<Registry>) {
    registry.register("Square", square(), Some("Lib1"), Some("Beta"));
    registry.register("SQUARE", square(), Some("lib1"), Some("beta"));

    assert_eq!(registry.len(), 1);
}

#[rstest]
fn same_key_in_different_libraries_is_kept(registry: Arc<Registry>) {
    registry.register("square", square(), Some("lib1"), None);
    registry.register("square", square(), Some("lib2"), None);

    assert_eq!(registry.len(), 2);
}

#[rstest]
fn entries_preserve_insertion_order(registry: Arc<Registry>) {
    registry.register("teapot", teapot(), None, None);
    registry.register("square", square(), None, None);
    registry.register("rectangle", rectangle(), None, None);
    registry.register("square", square(), None, None);

    assert_eq!(
        keys(&registry.entries()),
        vec!["teapot", "square", "rectangle"]
    );
}

#[rstest]
fn re_registration_adds_newly_declared_capabilities(registry: Arc<Registry>) {
    let shapes = Capability::of::<dyn Shape>();
    registry.register("sq", Constructor::deserialize::<Square>().build(), None, None);
    let before = registry.typed_entries(&shapes);

    registry.register("sq", square(), None, None);

    assert!(before.is_empty());
    assert_eq!(registry.len(), 1);
    assert_eq!(keys(&registry.typed_entries(&shapes)), vec!["sq"]);
    assert!(registry.entries().iter().all(|entry| entry.satisfies(&shapes)));
}

#[rstest]
fn re_registration_with_fewer_capabilities_keeps_the_existing_ones(registry: Arc<Registry>) {
    let shapes = Capability::of::<dyn Shape>();
    registry.register("sq", square(), None, None);

    registry.register("sq", Constructor::deserialize::<Square>().build(), None, None);

    assert_eq!(registry.len(), 1);
    assert_eq!(keys(&registry.typed_entries(&shapes)), vec!["sq"]);
}

#[rstest]
fn new_registry_is_empty(registry: Arc<Registry>) {
    assert!(registry.is_empty());
    assert!(registry.entries().is_empty());
    assert!(registry.typed_entries(&Capability::universal()).is_empty());
}

// ── Typed views ────────────────────────────────────────────────────

fn populate(registry: &Registry) {
    registry.register("square", square(), None, None);
    registry.register("teapot", teapot(), None, None);
    registry.register("rectangle", rectangle(), None, None);
}

#[rstest]
fn typed_entries_keep_only_satisfying_constructors(registry: Arc<Registry>) {
    populate(&registry);

    let shapes = registry.typed_entries(&Capability::of::<dyn Shape>());
    let labelled = registry.typed_entries(&Capability::of::<dyn Labelled>());

    assert_eq!(keys(&shapes), vec!["square", "rectangle"]);
    assert_eq!(keys(&labelled), vec!["rectangle"]);
}

#[rstest]
fn universal_capability_returns_every_entry(registry: Arc<Registry>) {
    populate(&registry);

    let everything = registry.typed_entries(&Capability::universal());

    assert_eq!(everything.to_vec(), registry.entries());
}

#[rstest]
fn typed_view_is_cached_between_queries(registry: Arc<Registry>) {
    populate(&registry);
    let capability = Capability::of::<dyn Shape>();

    let first = registry.typed_entries(&capability);
    let second = registry.typed_entries(&capability);

    assert!(Arc::ptr_eq(&first, &second));
}

#[rstest]
fn late_registration_invalidates_affected_view(registry: Arc<Registry>) {
    registry.register("square", square(), None, None);
    let capability = Capability::of::<dyn Shape>();
    let before = registry.typed_entries(&capability);

    registry.register("rectangle", rectangle(), None, None);
    let after = registry.typed_entries(&capability);

    assert_eq!(keys(&before), vec!["square"]);
    assert_eq!(keys(&after), vec!["square", "rectangle"]);
}

#[rstest]
fn unrelated_registration_keeps_cached_view(registry: Arc<Registry>) {
    registry.register("square", square(), None, None);
    let capability = Capability::of::<dyn Shape>();
    let before = registry.typed_entries(&capability);

    registry.register("teapot", teapot(), None, None);
    let after = registry.typed_entries(&capability);

    assert!(Arc::ptr_eq(&before, &after));
}

#[rstest]
fn stable_mode_never_recomputes_a_view() {
    let registry =
        Registry::with_options(RegistryOptions::default().with_cache_mode(CacheMode::Stable));
    registry.register("square", square(), None, None);
    let capability = Capability::of::<dyn Shape>();
    let cached = registry.typed_entries(&capability);
    assert_eq!(keys(&cached), vec!["square"]);

    registry.register("rectangle", rectangle(), None, None);

    assert_eq!(keys(&registry.typed_entries(&capability)), vec!["square"]);
    assert_eq!(registry.len(), 2);
}

#[rstest]
#[case(r"{}", CacheMode::Invalidate)]
#[case(r#"{"cache_mode":"invalidate"}"#, CacheMode::Invalidate)]
#[case(r#"{"cache_mode":"stable"}"#, CacheMode::Stable)]
fn options_deserialize_with_defaults(#[case] raw: &str, #[case] expected: CacheMode) {
    let options: RegistryOptions = serde_json::from_str(raw).expect("options should parse");
    assert_eq!(options.cache_mode, expected);
}

// ── Discovery passes ───────────────────────────────────────────────

#[rstest]
fn fill_registers_discovered_components(registry: Arc<Registry>) {
    let mut loader = MockPassLoader::new();
    loader.expect_discover().times(1).returning(|| {
        Ok(vec![
            DiscoveredComponent::new("shapes::flat", "Square", square())?,
            DiscoveredComponent::new("shapes::flat", "Rectangle", rectangle())?
                .with_label("wide"),
        ])
    });

    let count = registry.fill(&loader).expect("discovery should succeed");

    assert_eq!(count, 2);
    let entries = registry.entries();
    assert_eq!(keys(&entries), vec!["square", "rectangle"]);
    assert!(entries.iter().all(|entry| entry.library().as_str() == "shapes"));
    assert_eq!(
        entries.last().expect("two entries").label().as_str(),
        "wide"
    );
}

#[rstest]
fn failed_discovery_registers_nothing(registry: Arc<Registry>) {
    let mut loader = MockPassLoader::new();
    loader.expect_discover().times(1).returning(|| {
        Err(DiscoveryError::failed(
            "shapes::broken",
            std::io::Error::other("truncated module"),
        ))
    });

    let result = registry.fill(&loader);

    assert!(matches!(result, Err(DiscoveryError::Failed { ref module, .. }) if module == "shapes::broken"));
    assert!(registry.is_empty());
}

#[rstest]
fn fill_invalidates_views_like_register(registry: Arc<Registry>) {
    registry.register("square", square(), None, None);
    let capability = Capability::of::<dyn Shape>();
    let cached = registry.typed_entries(&capability);
    assert_eq!(keys(&cached), vec!["square"]);

    let loader = ManifestLoader::new(Module::new("shapes").component(rectangle()));
    registry.fill(&loader).expect("discovery should succeed");

    assert_eq!(
        keys(&registry.typed_entries(&capability)),
        vec!["square", "rectangle"]
    );
}

#[rstest]
fn repeated_discovery_pass_is_idempotent(registry: Arc<Registry>) {
    let loader = ManifestLoader::new(
        Module::new("shapes")
            .component(square())
            .component(rectangle()),
    );

    registry.fill(&loader).expect("first pass should succeed");
    registry.fill(&loader).expect("second pass should succeed");

    assert_eq!(registry.len(), 2);
}

// ── Concurrency ────────────────────────────────────────────────────

#[rstest]
fn concurrent_registration_and_lookup_stay_consistent(registry: Arc<Registry>) {
    let capability = Capability::of::<dyn Shape>();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let shared = Arc::clone(&registry);
            scope.spawn(move || {
                for index in 0..25 {
                    shared.register(&format!("square_{worker}_{index}"), square(), None, None);
                    let view = shared.typed_entries(&capability);
                    assert!(view.iter().all(|entry| entry.satisfies(&capability)));
                }
            });
        }
    });

    assert_eq!(registry.len(), 100);
    assert_eq!(registry.typed_entries(&capability).len(), 100);
}
