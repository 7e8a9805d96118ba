//! Category-to-subcategory resolution flows.

mod support;

use std::sync::Arc;
use std::time::Duration;

use dukkan_controller::SubcategoryResolver;
use dukkan_core::filter::FilterSet;

use support::FixtureCatalog;

fn option_slugs(resolver: &SubcategoryResolver) -> Vec<String> {
    resolver.options().into_iter().map(|o| o.slug).collect()
}

#[tokio::test]
async fn test_parent_change_clears_invalid_child_selection() {
    let resolver = SubcategoryResolver::new(Arc::new(FixtureCatalog::new()));

    resolver.resolve(Some("clothes")).await;
    assert!(resolver.select("shirts"));
    assert_eq!(resolver.selected().as_deref(), Some("shirts"));

    // "shoes" offers no "shirts": the selection must be gone the moment
    // the new options are visible.
    resolver.resolve(Some("shoes")).await;
    assert_eq!(option_slugs(&resolver), vec!["sneakers", "boots"]);
    assert!(resolver.selected().is_none());
}

#[tokio::test]
async fn test_valid_child_selection_survives_parent_refresh() {
    let resolver = SubcategoryResolver::new(Arc::new(FixtureCatalog::new()));

    resolver.resolve(Some("clothes")).await;
    assert!(resolver.select("jeans"));

    resolver.resolve(Some("clothes")).await;
    assert_eq!(resolver.selected().as_deref(), Some("jeans"));
}

#[tokio::test]
async fn test_no_parent_clears_without_network_call() {
    let catalog = Arc::new(FixtureCatalog::new());
    let resolver = SubcategoryResolver::new(catalog.clone());

    resolver.resolve(Some("clothes")).await;
    assert!(resolver.select("shirts"));
    let calls_before = *catalog.subcategory_calls.lock().unwrap();

    resolver.resolve(None).await;

    assert!(resolver.options().is_empty());
    assert!(resolver.selected().is_none());
    assert_eq!(*catalog.subcategory_calls.lock().unwrap(), calls_before);
}

#[tokio::test]
async fn test_resolution_failure_yields_empty_options() {
    let resolver = SubcategoryResolver::new(Arc::new(FixtureCatalog::new()));

    resolver.resolve(Some("no-such-category")).await;

    assert!(resolver.options().is_empty());
    assert!(!resolver.select("shirts"), "nothing is selectable");
}

#[tokio::test(start_paused = true)]
async fn test_stale_resolution_does_not_overwrite_newer_one() {
    let catalog = Arc::new(
        FixtureCatalog::new().with_delay("clothes", Duration::from_millis(100)),
    );
    let resolver = SubcategoryResolver::new(catalog);

    let slow = resolver.clone();
    let r1 = tokio::spawn(async move { slow.resolve(Some("clothes")).await });
    tokio::task::yield_now().await;
    let fast = resolver.clone();
    let r2 = tokio::spawn(async move { fast.resolve(Some("shoes")).await });

    r1.await.unwrap();
    r2.await.unwrap();

    // The clothes resolution finished last but was superseded.
    assert_eq!(option_slugs(&resolver), vec!["sneakers", "boots"]);
}

#[tokio::test]
async fn test_apply_to_filter_set() {
    let resolver = SubcategoryResolver::new(Arc::new(FixtureCatalog::new()));

    resolver.resolve(Some("clothes")).await;
    resolver.select("jeans");
    let filters = resolver.apply_to(FilterSet::new().with_category("clothes"));
    assert_eq!(filters.subcategory.as_deref(), Some("jeans"));

    resolver.resolve(Some("shoes")).await;
    let filters = resolver.apply_to(filters);
    assert!(filters.subcategory.is_none());
}
