use super::*;

fn catalog(ids: &[&str]) -> Arc<Vec<CandidateEntity>> {
    Arc::new(ids.iter().map(|id| CandidateEntity::new(*id, "x")).collect())
}

#[test]
fn test_get_returns_inserted_catalog() {
    let mut cache = CatalogCache::default();
    cache.insert(CatalogScope::Global, catalog(&["1", "2"]));

    let hit = cache.get(&CatalogScope::Global).expect("cached");
    assert_eq!(hit.len(), 2);
    assert!(cache.get(&CatalogScope::Account("9".into())).is_none());
}

#[test]
fn test_least_recently_used_scope_is_evicted() {
    let mut cache = CatalogCache::new(2);
    cache.insert(CatalogScope::Account("a".into()), catalog(&["1"]));
    cache.insert(CatalogScope::Account("b".into()), catalog(&["2"]));
    // Touch "a" so "b" becomes the eviction candidate.
    cache.get(&CatalogScope::Account("a".into()));
    cache.insert(CatalogScope::Global, catalog(&["3"]));

    assert_eq!(cache.len(), 2);
    assert!(cache.get(&CatalogScope::Account("b".into())).is_none());
    assert!(cache.get(&CatalogScope::Account("a".into())).is_some());
}

#[test]
fn test_zero_capacity_still_holds_one_entry() {
    let mut cache = CatalogCache::new(0);
    cache.insert(CatalogScope::Global, catalog(&["1"]));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_invalidate_and_clear() {
    let mut cache = CatalogCache::default();
    cache.insert(CatalogScope::Global, catalog(&["1"]));
    cache.insert(CatalogScope::Account("a".into()), catalog(&["2"]));

    cache.invalidate(&CatalogScope::Global);
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_capacity_comes_from_settings() {
    let settings = ResolverSettings {
        catalog_cache_capacity: 1,
        ..ResolverSettings::default()
    };
    let mut cache = CatalogCache::from_settings(&settings);
    assert_eq!(cache.cap(), 1);

    cache.insert(CatalogScope::Account("a".into()), catalog(&["1"]));
    cache.insert(CatalogScope::Global, catalog(&["2"]));
    assert_eq!(cache.len(), 1);
    assert!(cache.get(&CatalogScope::Global).is_some());

    assert_eq!(CatalogCache::default().cap(), ResolverSettings::default().catalog_cache_capacity);
}
