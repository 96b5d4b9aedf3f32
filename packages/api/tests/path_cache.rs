//! Parse-cache behavior: identity-stable hits, bounded LRU eviction,
//! injectable instances.

use docpath::{parse_path, FieldPath, PathCache};

#[test]
fn repeated_parse_returns_shared_instance() {
    let fp1 = parse_path("a.b.c[4]").expect("valid path");
    let fp2 = parse_path("a.b.c[4]").expect("valid path");
    assert!(fp1.ptr_eq(&fp2));
}

#[test]
fn differently_spelled_paths_are_equal_but_not_shared() {
    let fp1 = parse_path("a.b.\"c\"[4]").expect("valid path");
    let fp2 = parse_path("a.\"b\".c[4]").expect("valid path");
    assert_eq!(fp1, fp2);
    assert!(!fp1.ptr_eq(&fp2));
}

#[test]
fn injected_cache_is_independent_of_the_global_one() {
    let cache = PathCache::with_capacity(8);
    let from_custom = FieldPath::parse_with_cache("x.y.z", &cache).expect("valid path");
    let from_global = parse_path("x.y.z").expect("valid path");
    assert_eq!(from_custom, from_global);
    // distinct caches intern independently
    assert!(!from_custom.ptr_eq(&from_global));
    // but hits within one cache are identity-stable
    let again = FieldPath::parse_with_cache("x.y.z", &cache).expect("valid path");
    assert!(from_custom.ptr_eq(&again));
}

#[test]
fn eviction_is_bounded_and_does_not_invalidate_paths() {
    let cache = PathCache::with_capacity(2);
    let a1 = FieldPath::parse_with_cache("a.b", &cache).expect("valid path");
    let _ = FieldPath::parse_with_cache("c.d", &cache).expect("valid path");
    let _ = FieldPath::parse_with_cache("e.f", &cache).expect("valid path");
    assert_eq!(cache.len(), 2);

    // "a.b" was least recently used and has been evicted: a fresh parse is
    // equal but no longer the same shared instance
    let a2 = FieldPath::parse_with_cache("a.b", &cache).expect("valid path");
    assert_eq!(a1, a2);
    assert!(!a1.ptr_eq(&a2));

    // the evicted instance itself remains fully usable
    assert_eq!(a1.as_path_string(), "a.b");
    assert_eq!(a1.after_ancestor(&a2), Some(FieldPath::empty()));
}

#[test]
fn lookups_refresh_recency() {
    let cache = PathCache::with_capacity(2);
    let a = FieldPath::parse_with_cache("a", &cache).expect("valid path");
    let _ = FieldPath::parse_with_cache("b", &cache).expect("valid path");
    // touch "a" so "b" becomes the eviction candidate
    let _ = FieldPath::parse_with_cache("a", &cache).expect("valid path");
    let _ = FieldPath::parse_with_cache("c", &cache).expect("valid path");

    let a_again = FieldPath::parse_with_cache("a", &cache).expect("valid path");
    assert!(a.ptr_eq(&a_again), "refreshed entry must survive eviction");
}

#[test]
fn quoted_empty_spellings_share_the_empty_instance() {
    let e1 = parse_path("").expect("valid path");
    let e2 = parse_path("``").expect("valid path");
    let e3 = parse_path("\"\"").expect("valid path");
    assert!(e1.ptr_eq(&FieldPath::empty()));
    assert!(e2.ptr_eq(&e1));
    assert!(e3.ptr_eq(&e1));
}
