use super::*;

fn shadow() -> CachedShadow {
    CachedShadow {
        matte: Arc::new(Image::transparent(2, 2).unwrap()),
        radius: BlurRadius::new(1.0),
    }
}

#[test]
fn starts_empty() {
    let cache = ShadowCache::new();
    assert_eq!(cache.state(), ShadowState::Empty);
    assert!(cache.get().is_none());
    assert_eq!(cache.generation(), 0);
}

#[test]
fn store_makes_ready_and_bump_empties() {
    let mut cache = ShadowCache::new();
    let stored = Arc::clone(&cache.store(shadow()).matte);
    assert_eq!(cache.state(), ShadowState::Ready);
    assert!(Arc::ptr_eq(&cache.get().unwrap().matte, &stored));

    cache.bump();
    assert_eq!(cache.state(), ShadowState::Empty);
    assert!(cache.get().is_none());
    assert_eq!(cache.generation(), 1);
}

#[test]
fn bump_on_empty_cache_still_advances_generation() {
    let mut cache = ShadowCache::new();
    cache.bump();
    cache.bump();
    assert_eq!(cache.generation(), 2);
    cache.store(shadow());
    assert_eq!(cache.state(), ShadowState::Ready);
}
