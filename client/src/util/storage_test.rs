use super::*;

#[test]
fn memory_storage_set_then_get() {
    let storage = MemoryStorage::new();
    storage.set("k", "v").unwrap();
    assert_eq!(storage.get("k").as_deref(), Some("v"));
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let storage = MemoryStorage::new();
    storage.remove("missing");
    assert!(storage.is_empty());
}

#[test]
fn memory_storage_clones_share_entries() {
    let storage = MemoryStorage::new();
    let reloaded = storage.clone();
    storage.set("k", "v").unwrap();
    assert_eq!(reloaded.get("k").as_deref(), Some("v"));
    reloaded.remove("k");
    assert!(storage.get("k").is_none());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_unavailable_without_hydrate() {
    let storage = BrowserStorage;
    assert!(storage.get("k").is_none());
    assert_eq!(storage.set("k", "v"), Err(StorageError::Unavailable));
    storage.remove("k");
}
