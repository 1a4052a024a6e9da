//! Cache behaviour over files in a temporary directory

use quarry::{
    AuthorizedMetadata, FileMetadataLoader, MetadataLoader, QueryConfig, QueryEngine,
    TypeMetadata, TypeMetadataCache,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

fn auths(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Entries of (comma-separated auths, field, datatype, type name)
fn table(entries: &[(&str, &str, &str, &str)]) -> AuthorizedMetadata {
    let mut all = AuthorizedMetadata::new();
    for (auth, field, datatype, type_name) in entries {
        let names: Vec<&str> = auth.split(',').collect();
        all.entry(auths(&names))
            .or_insert_with(TypeMetadata::new)
            .put(*field, *datatype, *type_name);
    }
    all
}

#[test]
fn metadata_is_partitioned_by_authorizations() {
    let dir = tempdir().unwrap();
    let loader = FileMetadataLoader::new(dir.path());
    loader
        .store(
            "QuarryMetadata",
            &table(&[
                ("PUBLIC", "NAME", "person", "LowerCaseType"),
                ("PUBLIC,PRIVATE", "NAME", "person", "LowerCaseType"),
                ("PUBLIC,PRIVATE", "SSN", "person", "NumberType"),
            ]),
        )
        .unwrap();

    let cache = TypeMetadataCache::new(Arc::new(loader));
    let public = cache.get("QuarryMetadata", &auths(&["PUBLIC"]));
    assert_eq!(public.fields().collect::<Vec<_>>(), vec!["NAME"]);

    let both = cache.get("QuarryMetadata", &auths(&["PRIVATE", "PUBLIC"]));
    assert_eq!(both.fields().collect::<Vec<_>>(), vec!["NAME", "SSN"]);
}

#[test]
fn cache_is_shared_across_threads() {
    let dir = tempdir().unwrap();
    let loader = FileMetadataLoader::new(dir.path());
    loader
        .store("meta", &table(&[("A", "AGE", "person", "NumberType")]))
        .unwrap();
    let cache = Arc::new(TypeMetadataCache::new(Arc::new(loader)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.get("meta", &auths(&["A"])).types_for("AGE").len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
    assert_eq!(cache.cached_tables(), vec!["meta".to_string()]);
}

#[test]
fn engine_builds_cache_from_config() {
    let dir = tempdir().unwrap();
    FileMetadataLoader::new(dir.path())
        .store("meta", &table(&[("A", "AGE", "person", "NumberType")]))
        .unwrap();

    let config = QueryConfig {
        metadata_dir: Some(dir.path().to_path_buf()),
        metadata_refresh_ms: 10,
        ..QueryConfig::default()
    };
    let engine = QueryEngine::new(config).unwrap();
    let (cache, refresher) = engine.metadata().unwrap().unwrap();
    let handle = refresher.start();

    assert_eq!(cache.get("meta", &auths(&["A"])).datatypes_for("AGE"), vec!["person"]);

    refresher.shutdown();
    handle.join().unwrap();
}

#[test]
fn config_file_round_trip_drives_engine() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(quarry::CONFIG_FILE_NAME);
    QueryConfig::write_default_if_missing(&path).unwrap();

    let engine = QueryEngine::from_file(&path).unwrap();
    assert_eq!(engine.config().batch_size, 1000);
    assert!(engine.metadata().unwrap().is_none());
}

#[test]
fn loader_version_changes_on_store() {
    let dir = tempdir().unwrap();
    let loader = FileMetadataLoader::new(dir.path());
    assert_eq!(loader.version("meta").unwrap(), None);
    loader
        .store("meta", &table(&[("A", "AGE", "person", "NumberType")]))
        .unwrap();
    let first = loader.version("meta").unwrap();
    assert!(first.is_some());

    thread::sleep(Duration::from_millis(1100));
    loader
        .store("meta", &table(&[("A", "NAME", "person", "LowerCaseType")]))
        .unwrap();
    assert_ne!(loader.version("meta").unwrap(), first);
}
