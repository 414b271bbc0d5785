//! Environment Store Integration Tests
//!
//! - In-memory round trips and concurrent access
//! - Process environment access (serialized through a shared lock)
//! - Expansion through the `Env` trait object

mod common;

use common::{lock_os_env, sorted_environ};
use envfill::{Env, MapEnv, OsEnv};
use std::sync::{Arc, Barrier};
use std::thread;

// =============================================================================
// In-Memory Store
// =============================================================================

#[test]
fn test_map_env_round_trip() {
    let env = MapEnv::new();

    env.set("k", "v").unwrap();
    assert_eq!(env.get("k"), "v");

    env.unset("k").unwrap();
    assert_eq!(env.get("k"), "");
    assert_eq!(env.lookup("k"), None);

    env.set("a", "1").unwrap();
    env.set("b", "2").unwrap();
    assert_eq!(sorted_environ(&env), vec!["a=1", "b=2"]);

    env.clear();
    assert!(env.environ().is_empty());
}

#[test]
fn test_map_env_empty_value_is_present() {
    let env = MapEnv::from_map([("EMPTY", "")]);
    assert_eq!(env.lookup("EMPTY"), Some(String::new()));
    assert_eq!(env.environ(), vec!["EMPTY="]);
}

#[test]
fn test_concurrent_readers() {
    let env = Arc::new(MapEnv::from_map([("SHARED_A", "1"), ("SHARED_B", "2")]));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let env = Arc::clone(&env);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..1000 {
                    assert_eq!(env.get("SHARED_A"), "1");
                    assert_eq!(env.environ().len(), 2);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_readers_and_writers() {
    let env = Arc::new(MapEnv::new());
    let barrier = Arc::new(Barrier::new(10));
    let mut handles = vec![];

    for i in 0..10 {
        let env = Arc::clone(&env);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            if i % 2 == 0 {
                for _ in 0..100 {
                    // Every listed entry is complete
                    for entry in env.environ() {
                        assert!(entry.starts_with("KEY_") && entry.contains('='));
                    }
                }
            } else {
                for n in 0..100 {
                    env.set(&format!("KEY_{i}"), &n.to_string()).unwrap();
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(env.len(), 5);
    assert_eq!(env.get("KEY_1"), "99");
}

// =============================================================================
// Process Environment
// =============================================================================

#[test]
fn test_os_env_set_lookup_unset() {
    let _lock = lock_os_env();
    let env = OsEnv::new();

    env.set("ENVFILL_IT_EXISTENT", "value").unwrap();
    assert_eq!(env.lookup("ENVFILL_IT_EXISTENT").as_deref(), Some("value"));
    assert!(
        env.environ()
            .contains(&"ENVFILL_IT_EXISTENT=value".to_string())
    );

    env.unset("ENVFILL_IT_EXISTENT").unwrap();
    assert_eq!(env.lookup("ENVFILL_IT_EXISTENT"), None);
    assert_eq!(env.get("ENVFILL_IT_EXISTENT"), "");
}

#[test]
fn test_os_env_rejects_invalid_names() {
    let _lock = lock_os_env();
    let env = OsEnv::new();

    let err = env.set("ENVFILL=BAD", "x").unwrap_err();
    assert!(err.is_store_error());
    assert!(env.set("", "x").is_err());
    assert!(env.unset("").is_err());
}

#[test]
fn test_os_env_expand() {
    let _lock = lock_os_env();
    let env = OsEnv::new();

    env.set("ENVFILL_IT_HOST", "example.org").unwrap();
    assert_eq!(
        env.expand_env("https://${ENVFILL_IT_HOST}/$ENVFILL_IT_MISSING"),
        "https://example.org/"
    );
    env.unset("ENVFILL_IT_HOST").unwrap();
}

// =============================================================================
// Trait Objects
// =============================================================================

#[test]
fn test_stores_behind_trait_objects() {
    let _lock = lock_os_env();
    OsEnv::new().set("ENVFILL_IT_SHARED", "os").unwrap();

    let stores: Vec<Box<dyn Env>> = vec![
        Box::new(MapEnv::from_map([("ENVFILL_IT_SHARED", "memory")])),
        Box::new(OsEnv::new()),
    ];
    let seen: Vec<String> = stores
        .iter()
        .map(|env| env.expand_env("$ENVFILL_IT_SHARED"))
        .collect();
    assert_eq!(seen, vec!["memory", "os"]);

    OsEnv::new().unset("ENVFILL_IT_SHARED").unwrap();
}
