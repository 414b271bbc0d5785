//! Common test utilities for envfill integration tests
//!
//! Provides shared environment fixtures and helpers.

#![allow(dead_code)]

use envfill::{Env, MapEnv};
use std::sync::{Mutex, MutexGuard};

// =============================================================================
// Logging
// =============================================================================

/// Route `log` output through the test harness (`RUST_LOG=envfill=trace`)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Process Environment Serialization
// =============================================================================

static OS_ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that touch the process environment
pub fn lock_os_env() -> MutexGuard<'static, ()> {
    OS_ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// =============================================================================
// Fixtures
// =============================================================================

/// A service environment mixing scalars, an array and a map
pub fn service_env() -> MapEnv {
    MapEnv::from_map([
        ("SVC_CONFIG", "/etc/svc.toml"),
        ("SVC_LOG_LEVEL", "info"),
        ("SVC_USERS_0", "user00"),
        ("SVC_USERS_1", "user01"),
        ("SVC_USERS_3", "user03"),
        ("SVC_ADDR_DEFAULT", "localhost"),
        ("SVC_ADDR_FALLBACK", "127.0.0.1"),
        ("PATH", "/usr/bin"),
        ("OTHER_KEY", "x"),
    ])
}

/// Sorted `environ()` output, for order-independent comparisons
pub fn sorted_environ(env: &dyn Env) -> Vec<String> {
    let mut list = env.environ();
    list.sort();
    list
}
