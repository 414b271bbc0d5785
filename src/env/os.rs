//! Process environment store

use super::Env;
use crate::error::{Result, check_key, check_value};

/// The process environment
///
/// Every `OsEnv` reads and writes the same process-wide table, so writes made
/// through one handle (or by any other code in the process) are visible to all
/// of them. Mutating the environment while other threads read it is not
/// synchronized by this type: callers that call [`Env::set`], [`Env::unset`]
/// or [`Env::clear`] must make sure no other thread accesses the environment
/// at the same time.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnv;

impl OsEnv {
    /// Create a handle to the process environment
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Env for OsEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        if check_key(key).is_err() {
            return None;
        }
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        check_value(key, value)?;
        // SAFETY: name and value were validated above; exclusive access to the
        // environment is the caller's responsibility (see type docs).
        unsafe { std::env::set_var(key, value) };
        Ok(())
    }

    fn unset(&self, key: &str) -> Result<()> {
        check_key(key)?;
        // SAFETY: see `set`.
        unsafe { std::env::remove_var(key) };
        Ok(())
    }

    fn clear(&self) {
        // Windows lists per-drive entries such as `=C:`, which remove_var rejects
        let keys: Vec<_> = std::env::vars_os()
            .map(|(k, _)| k)
            .filter(|k| check_key(&k.to_string_lossy()).is_ok())
            .collect();
        log::debug!("Clearing {} process environment variables", keys.len());
        for key in keys {
            // SAFETY: see `set`. Names come from the environment itself.
            unsafe { std::env::remove_var(key) };
        }
    }

    fn environ(&self) -> Vec<String> {
        std::env::vars_os()
            .map(|(k, v)| format!("{}={}", k.to_string_lossy(), v.to_string_lossy()))
            .collect()
    }
}
