//! Environment variable stores
//!
//! Provides a common interface over key/value environment stores:
//! - **OS**: the process environment ([`OsEnv`])
//! - **Memory**: an isolated, thread-safe map for tests and embedding ([`MapEnv`])

mod expand;
mod memory;
mod os;

pub use expand::expand;
pub use memory::MapEnv;
pub use os::OsEnv;

use crate::error::Result;

/// Trait for environment variable stores
pub trait Env: Send + Sync {
    /// Get the value of `key`, or an empty string if it is not set
    fn get(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_default()
    }

    /// Get the value of `key`, distinguishing "unset" from "set to empty"
    fn lookup(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the name or the value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the name.
    fn unset(&self, key: &str) -> Result<()>;

    /// Remove every variable
    fn clear(&self);

    /// List every variable as a `key=value` string
    fn environ(&self) -> Vec<String>;

    /// Expand `${name}` and `$name` references using `mapping`
    fn expand(&self, template: &str, mapping: &dyn Fn(&str) -> String) -> String {
        expand(template, mapping)
    }

    /// Expand `${name}` and `$name` references using this store
    fn expand_env(&self, template: &str) -> String {
        expand(template, &|name: &str| self.get(name))
    }
}
