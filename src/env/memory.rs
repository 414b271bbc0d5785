//! In-memory environment store

use super::Env;
use crate::error::Result;
use crate::sync::RwLockExt;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory environment (not shared with the process environment)
///
/// Reads and writes go through a single `RwLock`: readers never block each
/// other, writers are exclusive. [`MapEnv::environ`] lists variables sorted by
/// name, so filling from a `MapEnv` is reproducible.
#[derive(Debug, Default)]
pub struct MapEnv {
    env: RwLock<BTreeMap<String, String>>,
}

impl MapEnv {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a copy of `vars`
    ///
    /// Later duplicates of the same name overwrite earlier ones.
    pub fn from_map<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            env: RwLock::new(env),
        }
    }

    /// Number of variables in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.env.read_recovered().len()
    }

    /// Whether the store holds no variables
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.env.read_recovered().is_empty()
    }
}

impl Env for MapEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        self.env.read_recovered().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.env
            .write_recovered()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn unset(&self, key: &str) -> Result<()> {
        self.env.write_recovered().remove(key);
        Ok(())
    }

    fn clear(&self) {
        self.env.write_recovered().clear();
    }

    fn environ(&self) -> Vec<String> {
        self.env
            .read_recovered()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_existing_and_missing() {
        let env = MapEnv::from_map([("existent_key", "value")]);

        assert_eq!(env.get("existent_key"), "value");
        assert_eq!(env.get("missing_key"), "");
        assert_eq!(env.lookup("missing_key"), None);
    }

    #[test]
    fn test_set_then_get() {
        let env = MapEnv::new();
        env.set("setted_key", "xxxxx").unwrap();
        assert_eq!(env.get("setted_key"), "xxxxx");

        env.set("setted_key", "yyy").unwrap();
        assert_eq!(env.get("setted_key"), "yyy");
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_unset() {
        let env = MapEnv::from_map([("deleted_key", "asdf")]);
        env.unset("deleted_key").unwrap();
        assert_eq!(env.get("deleted_key"), "");
        // Removing an absent key is not an error
        env.unset("deleted_key").unwrap();
    }

    #[test]
    fn test_clear() {
        let env = MapEnv::from_map([("cleaned_key01", "asdf"), ("cleaned_key02", "asdf")]);
        env.clear();
        assert!(env.is_empty());
        assert!(env.environ().is_empty());
    }

    #[test]
    fn test_environ_is_sorted() {
        let env = MapEnv::from_map([("env_key_02", "02"), ("env_key_01", "01")]);
        assert_eq!(env.environ(), vec!["env_key_01=01", "env_key_02=02"]);
    }

    #[test]
    fn test_from_map_copies_input() {
        let mut source = std::collections::HashMap::new();
        source.insert("A".to_string(), "1".to_string());
        let env = MapEnv::from_map(source.clone());
        source.insert("B".to_string(), "2".to_string());

        assert_eq!(env.len(), 1);
        assert_eq!(env.lookup("B"), None);
    }
}
