//! Per-visit scratch storage for states.
//!
//! Every state carries a [`VolatileStore`]: a string-keyed map of JSON
//! values scoped to the current visit. The machine clears it whenever the
//! state is adopted, before `before_entry` fires, so nothing in it survives
//! a leave/re-entry cycle. Persistent fields belong on the state itself.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// String-keyed scratch map holding arbitrary serializable values.
///
/// Values are stored as [`serde_json::Value`], so anything Serialize goes
/// in and anything DeserializeOwned comes back out. Typed round trips go
/// through [`set`](VolatileStore::set) and [`get`](VolatileStore::get);
/// [`set_raw`](VolatileStore::set_raw) and
/// [`get_raw`](VolatileStore::get_raw) skip the conversion.
///
/// # Example
///
/// ```rust
/// use excitable::core::VolatileStore;
///
/// let mut store = VolatileStore::new();
/// store.set("combo", 3u32).unwrap();
/// store.set("invulnerable", true).unwrap();
///
/// assert_eq!(store.get::<u32>("combo").unwrap(), Some(3));
/// assert_eq!(store.get::<bool>("invulnerable").unwrap(), Some(true));
///
/// store.clear();
/// assert!(store.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct VolatileStore {
    entries: HashMap<String, Value>,
}

impl VolatileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `value` and store it under `key`, replacing any previous
    /// entry.
    pub fn set<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: T,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.entries.insert(key.into(), value);
        Ok(())
    }

    /// Fetch and deserialize the value under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent; an `Err` means the stored
    /// value does not deserialize as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        self.entries
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
    }

    /// Store a raw JSON value under `key`.
    pub fn set_raw(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// The raw JSON value under `key`, if any.
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Remove and return the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether `key` has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the stored keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[test]
    fn new_store_is_empty() {
        let store = VolatileStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut store = VolatileStore::new();
        store.set("lives", 3u8).unwrap();
        store.set("label", "player one").unwrap();

        assert_eq!(store.get::<u8>("lives").unwrap(), Some(3));
        assert_eq!(
            store.get::<String>("label").unwrap().as_deref(),
            Some("player one")
        );
    }

    #[test]
    fn set_overwrites_previous_value() {
        let mut store = VolatileStore::new();
        store.set("lives", 3u8).unwrap();
        store.set("lives", 2u8).unwrap();

        assert_eq!(store.get::<u8>("lives").unwrap(), Some(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn absent_key_is_none() {
        let store = VolatileStore::new();
        assert_eq!(store.get::<u8>("missing").unwrap(), None);
        assert!(!store.contains_key("missing"));
    }

    #[test]
    fn wrong_type_is_an_error() {
        let mut store = VolatileStore::new();
        store.set("label", "not a number").unwrap();
        assert!(store.get::<u32>("label").is_err());
    }

    #[test]
    fn structured_values_round_trip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct SpawnPoint {
            x: i32,
            y: i32,
        }

        let mut store = VolatileStore::new();
        store.set("spawn", SpawnPoint { x: 4, y: -2 }).unwrap();

        assert_eq!(
            store.get::<SpawnPoint>("spawn").unwrap(),
            Some(SpawnPoint { x: 4, y: -2 })
        );
    }

    #[test]
    fn remove_takes_the_value_out() {
        let mut store = VolatileStore::new();
        store.set("combo", 5u32).unwrap();

        assert!(store.remove("combo").is_some());
        assert!(store.remove("combo").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut store = VolatileStore::new();
        store.set("a", 1u8).unwrap();
        store.set("b", 2u8).unwrap();

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.get::<u8>("a").unwrap(), None);
    }

    #[test]
    fn raw_access_skips_conversion() {
        let mut store = VolatileStore::new();
        store.set_raw("flag", serde_json::json!(true));

        assert_eq!(store.get_raw("flag"), Some(&serde_json::json!(true)));
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["flag"]);
    }
}
