use arena_types::{GameId, SPLASH_GAME_KEY};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use tracing::warn;

/// Read access to the shared key-value cache.
pub trait Cache: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

/// Process-wide in-memory cache.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to acquire write lock in set: {}", e);
                return;
            }
        };
        entries.insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to acquire write lock in remove: {}", e);
                return None;
            }
        };
        entries.remove(key)
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to acquire read lock in get: {}", e);
                return None;
            }
        };
        entries.get(key).cloned()
    }
}

/// Id of the game featured on the front page.
///
/// Falls back to [GameId::NONE] when the cache is unavailable or holds
/// nothing usable under [SPLASH_GAME_KEY].
pub fn resolve_last_game_id(cache: Option<&dyn Cache>) -> GameId {
    let Some(cache) = cache else {
        return GameId::NONE;
    };
    let Some(value) = cache.get(SPLASH_GAME_KEY) else {
        return GameId::NONE;
    };
    if value.trim().is_empty() {
        return GameId::NONE;
    }
    match value.parse::<GameId>() {
        Ok(id) => id,
        Err(e) => {
            warn!(
                key = SPLASH_GAME_KEY,
                value = %value,
                error = %e,
                "ignoring non-numeric game id"
            );
            GameId::NONE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("k"), None);
        cache.set("k", "v");
        assert_eq!(cache.get("k").as_deref(), Some("v"));

        // Clones share the same entries
        let other = cache.clone();
        other.set("k", "w");
        assert_eq!(cache.get("k").as_deref(), Some("w"));

        assert_eq!(cache.remove("k").as_deref(), Some("w"));
        assert_eq!(other.get("k"), None);
    }

    #[test]
    fn test_resolve_without_cache() {
        assert_eq!(resolve_last_game_id(None), GameId::NONE);
    }

    #[test]
    fn test_resolve_falsy_values() {
        let cache = MemoryCache::new();
        assert_eq!(resolve_last_game_id(Some(&cache)), GameId::NONE);

        for value in ["", "  ", "0"] {
            cache.set(SPLASH_GAME_KEY, value);
            assert_eq!(resolve_last_game_id(Some(&cache)), GameId::NONE, "{value:?}");
        }
    }

    #[test]
    fn test_resolve_stored_id() {
        let cache = MemoryCache::new();
        cache.set(SPLASH_GAME_KEY, "42");
        assert_eq!(resolve_last_game_id(Some(&cache)), GameId(42));
    }

    #[test]
    fn test_resolve_garbage() {
        let cache = MemoryCache::new();
        for value in ["abc", "-1", "4.2"] {
            cache.set(SPLASH_GAME_KEY, value);
            assert_eq!(resolve_last_game_id(Some(&cache)), GameId::NONE, "{value:?}");
        }
    }
}
