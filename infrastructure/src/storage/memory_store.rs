//! In-process preference store

use openanswer_application::{
    ContextId, PreferenceStore, StorageChange, StorageSubscription, StoreError,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

struct Shared {
    values: Mutex<HashMap<String, String>>,
    tx: broadcast::Sender<StorageChange>,
}

/// Preference store kept in memory and shared between context handles.
///
/// Each handle from [`open_context`](Self::open_context) acts as a separate
/// context over the same values.
pub struct InMemoryPreferenceStore {
    shared: Arc<Shared>,
    id: ContextId,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                values: Mutex::new(HashMap::new()),
                tx: broadcast::channel(CHANNEL_CAPACITY).0,
            }),
            id: ContextId::new(),
        }
    }

    /// Another context over the same values
    pub fn open_context(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            id: ContextId::new(),
        }
    }
}

impl Default for InMemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.shared.values.lock().unwrap_or_else(|p| p.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let old_value = {
            let mut values = self.shared.values.lock().unwrap_or_else(|p| p.into_inner());
            values.insert(key.to_string(), value.to_string())
        };
        if old_value.as_deref() == Some(value) {
            return Ok(());
        }
        // No subscribers is fine
        let _ = self.shared.tx.send(StorageChange {
            key: key.to_string(),
            old_value,
            new_value: Some(value.to_string()),
            origin: self.id,
        });
        Ok(())
    }

    fn context_id(&self) -> ContextId {
        self.id
    }

    fn subscribe(&self) -> StorageSubscription {
        StorageSubscription::new(self.shared.tx.subscribe(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openanswer_application::{NoThemeSurface, ThemeManager};
    use openanswer_domain::{THEME_KEY, Theme};
    use std::time::Duration;

    #[test]
    fn test_contexts_share_values() {
        let a = InMemoryPreferenceStore::new();
        let b = a.open_context();
        a.set(THEME_KEY, "dark").unwrap();
        assert_eq!(b.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_ne!(a.context_id(), b.context_id());
    }

    #[tokio::test]
    async fn test_change_reaches_other_context_only() {
        let a = InMemoryPreferenceStore::new();
        let b = a.open_context();
        let mut a_sub = a.subscribe();
        let mut b_sub = b.subscribe();

        a.set(THEME_KEY, "dark").unwrap();

        let change = b_sub.recv().await.unwrap();
        assert_eq!(change.key, THEME_KEY);
        assert_eq!(change.old_value, None);
        assert_eq!(change.new_value.as_deref(), Some("dark"));
        assert_eq!(change.origin, a.context_id());

        let own = tokio::time::timeout(Duration::from_millis(50), a_sub.recv()).await;
        assert!(own.is_err(), "writer must not hear its own change");
    }

    #[tokio::test]
    async fn test_unchanged_value_is_not_broadcast() {
        let a = InMemoryPreferenceStore::new();
        let b = a.open_context();
        a.set(THEME_KEY, "dark").unwrap();
        let mut b_sub = b.subscribe();

        a.set(THEME_KEY, "dark").unwrap();
        let heard = tokio::time::timeout(Duration::from_millis(50), b_sub.recv()).await;
        assert!(heard.is_err());
    }

    #[tokio::test]
    async fn test_theme_toggle_propagates_between_contexts() {
        let store_a = Arc::new(InMemoryPreferenceStore::new());
        let store_b = Arc::new(store_a.open_context());

        let tab_a = ThemeManager::new(store_a.clone(), Arc::new(NoThemeSurface));
        let tab_b = Arc::new(ThemeManager::new(store_b.clone(), Arc::new(NoThemeSurface)));
        let mut probe = store_b.subscribe();
        let sync = tab_b.clone().spawn_sync();

        assert_eq!(tab_a.toggle().unwrap(), Theme::Dark);
        // Wait until the change has been delivered to context B
        probe.recv().await.unwrap();
        for _ in 0..100 {
            if tab_b.current() == Theme::Dark {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(tab_b.current(), Theme::Dark);
        assert_eq!(store_b.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        sync.abort();
    }
}
