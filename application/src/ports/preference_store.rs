//! Preference store port
//!
//! Durable key-value storage shared by every running client ("context"),
//! with change notifications in the manner of browser `storage` events:
//! a subscriber only hears about writes made by *other* contexts.
//!
//! # Architecture
//!
//! - **Port**: [`PreferenceStore`] - defined here in application layer
//! - **Adapters**: `FilePreferenceStore` and `InMemoryPreferenceStore` in
//!   the infrastructure layer
//!
//! ```text
//! context A: store.set("theme", "dark")
//!        ↓ (persisted)
//! context B: StorageSubscription::recv() → StorageChange { key: "theme", .. }
//! context A: (nothing; own writes are not echoed)
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::warn;

/// Errors from the preference store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt preference data: {0}")]
    Corrupt(String),
}

/// Identity of one context writing to a shared store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

impl ContextId {
    /// Allocate an identifier unique across processes on this host.
    pub fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        let local = NEXT.fetch_add(1, Ordering::Relaxed) & 0xFFFF_FFFF;
        Self((u64::from(std::process::id()) << 32) | local)
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

/// A key changed in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    /// Context that made the change
    pub origin: ContextId,
}

/// Durable preference storage
pub trait PreferenceStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value. Other contexts are notified; this one is not.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Identity of this context
    fn context_id(&self) -> ContextId;

    /// Listen for changes made by other contexts
    fn subscribe(&self) -> StorageSubscription;
}

/// Receiving end of a store's change notifications.
///
/// Drops changes that originate from the subscribing context and rides over
/// lagged receivers instead of failing.
pub struct StorageSubscription {
    receiver: broadcast::Receiver<StorageChange>,
    own: ContextId,
}

impl StorageSubscription {
    pub fn new(receiver: broadcast::Receiver<StorageChange>, own: ContextId) -> Self {
        Self { receiver, own }
    }

    /// Wait for the next change from another context.
    ///
    /// Returns `None` once the store has shut down.
    pub async fn recv(&mut self) -> Option<StorageChange> {
        loop {
            match self.receiver.recv().await {
                Ok(change) if change.origin == self.own => continue,
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Storage subscription lagged, skipped {} changes", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
