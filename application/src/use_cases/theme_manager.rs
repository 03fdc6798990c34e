//! Theme Manager use case.
//!
//! Owns the light/dark preference: loads it once from the
//! [`PreferenceStore`], applies it to a [`ThemeSurface`], persists explicit
//! toggles, and adopts changes other contexts make to the same store.
//!
//! ```text
//! toggle()                     other context writes "theme"
//!   ├─ flip current              ├─ StorageSubscription::recv()
//!   ├─ store.set("theme", ..)    ├─ adopt value (default light)
//!   ├─ surface.apply(..)         ├─ surface.apply(..)
//!   └─ UiEvent::ThemeChanged     └─ UiEvent::ThemeChanged (no write-back)
//! ```

use crate::ports::preference_store::{PreferenceStore, StorageChange, StoreError};
use crate::ports::theme_surface::ThemeSurface;
use crate::ports::ui_event::{ThemeChangeSource, UiEvent};
use openanswer_domain::{THEME_KEY, Theme};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Errors from theme operations
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to persist theme: {0}")]
    Persist(#[from] StoreError),
}

/// Light/dark preference manager shared by the whole page
pub struct ThemeManager {
    store: Arc<dyn PreferenceStore>,
    surface: Arc<dyn ThemeSurface>,
    current: Mutex<Theme>,
    tx: Option<mpsc::UnboundedSender<UiEvent>>,
}

impl ThemeManager {
    /// Load the persisted theme; unset or unreadable means light.
    pub fn new(store: Arc<dyn PreferenceStore>, surface: Arc<dyn ThemeSurface>) -> Self {
        let stored = match store.get(THEME_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read theme preference: {}", e);
                None
            }
        };
        let theme = Theme::from_stored(stored.as_deref());
        debug!("Loaded theme: {}", theme);

        Self {
            store,
            surface,
            current: Mutex::new(theme),
            tx: None,
        }
    }

    /// Emit [`UiEvent::ThemeChanged`] on every change.
    pub fn with_ui_events(mut self, tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        self.tx = Some(tx);
        self
    }

    pub fn current(&self) -> Theme {
        *self.current.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Apply the loaded theme to the surface once at start-up.
    pub fn apply_initial(&self) {
        self.surface.apply(self.current());
    }

    /// Flip the theme, persist it, and apply it.
    ///
    /// The display follows the toggle even when persisting fails; the
    /// failure is returned so the caller can report it.
    pub fn toggle(&self) -> Result<Theme, ThemeError> {
        let next = {
            let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
            *current = current.toggled();
            *current
        };
        info!("Theme toggled to {}", next);

        let persisted = self.store.set(THEME_KEY, next.as_str());
        self.surface.apply(next);
        self.emit(next, ThemeChangeSource::Toggle);

        persisted.map_err(|e| {
            warn!("Could not persist theme: {}", e);
            ThemeError::Persist(e)
        })?;
        Ok(next)
    }

    /// Adopt a change another context made to the store.
    ///
    /// Returns the adopted theme, or `None` when the change concerns another key.
    pub fn handle_storage_change(&self, change: &StorageChange) -> Option<Theme> {
        if change.key != THEME_KEY {
            return None;
        }
        let theme = Theme::from_stored(change.new_value.as_deref());
        *self.current.lock().unwrap_or_else(|p| p.into_inner()) = theme;
        debug!("Theme synchronized from another context: {}", theme);

        self.surface.apply(theme);
        self.emit(theme, ThemeChangeSource::OtherContext);
        Some(theme)
    }

    /// Follow the store's change notifications until it shuts down.
    pub fn spawn_sync(self: Arc<Self>) -> JoinHandle<()> {
        let mut subscription = self.store.subscribe();
        tokio::spawn(async move {
            while let Some(change) = subscription.recv().await {
                self.handle_storage_change(&change);
            }
            debug!("Theme sync stopped: store closed");
        })
    }

    fn emit(&self, theme: Theme, source: ThemeChangeSource) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(UiEvent::ThemeChanged { theme, source });
        }
    }
}
