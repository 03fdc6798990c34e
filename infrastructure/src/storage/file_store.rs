//! File-backed preference store shared by every client on the machine
//!
//! Values live in a small JSON object. Writes go through a temporary file and
//! a rename so readers never see a half-written file. Changes made by other
//! processes are found by polling: each store keeps the last contents it has
//! seen or written, and reports only differences it did not cause.
//!
//! `set` holds a lock file beside the store for its read-modify-write, so
//! clients writing different keys at the same time do not drop each other's
//! values. All file access is blocking; the file is a few bytes and `set`
//! runs only on an explicit user action.

use openanswer_application::{
    ContextId, PreferenceStore, StorageChange, StorageSubscription, StoreError,
};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

const CHANNEL_CAPACITY: usize = 64;
const LOCK_RETRY: Duration = Duration::from_millis(5);
const LOCK_TIMEOUT: Duration = Duration::from_secs(2);
/// A lock older than this was left by a client that died mid-write
const STALE_LOCK: Duration = Duration::from_secs(10);

type Values = HashMap<String, String>;

/// Preference store persisted as JSON on disk
pub struct FilePreferenceStore {
    path: PathBuf,
    id: ContextId,
    /// Contents as last seen or written by this context
    known: Arc<Mutex<Values>>,
    tx: broadcast::Sender<StorageChange>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl FilePreferenceStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let known = read_values(&path)?;
        debug!("Opened preference store at {}", path.display());

        Ok(Self {
            path,
            id: ContextId::new(),
            known: Arc::new(Mutex::new(known)),
            tx: broadcast::channel(CHANNEL_CAPACITY).0,
            watcher: Mutex::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start polling the file for changes made by other clients.
    ///
    /// Must be called inside a tokio runtime. Calling it again replaces the
    /// previous watcher.
    pub fn start_watching(&self, interval: Duration) {
        let path = self.path.clone();
        let known = self.known.clone();
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            let mut tick = tokio::time::interval(interval);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tick.tick().await;
                match read_values(&path) {
                    Ok(current) => {
                        for change in diff_and_update(&known, current) {
                            trace!("External change to '{}'", change.key);
                            let _ = tx.send(change);
                        }
                    }
                    Err(e) => warn!("Could not read preferences: {}", e),
                }
            }
        });

        let mut watcher = self.watcher.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = watcher.replace(handle) {
            previous.abort();
        }
    }
}

impl Drop for FilePreferenceStore {
    fn drop(&mut self) {
        let watcher = self.watcher.get_mut().unwrap_or_else(|p| p.into_inner());
        if let Some(handle) = watcher.take() {
            handle.abort();
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(read_values(&self.path)?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Held across the write so the watcher cannot report it back to us
        let mut known = self.known.lock().unwrap_or_else(|p| p.into_inner());
        let _lock = WriteLock::acquire(&self.path)?;

        let mut values = read_values(&self.path)?;
        values.insert(key.to_string(), value.to_string());
        write_values(&self.path, &values)?;

        known.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn context_id(&self) -> ContextId {
        self.id
    }

    fn subscribe(&self) -> StorageSubscription {
        StorageSubscription::new(self.tx.subscribe(), self.id)
    }
}

/// Compare `current` with what this context knew, remember `current`,
/// and return one change per differing key.
fn diff_and_update(known: &Mutex<Values>, current: Values) -> Vec<StorageChange> {
    let mut known = known.lock().unwrap_or_else(|p| p.into_inner());
    // Writer identity is not recorded in the file
    let origin = ContextId::new();

    let mut changes: Vec<StorageChange> = current
        .iter()
        .filter(|(key, value)| known.get(*key) != Some(*value))
        .map(|(key, value)| StorageChange {
            key: key.clone(),
            old_value: known.get(key).cloned(),
            new_value: Some(value.clone()),
            origin,
        })
        .collect();

    changes.extend(
        known
            .iter()
            .filter(|(key, _)| !current.contains_key(*key))
            .map(|(key, value)| StorageChange {
                key: key.clone(),
                old_value: Some(value.clone()),
                new_value: None,
                origin,
            }),
    );

    *known = current;
    changes
}

/// Exclusive lock shared by every client of one store file, released on drop.
struct WriteLock {
    path: PathBuf,
}

impl WriteLock {
    fn acquire(store: &Path) -> Result<Self, StoreError> {
        let path = store.with_extension("lock");
        let deadline = SystemTime::now() + LOCK_TIMEOUT;
        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if is_stale(&path) {
                        warn!("Removing stale preference lock {}", path.display());
                        let _ = std::fs::remove_file(&path);
                        continue;
                    }
                    if SystemTime::now() >= deadline {
                        return Err(StoreError::Io(std::io::Error::new(
                            ErrorKind::WouldBlock,
                            format!("preference file is locked: {}", path.display()),
                        )));
                    }
                    std::thread::sleep(LOCK_RETRY);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Could not release preference lock {}: {}", self.path.display(), e);
        }
    }
}

fn is_stale(lock: &Path) -> bool {
    std::fs::metadata(lock)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .is_some_and(|age| age > STALE_LOCK)
}

fn read_values(path: &Path) -> Result<Values, StoreError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Values::new()),
        Err(e) => return Err(e.into()),
    };
    if data.trim().is_empty() {
        return Ok(Values::new());
    }
    serde_json::from_str(&data).map_err(|e| StoreError::Corrupt(e.to_string()))
}

fn write_values(path: &Path, values: &Values) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(values)
        .map_err(|e| StoreError::Corrupt(e.to_string()))?;
    let tmp = path.with_extension(format!("tmp{}", std::process::id()));
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
