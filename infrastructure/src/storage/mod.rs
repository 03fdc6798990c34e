//! Preference storage adapters
//!
//! | Type | Scope | Change detection |
//! |------|-------|------------------|
//! | [`FilePreferenceStore`] | every client on this machine | polling the JSON file |
//! | [`InMemoryPreferenceStore`] | handles within one process | direct broadcast |
//!
//! Both implement [`PreferenceStore`](openanswer_application::PreferenceStore)
//! and never notify a context about its own writes.

mod file_store;
mod memory_store;

pub use file_store::FilePreferenceStore;
pub use memory_store::InMemoryPreferenceStore;
