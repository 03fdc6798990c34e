//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod answer_gateway;
pub mod preference_store;
pub mod theme_surface;
pub mod ui_event;
