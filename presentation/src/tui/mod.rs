//! Interactive question page built on ratatui
//!
//! - `app`: select! loop over terminal input, UiEvents and a tick
//! - `state`: view state owned by the loop
//! - `presenter`: applies UiEvents to the state
//! - `surface`: theme surface the ThemeManager paints on
//! - `widgets`: header, input, page and status bar

pub mod app;
pub mod mode;
pub mod presenter;
pub mod state;
pub mod surface;
pub mod widgets;

pub use app::TuiApp;
pub use surface::TerminalThemeSurface;
