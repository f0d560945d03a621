//! Persisted user preferences for wavetray.
//!
//! The store is the single source of truth the rest of the shell reconciles
//! against: global shortcut bindings, notification behavior, theme selection
//! and window geometry all live here. It is a JSON document on disk with
//! compiled-in defaults, loaded once at startup and mutated only through
//! [`PrefStore::set`], which persists synchronously and then notifies save
//! subscribers with a typed [`Settings`] snapshot.
//!
//! Loading never fails hard: a missing, malformed, or structurally corrupt
//! file is reconciled against the defaults and written back.

use std::path::PathBuf;

mod defaults;
mod error;
mod merge;
mod store;
mod types;

#[cfg(test)]
mod test_merge;
#[cfg(test)]
mod test_store;

pub use error::{Error, Result};
pub use store::PrefStore;
pub use types::{
    Geometry, KeyboardBindings, MIN_HEIGHT, MIN_WIDTH, NotificationPrefs, Settings, WindowPrefs,
};

/// Determine the preferred preferences path (`<config dir>/wavetray/preferences.json`).
pub fn default_prefs_path() -> PathBuf {
    let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    p.push("wavetray");
    p.push("preferences.json");
    p
}
