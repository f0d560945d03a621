//! Global shortcut binding for wavetray.
//!
//! This crate keeps the OS-registered global hotkeys in agreement with the
//! `keyboard` domain of the preference store:
//!
//! - [`Action`]: the fixed set of player commands a shortcut can trigger
//! - [`HotkeyApi`]: capability trait over the OS registration calls
//! - [`BindingManager`]: per-action diffing with rollback on failure
//!
//! The manager's cached bindings are the sole authority on what is
//! registered with the OS; every path through [`BindingManager::reconcile`]
//! preserves that, including partial failure.

mod action;
mod api;
mod binding;
mod error;

pub use action::Action;
pub use api::{GlobalHotkeyApi, HotkeyApi};
pub use binding::BindingManager;
pub use error::{Error, Result};
