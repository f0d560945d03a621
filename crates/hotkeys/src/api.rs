//! Capability trait over the OS hotkey registration calls.

use std::collections::HashMap;

use global_hotkey::{GlobalHotKeyManager, hotkey::HotKey};
use parking_lot::Mutex;

use crate::{Error, Result};

/// Minimal hotkey API the binding manager needs. Abstracted so the
/// reconciliation algorithm can be exercised with a fake that simulates
/// registration failures.
pub trait HotkeyApi {
    /// Register `combo` with the OS and return the registration id used to
    /// route hotkey events back to their action.
    fn register(&self, combo: &str) -> Result<u32>;
    /// Release a previous registration.
    fn unregister(&self, id: u32) -> Result<()>;
}

/// Real implementation backed by `global-hotkey`.
pub struct GlobalHotkeyApi {
    manager: GlobalHotKeyManager,
    /// Registration id → parsed hotkey; `global-hotkey` unregisters by
    /// value, so the parse result is kept around.
    registered: Mutex<HashMap<u32, HotKey>>,
}

impl GlobalHotkeyApi {
    /// Connect to the OS hotkey facility. Must be called on the main thread
    /// on macOS.
    pub fn new() -> Result<Self> {
        let manager = GlobalHotKeyManager::new().map_err(|e| Error::Backend(e.to_string()))?;
        Ok(Self {
            manager,
            registered: Mutex::new(HashMap::new()),
        })
    }
}

impl HotkeyApi for GlobalHotkeyApi {
    fn register(&self, combo: &str) -> Result<u32> {
        let hotkey: HotKey = combo.parse().map_err(|e: global_hotkey::hotkey::HotKeyParseError| {
            Error::InvalidCombo {
                combo: combo.to_string(),
                message: e.to_string(),
            }
        })?;
        self.manager.register(hotkey).map_err(|e| Error::Register {
            combo: combo.to_string(),
            message: e.to_string(),
        })?;
        let id = hotkey.id();
        self.registered.lock().insert(id, hotkey);
        Ok(id)
    }

    fn unregister(&self, id: u32) -> Result<()> {
        let Some(hotkey) = self.registered.lock().remove(&id) else {
            return Err(Error::UnknownId(id));
        };
        self.manager
            .unregister(hotkey)
            .map_err(|e| Error::Backend(e.to_string()))
    }
}
