//! Typed views over the persisted preferences document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Smallest width the main window may persist.
pub const MIN_WIDTH: u32 = 800;
/// Smallest height the main window may persist.
pub const MIN_HEIGHT: u32 = 700;

/// Lower bound for the notification display time, in milliseconds.
pub(crate) const MIN_DISPLAY_TIME_MS: u64 = 500;
/// Upper bound for the notification display time, in milliseconds.
pub(crate) const MAX_DISPLAY_TIME_MS: u64 = 15_000;

/// `controlsBehavior` flag: hide to tray instead of quitting on close.
pub(crate) const TRAY_ON_CLOSE: &str = "trayOnClose";
/// `controlsBehavior` flag: hide to tray on minimize.
pub(crate) const TRAY_ON_MINIMIZE: &str = "trayOnMinimize";

/// The `window` preferences domain: geometry, controls behavior, theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPrefs {
    /// Last persisted window x position.
    pub x: i32,
    /// Last persisted window y position.
    pub y: i32,
    /// Last persisted window width, never below [`MIN_WIDTH`].
    pub width: u32,
    /// Last persisted window height, never below [`MIN_HEIGHT`].
    pub height: u32,
    /// Active controls-behavior flags, a subset of
    /// {`trayOnClose`, `trayOnMinimize`}.
    pub controls_behavior: Vec<String>,
    /// Whether the built-in dark theme is enabled.
    pub theme: bool,
    /// Whether a custom theme directory should be used.
    pub use_custom: bool,
    /// Directory holding custom `*.css` stylesheets; empty when unset.
    pub custom_theme_path: String,
}

impl WindowPrefs {
    /// Whether closing the window should hide to tray instead of quitting.
    pub fn tray_on_close(&self) -> bool {
        self.controls_behavior.iter().any(|f| f == TRAY_ON_CLOSE)
    }

    /// Whether minimizing the window should hide to tray.
    pub fn tray_on_minimize(&self) -> bool {
        self.controls_behavior.iter().any(|f| f == TRAY_ON_MINIMIZE)
    }
}

impl Default for WindowPrefs {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: MIN_WIDTH,
            height: MIN_HEIGHT,
            controls_behavior: vec![TRAY_ON_MINIMIZE.to_string()],
            theme: false,
            use_custom: false,
            custom_theme_path: String::new(),
        }
    }
}

/// The `notifications` preferences domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPrefs {
    /// Master switch for desktop notifications.
    pub enable: bool,
    /// Whether cover art previews are attached to notifications.
    pub show_previews: bool,
    /// How long a notification stays visible, in milliseconds.
    pub display_time: u64,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            enable: true,
            show_previews: true,
            display_time: 4000,
        }
    }
}

/// The `keyboard` preferences domain: one combo string per action.
///
/// The empty string is the "unbound" sentinel and must never reach the OS
/// registration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardBindings {
    /// Toggle play/pause.
    pub play: String,
    /// Skip to the next track.
    pub next: String,
    /// Like the current track.
    pub like: String,
    /// Dislike the current track.
    pub dislike: String,
    /// Toggle mute.
    pub mute: String,
    /// Raise the player volume one step.
    pub increase_volume: String,
    /// Lower the player volume one step.
    pub decrease_volume: String,
}

impl Default for KeyboardBindings {
    fn default() -> Self {
        Self {
            play: "MediaPlayPause".to_string(),
            next: "MediaNextTrack".to_string(),
            like: "Super+PageUp".to_string(),
            dislike: "Super+PageDown".to_string(),
            mute: String::new(),
            increase_volume: String::new(),
            decrease_volume: String::new(),
        }
    }
}

/// A typed snapshot of the whole preferences document, as delivered to save
/// subscribers. Extra keys a user added by hand survive on disk but are not
/// part of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Window geometry, controls behavior and theme selection.
    pub window: WindowPrefs,
    /// Desktop notification configuration.
    pub notifications: NotificationPrefs,
    /// Global shortcut bindings.
    pub keyboard: KeyboardBindings,
    /// CSS selectors used by the page bridge; opaque to this crate.
    #[serde(default)]
    pub element: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowPrefs::default(),
            notifications: NotificationPrefs::default(),
            keyboard: KeyboardBindings::default(),
            element: crate::defaults::element_selectors(),
        }
    }
}

/// Window geometry as captured at quit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Window x position.
    pub x: i32,
    /// Window y position.
    pub y: i32,
    /// Window width.
    pub width: u32,
    /// Window height.
    pub height: u32,
}

impl Geometry {
    /// Raise width/height to the enforced minimums.
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.max(MIN_WIDTH),
            height: self.height.max(MIN_HEIGHT),
            ..self
        }
    }
}
