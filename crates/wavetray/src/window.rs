//! Main window helpers: show/hide and geometry persistence.

use prefs::{Geometry, PrefStore};
use tao::window::Window;
use tracing::{debug, warn};

/// Show, restore and focus the main window.
pub fn show(window: &Window) {
    window.set_visible(true);
    window.set_minimized(false);
    window.set_focus();
}

/// Toggle main window visibility, used by the tray double-click.
pub fn toggle(window: &Window) {
    if window.is_visible() {
        window.set_visible(false);
    } else {
        show(window);
    }
}

/// Persist the final window geometry at shutdown. A full-screen window
/// keeps the previously stored geometry; the store clamps to the minimum
/// size. On platforms without absolute positions the stored position is
/// carried forward unchanged.
pub fn persist_geometry(store: &PrefStore, window: &Window) {
    if window.fullscreen().is_some() {
        debug!("full screen at shutdown, keeping previous geometry");
        return;
    }
    let size = window.inner_size();
    let previous = store.window();
    let (x, y) = window
        .outer_position()
        .map(|position| (position.x, position.y))
        .unwrap_or((previous.x, previous.y));
    let geometry = Geometry {
        x,
        y,
        width: size.width,
        height: size.height,
    };
    if let Err(e) = store.set_geometry(geometry) {
        warn!("cannot persist window geometry: {}", e);
    }
}
