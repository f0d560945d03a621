//! Tray icon and context menu.

use tray_icon::{
    Icon, TrayIcon, TrayIconBuilder,
    menu::{CheckMenuItem, Menu, MenuId, MenuItem, PredefinedMenuItem},
};
use tracing::warn;
use wavetray_protocol::Command;

static PLAYING_PNG: &[u8] = include_bytes!("../assets/icon-playing.png");
static PAUSED_PNG: &[u8] = include_bytes!("../assets/icon-paused.png");

fn icon_from_png(bytes: &[u8]) -> Option<Icon> {
    let image = match image::load_from_memory(bytes) {
        Ok(image) => image.into_rgba8(),
        Err(e) => {
            warn!("cannot decode tray icon: {}", e);
            return None;
        }
    };
    let (width, height) = image.dimensions();
    match Icon::from_rgba(image.into_raw(), width, height) {
        Ok(icon) => Some(icon),
        Err(e) => {
            warn!("cannot build tray icon: {}", e);
            None
        }
    }
}

/// What a tray menu click should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Forward a command to the player page.
    Player(Command),
    /// Persist the flipped "Show notifications" check state.
    ToggleNotifications,
    /// Show and focus the main window.
    ShowWindow,
    /// Quit the application.
    Quit,
}

/// Menu ids the event loop matches incoming `MenuEvent`s against.
pub struct TrayMenuIds {
    /// Toggle playback.
    pub play: MenuId,
    /// Skip to the next track.
    pub next: MenuId,
    /// Toggle mute.
    pub mute: MenuId,
    /// Toggle high-quality streaming.
    pub hq: MenuId,
    /// Like the current track.
    pub like: MenuId,
    /// Dislike the current track.
    pub dislike: MenuId,
    /// The "Show notifications" check item.
    pub notifications: MenuId,
    /// Open the player's preferences pane.
    pub preferences: MenuId,
    /// Show and focus the main window.
    pub show: MenuId,
    /// Log the current account out.
    pub logout: MenuId,
    /// Quit the application.
    pub quit: MenuId,
}

impl TrayMenuIds {
    /// Map a clicked menu id onto its action.
    pub fn action_for(&self, id: &MenuId) -> Option<MenuAction> {
        let entries = [
            (&self.play, MenuAction::Player(Command::Play)),
            (&self.next, MenuAction::Player(Command::Next)),
            (&self.mute, MenuAction::Player(Command::Mute)),
            (&self.hq, MenuAction::Player(Command::ToggleHq)),
            (&self.like, MenuAction::Player(Command::Like)),
            (&self.dislike, MenuAction::Player(Command::Dislike)),
            (&self.preferences, MenuAction::Player(Command::Preferences)),
            (&self.logout, MenuAction::Player(Command::Logout)),
            (&self.notifications, MenuAction::ToggleNotifications),
            (&self.show, MenuAction::ShowWindow),
            (&self.quit, MenuAction::Quit),
        ];
        entries
            .into_iter()
            .find_map(|(candidate, action)| (candidate == id).then_some(action))
    }
}

/// Owns the tray icon, its menu, and the playing/paused icon pair.
///
/// Tray construction failing (no tray host on this desktop) is tolerated:
/// the controller then swallows icon and tooltip updates, and the rest of
/// the application keeps working.
pub struct TrayController {
    tray: Option<TrayIcon>,
    notifications_item: CheckMenuItem,
    ids: TrayMenuIds,
    playing_icon: Option<Icon>,
    paused_icon: Option<Icon>,
    tooltip: String,
}

impl TrayController {
    /// Build the tray icon with its menu. `notifications_enabled` seeds the
    /// check state of the "Show notifications" item.
    pub fn new(notifications_enabled: bool) -> Self {
        let play = MenuItem::new("Play", true, None);
        let next = MenuItem::new("Next Track", true, None);
        let mute = MenuItem::new("Mute", true, None);
        let hq = MenuItem::new("High Quality", true, None);
        let like = MenuItem::new("Like", true, None);
        let dislike = MenuItem::new("Dislike", true, None);
        let notifications_item =
            CheckMenuItem::new("Show notifications", true, notifications_enabled, None);
        let preferences = MenuItem::new("Preferences", true, None);
        let show = MenuItem::new("Show App", true, None);
        let logout = MenuItem::new("Log Out", true, None);
        let quit = MenuItem::new("Quit", true, None);

        let ids = TrayMenuIds {
            play: play.id().clone(),
            next: next.id().clone(),
            mute: mute.id().clone(),
            hq: hq.id().clone(),
            like: like.id().clone(),
            dislike: dislike.id().clone(),
            notifications: notifications_item.id().clone(),
            preferences: preferences.id().clone(),
            show: show.id().clone(),
            logout: logout.id().clone(),
            quit: quit.id().clone(),
        };

        let menu = Menu::new();
        if let Err(e) = menu.append_items(&[
            &play,
            &next,
            &PredefinedMenuItem::separator(),
            &mute,
            &hq,
            &PredefinedMenuItem::separator(),
            &like,
            &dislike,
            &PredefinedMenuItem::separator(),
            &notifications_item,
            &preferences,
            &PredefinedMenuItem::separator(),
            &show,
            &logout,
            &quit,
        ]) {
            warn!("cannot populate tray menu: {}", e);
        }

        let playing_icon = icon_from_png(PLAYING_PNG);
        let paused_icon = icon_from_png(PAUSED_PNG);

        let mut builder = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_menu_on_left_click(false)
            .with_tooltip("wavetray");
        if let Some(icon) = paused_icon.clone() {
            builder = builder.with_icon(icon);
        }
        let tray = match builder.build() {
            Ok(tray) => Some(tray),
            Err(e) => {
                warn!("cannot create tray icon, continuing without one: {}", e);
                None
            }
        };

        Self {
            tray,
            notifications_item,
            ids,
            playing_icon,
            paused_icon,
            tooltip: String::new(),
        }
    }

    /// Ids for matching menu events.
    pub fn ids(&self) -> &TrayMenuIds {
        &self.ids
    }

    /// Update the hover tooltip, normally the current track line.
    pub fn set_tooltip(&mut self, line: &str) {
        self.tooltip = line.to_string();
        if let Some(tray) = &self.tray {
            if let Err(e) = tray.set_tooltip(Some(line)) {
                warn!("cannot update tray tooltip: {}", e);
            }
        }
    }

    /// The last tooltip set, used for the click-to-copy action.
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Swap between the playing and paused icon.
    pub fn set_playing(&self, playing: bool) {
        let icon = if playing {
            self.playing_icon.clone()
        } else {
            self.paused_icon.clone()
        };
        if let (Some(tray), Some(icon)) = (&self.tray, icon) {
            if let Err(e) = tray.set_icon(Some(icon)) {
                warn!("cannot update tray icon: {}", e);
            }
        }
    }

    /// Reflect the persisted notification toggle in the menu.
    pub fn set_notifications_checked(&self, enabled: bool) {
        self.notifications_item.set_checked(enabled);
    }

    /// Current state of the "Show notifications" item, read after a click
    /// (the menu toggles the check mark itself).
    pub fn notifications_checked(&self) -> bool {
        self.notifications_item.is_checked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> TrayMenuIds {
        TrayMenuIds {
            play: MenuId::new("play"),
            next: MenuId::new("next"),
            mute: MenuId::new("mute"),
            hq: MenuId::new("hq"),
            like: MenuId::new("like"),
            dislike: MenuId::new("dislike"),
            notifications: MenuId::new("notifications"),
            preferences: MenuId::new("preferences"),
            show: MenuId::new("show"),
            logout: MenuId::new("logout"),
            quit: MenuId::new("quit"),
        }
    }

    #[test]
    fn every_menu_entry_maps_to_an_action() {
        let ids = ids();
        let expected = [
            (&ids.play, MenuAction::Player(Command::Play)),
            (&ids.next, MenuAction::Player(Command::Next)),
            (&ids.mute, MenuAction::Player(Command::Mute)),
            (&ids.hq, MenuAction::Player(Command::ToggleHq)),
            (&ids.like, MenuAction::Player(Command::Like)),
            (&ids.dislike, MenuAction::Player(Command::Dislike)),
            (&ids.preferences, MenuAction::Player(Command::Preferences)),
            (&ids.logout, MenuAction::Player(Command::Logout)),
            (&ids.notifications, MenuAction::ToggleNotifications),
            (&ids.show, MenuAction::ShowWindow),
            (&ids.quit, MenuAction::Quit),
        ];
        for (id, action) in expected {
            assert_eq!(ids.action_for(id), Some(action));
        }
    }

    #[test]
    fn unknown_ids_map_to_nothing() {
        assert_eq!(ids().action_for(&MenuId::new("bogus")), None);
    }
}
