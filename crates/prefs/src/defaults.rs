//! Compiled-in default preferences.

use std::collections::BTreeMap;

use serde_json::{Value, json};

/// CSS selectors the page bridge clicks and observes. Kept in the persisted
/// document so power users can repair them when the hosted page changes
/// markup between releases.
pub(crate) fn element_selectors() -> BTreeMap<String, String> {
    [
        ("prefButton", ".page-root .settings"),
        ("prefDialog", ".page-root .settings-stream.popup"),
        ("mute", ".page-root .volume__icon"),
        ("play", ".page-station .player-controls__play"),
        ("next", ".page-station .slider__item_next"),
        ("like", ".page-station .button.like_action_like"),
        ("dislike", ".page-station .button.like_action_dislike"),
        ("activeStation", ".page-index .station_playing"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// The full default document. Every key present here is guaranteed to exist
/// in the loaded preferences after reconciliation.
pub(crate) fn tree() -> Value {
    json!({
        "window": {
            "x": 0,
            "y": 0,
            "width": 800,
            "height": 700,
            "controlsBehavior": ["trayOnMinimize"],
            "theme": false,
            "useCustom": false,
            "customThemePath": "",
        },
        "notifications": {
            "enable": true,
            "showPreviews": true,
            "displayTime": 4000,
        },
        "keyboard": {
            "play": "MediaPlayPause",
            "next": "MediaNextTrack",
            "like": "Super+PageUp",
            "dislike": "Super+PageDown",
            "mute": "",
            "increaseVolume": "",
            "decreaseVolume": "",
        },
        "element": element_selectors(),
    })
}
