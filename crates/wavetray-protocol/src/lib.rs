//! Shared types crossing wavetray's component boundaries.
//!
//! - [`Command`]: actions the shell sends to the embedded player page
//! - [`PlayerEvent`]: events the page reports back to the shell
//! - [`TrackInfo`]: the currently playing track as scraped by the page

use serde::{Deserialize, Serialize};

/// A command delivered to the embedded player page.
///
/// Commands are fire-and-forget: sending one before the page has loaded has
/// no effect and is silently dropped by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Toggle play/pause.
    Play,
    /// Skip to the next track.
    Next,
    /// Like the current track.
    Like,
    /// Dislike the current track (skips it).
    Dislike,
    /// Toggle mute.
    Mute,
    /// Toggle high-quality streaming.
    ToggleHq,
    /// Raise the player volume one step.
    IncreaseVolume,
    /// Lower the player volume one step.
    DecreaseVolume,
    /// Open the player's preferences dialog.
    Preferences,
    /// Log the current account out.
    Logout,
}

impl Command {
    /// The identifier the in-page dispatcher understands.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Next => "next",
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Mute => "mute",
            Self::ToggleHq => "toggleHQ",
            Self::IncreaseVolume => "increaseVolume",
            Self::DecreaseVolume => "decreaseVolume",
            Self::Preferences => "preferences",
            Self::Logout => "logout",
        }
    }
}

/// Track metadata scraped from the player page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Artist name(s), joined by the page script.
    pub author: String,
    /// Track title.
    pub title: String,
    /// Cover art URL, when the page exposes one.
    #[serde(default)]
    pub preview: Option<String>,
}

impl TrackInfo {
    /// One-line rendering used for tooltips and clipboard copies.
    pub fn line(&self) -> String {
        format!("{} by {}", self.title, self.author)
    }
}

/// An event posted by the page bridge's IPC channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum PlayerEvent {
    /// The playing track changed.
    TrackChanged(TrackInfo),
    /// Playback started or stopped.
    StateChanged {
        /// Whether the player is currently playing.
        playing: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_event_wire_format() {
        let ev: PlayerEvent = serde_json::from_str(
            r#"{"event":"trackChanged","payload":{"author":"Boards of Canada","title":"Roygbiv","preview":"https://example.net/cover.jpg"}}"#,
        )
        .unwrap();
        match ev {
            PlayerEvent::TrackChanged(t) => {
                assert_eq!(t.line(), "Roygbiv by Boards of Canada");
                assert!(t.preview.is_some());
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let ev: PlayerEvent =
            serde_json::from_str(r#"{"event":"stateChanged","payload":{"playing":false}}"#)
                .unwrap();
        assert_eq!(ev, PlayerEvent::StateChanged { playing: false });
    }

    #[test]
    fn track_preview_is_optional() {
        let t: TrackInfo = serde_json::from_str(r#"{"author":"a","title":"t"}"#).unwrap();
        assert_eq!(t.preview, None);
    }

    #[test]
    fn wire_names_are_stable() {
        assert_eq!(Command::ToggleHq.wire_name(), "toggleHQ");
        assert_eq!(Command::IncreaseVolume.wire_name(), "increaseVolume");
        assert_eq!(Command::Play.wire_name(), "play");
    }
}
