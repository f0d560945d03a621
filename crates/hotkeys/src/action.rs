//! The fixed set of shortcut-triggerable player actions.

use std::fmt;

use prefs::KeyboardBindings;
use wavetray_protocol::Command;

/// A player command a global shortcut can trigger. Each action owns exactly
/// one slot in the `keyboard` preferences domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Play,
    Next,
    Like,
    Dislike,
    Mute,
    IncreaseVolume,
    DecreaseVolume,
}

impl Action {
    /// All actions, in the fixed order reconciliation walks them.
    pub const ALL: [Self; 7] = [
        Self::Play,
        Self::Next,
        Self::Like,
        Self::Dislike,
        Self::Mute,
        Self::IncreaseVolume,
        Self::DecreaseVolume,
    ];

    /// Key of this action within the `keyboard` preferences domain.
    pub fn pref_key(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Next => "next",
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Mute => "mute",
            Self::IncreaseVolume => "increaseVolume",
            Self::DecreaseVolume => "decreaseVolume",
        }
    }

    /// Dotted store path of this action's combo.
    pub fn pref_path(self) -> String {
        format!("keyboard.{}", self.pref_key())
    }

    /// The combo configured for this action in `bindings`.
    pub fn combo_in(self, bindings: &KeyboardBindings) -> &str {
        match self {
            Self::Play => &bindings.play,
            Self::Next => &bindings.next,
            Self::Like => &bindings.like,
            Self::Dislike => &bindings.dislike,
            Self::Mute => &bindings.mute,
            Self::IncreaseVolume => &bindings.increase_volume,
            Self::DecreaseVolume => &bindings.decrease_volume,
        }
    }
}

impl From<Action> for Command {
    fn from(action: Action) -> Self {
        match action {
            Action::Play => Self::Play,
            Action::Next => Self::Next,
            Action::Like => Self::Like,
            Action::Dislike => Self::Dislike,
            Action::Mute => Self::Mute,
            Action::IncreaseVolume => Self::IncreaseVolume,
            Action::DecreaseVolume => Self::DecreaseVolume,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pref_key())
    }
}
