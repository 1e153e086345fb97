/// Common types shared by the session and player backends
use serde::{Deserialize, Serialize};

/// Lifecycle of the native player as tracked by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Uninitialized,
    SurfaceReady,
    SourceSet,
    Preparing,
    Prepared,
    Playing,
    Paused,
    Error,
    Released,
}

impl PlayerState {
    /// Past the `Prepared` milestone and able to take transport commands
    pub fn is_session_valid(self) -> bool {
        matches!(
            self,
            PlayerState::Prepared | PlayerState::Playing | PlayerState::Paused
        )
    }

    /// States with a live player, from which a player error moves the
    /// session to `Error`
    pub fn can_fail(self) -> bool {
        matches!(
            self,
            PlayerState::SourceSet
                | PlayerState::Preparing
                | PlayerState::Prepared
                | PlayerState::Playing
                | PlayerState::Paused
        )
    }

    /// States in which the buffering sub-state may be entered
    pub fn can_buffer(self) -> bool {
        matches!(
            self,
            PlayerState::Preparing | PlayerState::Playing | PlayerState::Paused
        )
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            PlayerState::Uninitialized => "uninitialized",
            PlayerState::SurfaceReady => "surface-ready",
            PlayerState::SourceSet => "source-set",
            PlayerState::Preparing => "preparing",
            PlayerState::Prepared => "prepared",
            PlayerState::Playing => "playing",
            PlayerState::Paused => "paused",
            PlayerState::Error => "error",
            PlayerState::Released => "released",
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::Uninitialized
    }
}

/// Asynchronous notifications from the native player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    Prepared,
    BufferingStart,
    BufferingEnd,
    /// Network buffer fill in percent
    BufferingUpdate(i32),
    SeekComplete,
    Error { what: i32, extra: i32 },
    VideoSizeChanged { width: i32, height: i32 },
    TimedText(String),
}

/// Opaque handle of a render surface the player can draw into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionCategory {
    Format,
    Codec,
    Sws,
    Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Int(i64),
    Str(String),
}

/// A decoder/transport option applied to every new player instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOption {
    pub category: OptionCategory,
    pub name: String,
    pub value: OptionValue,
}

impl PlayerOption {
    pub fn new(category: OptionCategory, name: &str, value: OptionValue) -> Self {
        Self {
            category,
            name: name.to_string(),
            value,
        }
    }
}
