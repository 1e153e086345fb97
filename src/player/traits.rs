use tokio::sync::mpsc;

use super::types::{PlayerEvent, PlayerOption, SurfaceHandle};
use crate::utils::PlayerError;

/// The native decoder/renderer. Lives on the owner task; its own threads
/// report back through [`PlayerEvents`].
pub trait NativePlayer {
    fn set_option(&mut self, option: &PlayerOption);
    fn set_data_source(&mut self, locator: &str) -> Result<(), PlayerError>;
    fn set_display(&mut self, surface: Option<SurfaceHandle>);
    fn prepare_async(&mut self) -> Result<(), PlayerError>;
    fn start(&mut self);
    fn pause(&mut self);
    fn seek_to(&mut self, position_ms: i64);
    fn stop(&mut self);
    fn release(&mut self);
    fn is_playing(&self) -> bool;
    fn current_position_ms(&self) -> i64;
    fn duration_ms(&self) -> i64;
}

/// Builds a fresh native player for every load attempt
pub trait PlayerFactory {
    fn create(&self, events: PlayerEvents) -> Result<Box<dyn NativePlayer>, PlayerError>;
}

/// Event emitter handed to a native player. Safe to move to the player's
/// own threads. Every event is tagged with the player's generation so events
/// from a torn-down instance can be discarded.
#[derive(Debug, Clone)]
pub struct PlayerEvents {
    generation: u64,
    sender: mpsc::UnboundedSender<(u64, PlayerEvent)>,
}

impl PlayerEvents {
    pub fn new(generation: u64, sender: mpsc::UnboundedSender<(u64, PlayerEvent)>) -> Self {
        Self { generation, sender }
    }

    /// Returns false once the owner loop has gone away
    pub fn emit(&self, event: PlayerEvent) -> bool {
        self.sender.send((self.generation, event)).is_ok()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
