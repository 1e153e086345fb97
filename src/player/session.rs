use std::cell::{Cell, RefCell};
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};

use super::traits::{NativePlayer, PlayerEvents, PlayerFactory};
use super::types::{PlayerEvent, PlayerOption, PlayerState, SurfaceHandle};
use crate::constants::UNKNOWN_PROGRESS;
use crate::overlay::CommandSink;
use crate::utils::PlayerError;

/// Callbacks into the embedding application
pub trait HostCallback {
    fn on_back_click(&self);
    fn on_full_screen_click(&self, full_screen: bool);
    fn on_error(&self, _error: &PlayerError) {}
}

/// Owns the single native player instance and its state machine, and serves
/// as the overlay's command sink.
pub struct PlayerSession {
    factory: Box<dyn PlayerFactory>,
    events: mpsc::UnboundedSender<(u64, PlayerEvent)>,
    player: RefCell<Option<Box<dyn NativePlayer>>>,
    state: Cell<PlayerState>,
    buffering: Cell<bool>,
    generation: Cell<u64>,
    host: RefCell<Option<Box<dyn HostCallback>>>,
}

impl PlayerSession {
    pub fn new(
        factory: Box<dyn PlayerFactory>,
        events: mpsc::UnboundedSender<(u64, PlayerEvent)>,
    ) -> Self {
        Self {
            factory,
            events,
            player: RefCell::new(None),
            state: Cell::new(PlayerState::Uninitialized),
            buffering: Cell::new(false),
            generation: Cell::new(0),
            host: RefCell::new(None),
        }
    }

    pub fn set_host_callback(&self, host: Box<dyn HostCallback>) {
        *self.host.borrow_mut() = Some(host);
    }

    pub fn state(&self) -> PlayerState {
        self.state.get()
    }

    pub fn is_buffering(&self) -> bool {
        self.buffering.get()
    }

    pub fn has_player(&self) -> bool {
        self.player.borrow().is_some()
    }

    /// Whether an event tagged with `generation` comes from the live player
    pub fn is_current(&self, generation: u64) -> bool {
        self.has_player() && generation == self.generation.get()
    }

    pub(crate) fn mark_surface_ready(&self) {
        if self.state.get() == PlayerState::Uninitialized {
            self.state.set(PlayerState::SurfaceReady);
        }
    }

    /// Replace any existing player with a fresh one bound to `surface` and
    /// start preparing `locator`. Failures are logged, reported to the host
    /// and leave the session able to accept another source.
    pub fn open(
        &self,
        locator: &str,
        surface: SurfaceHandle,
        options: &[PlayerOption],
    ) -> Result<(), PlayerError> {
        if self.state.get() == PlayerState::Released {
            return Ok(());
        }
        self.teardown();

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.buffering.set(false);

        let events = PlayerEvents::new(generation, self.events.clone());
        let mut player = match self.factory.create(events) {
            Ok(player) => player,
            Err(e) => return self.fail(e),
        };
        for option in options {
            player.set_option(option);
        }

        let result = player.set_data_source(locator).and_then(|_| {
            self.state.set(PlayerState::SourceSet);
            player.set_display(Some(surface));
            player.prepare_async()
        });
        *self.player.borrow_mut() = Some(player);

        match result {
            Ok(()) => {
                self.state.set(PlayerState::Preparing);
                info!("Preparing {} (player #{})", locator, generation);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Returns the media length in whole seconds
    pub(crate) fn handle_prepared(&self, autoplay: bool) -> i32 {
        self.state.set(if autoplay {
            PlayerState::Playing
        } else {
            PlayerState::Prepared
        });

        let mut player = self.player.borrow_mut();
        let Some(player) = player.as_mut() else {
            return 0;
        };
        // Backends that ignore start-on-prepared need a nudge
        if autoplay && !player.is_playing() {
            debug!("Starting player #{} after prepare", self.generation.get());
            player.start();
        }
        ms_to_seconds(player.duration_ms())
    }

    pub(crate) fn handle_buffering(&self, buffering: bool) {
        if buffering && !self.state.get().can_buffer() {
            trace!("Buffering start in {} state", self.state.get().to_string());
        }
        self.buffering.set(buffering);
    }

    pub(crate) fn handle_error(&self, what: i32, extra: i32) {
        let error = PlayerError::Native { what, extra };
        if self.state.get().can_fail() {
            let _ = self.fail(error);
        } else {
            warn!(
                "Ignoring player error in {} state: {}",
                self.state.get().to_string(),
                error
            );
        }
    }

    /// Stop, detach and release the current player, then refuse further
    /// work. Safe to call repeatedly.
    pub fn release(&self) {
        if self.state.get() == PlayerState::Released {
            return;
        }
        self.teardown();
        self.state.set(PlayerState::Released);
        debug!("Player session released");
    }

    fn teardown(&self) {
        if let Some(mut player) = self.player.borrow_mut().take() {
            player.stop();
            player.set_display(None);
            player.release();
            debug!("Released player #{}", self.generation.get());
        }
    }

    fn fail(&self, error: PlayerError) -> Result<(), PlayerError> {
        error!("Player error: {}", error);
        self.state.set(PlayerState::Error);
        self.buffering.set(false);
        if let Some(host) = self.host.borrow().as_ref() {
            host.on_error(&error);
        }
        Err(error)
    }

    fn with_valid_player(&self, command: &str, f: impl FnOnce(&mut dyn NativePlayer)) {
        if !self.video_valid() {
            trace!("Session not valid, dropping {}", command);
            return;
        }
        if let Some(player) = self.player.borrow_mut().as_mut() {
            f(&mut **player);
        }
    }
}

impl CommandSink for PlayerSession {
    fn back(&self) {
        if let Some(host) = self.host.borrow().as_ref() {
            host.on_back_click();
        }
    }

    fn start(&self) {
        let mut started = false;
        self.with_valid_player("start", |player| {
            if !player.is_playing() {
                player.start();
                started = true;
            }
        });
        if started {
            self.state.set(PlayerState::Playing);
        }
    }

    fn pause(&self) {
        let mut paused = false;
        self.with_valid_player("pause", |player| {
            if player.is_playing() {
                player.pause();
                paused = true;
            }
        });
        if paused {
            self.state.set(PlayerState::Paused);
        }
    }

    fn seek(&self, seconds: i32) {
        self.with_valid_player("seek", |player| {
            player.seek_to(i64::from(seconds) * 1000);
        });
    }

    fn full_screen(&self, full_screen: bool) {
        if let Some(host) = self.host.borrow().as_ref() {
            host.on_full_screen_click(full_screen);
        }
    }

    fn get_progress(&self) -> i32 {
        self.player
            .borrow()
            .as_ref()
            .map(|player| ms_to_seconds(player.current_position_ms()))
            .unwrap_or(UNKNOWN_PROGRESS)
    }

    fn video_valid(&self) -> bool {
        self.has_player() && self.state.get().is_session_valid()
    }
}

fn ms_to_seconds(ms: i64) -> i32 {
    (ms / 1000).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
