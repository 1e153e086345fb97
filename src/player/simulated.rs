use std::time::{Duration, Instant};
use tracing::{debug, trace};

use super::traits::{NativePlayer, PlayerEvents, PlayerFactory};
use super::types::{PlayerEvent, PlayerOption, SurfaceHandle};
use crate::overlay::timer::spawn_on_runtime;
use crate::utils::PlayerError;

/// In-process stand-in for a native decoder. Reports `Prepared` and the
/// frame size after a short delay and advances its clock in real time.
pub struct SimulatedPlayer {
    events: PlayerEvents,
    duration: Duration,
    video_size: (i32, i32),
    prepare_delay: Duration,
    locator: Option<String>,
    surface: Option<SurfaceHandle>,
    position: Duration,
    playing_since: Option<Instant>,
    released: bool,
}

impl SimulatedPlayer {
    pub fn new(events: PlayerEvents, duration: Duration, video_size: (i32, i32)) -> Self {
        Self {
            events,
            duration,
            video_size,
            prepare_delay: Duration::from_millis(300),
            locator: None,
            surface: None,
            position: Duration::ZERO,
            playing_since: None,
            released: false,
        }
    }

    fn position(&self) -> Duration {
        let elapsed = self
            .playing_since
            .map(|since| since.elapsed())
            .unwrap_or_default();
        (self.position + elapsed).min(self.duration)
    }
}

impl NativePlayer for SimulatedPlayer {
    fn set_option(&mut self, option: &PlayerOption) {
        trace!("Simulated option {:?} {} = {:?}", option.category, option.name, option.value);
    }

    fn set_data_source(&mut self, locator: &str) -> Result<(), PlayerError> {
        if locator.trim().is_empty() {
            return Err(PlayerError::DataSource {
                locator: locator.to_string(),
                reason: "empty locator".to_string(),
            });
        }
        self.locator = Some(locator.to_string());
        Ok(())
    }

    fn set_display(&mut self, surface: Option<SurfaceHandle>) {
        self.surface = surface;
    }

    fn prepare_async(&mut self) -> Result<(), PlayerError> {
        if self.released || self.locator.is_none() {
            return Err(PlayerError::Prepare("no data source".to_string()));
        }

        let events = self.events.clone();
        let delay = self.prepare_delay;
        let (width, height) = self.video_size;
        let spawned = spawn_on_runtime(async move {
            events.emit(PlayerEvent::BufferingStart);
            tokio::time::sleep(delay).await;
            events.emit(PlayerEvent::BufferingEnd);
            events.emit(PlayerEvent::Prepared);
            events.emit(PlayerEvent::VideoSizeChanged { width, height });
        });
        if !spawned {
            return Err(PlayerError::Prepare("no runtime to prepare on".to_string()));
        }
        debug!("Simulated player #{} preparing", self.events.generation());
        Ok(())
    }

    fn start(&mut self) {
        if self.playing_since.is_none() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.position = self.position();
        self.playing_since = None;
    }

    fn seek_to(&mut self, position_ms: i64) {
        let target = Duration::from_millis(position_ms.max(0) as u64).min(self.duration);
        self.position = target;
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
        self.events.emit(PlayerEvent::SeekComplete);
    }

    fn stop(&mut self) {
        self.pause();
        self.position = Duration::ZERO;
    }

    fn release(&mut self) {
        self.released = true;
        self.surface = None;
        self.playing_since = None;
    }

    fn is_playing(&self) -> bool {
        self.playing_since.is_some()
    }

    fn current_position_ms(&self) -> i64 {
        self.position().as_millis() as i64
    }

    fn duration_ms(&self) -> i64 {
        self.duration.as_millis() as i64
    }
}

/// Builds [`SimulatedPlayer`]s of a fixed length and frame size
#[derive(Debug, Clone)]
pub struct SimulatedFactory {
    pub duration: Duration,
    pub video_size: (i32, i32),
}

impl Default for SimulatedFactory {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(95),
            video_size: (1280, 720),
        }
    }
}

impl PlayerFactory for SimulatedFactory {
    fn create(&self, events: PlayerEvents) -> Result<Box<dyn NativePlayer>, PlayerError> {
        Ok(Box::new(SimulatedPlayer::new(
            events,
            self.duration,
            self.video_size,
        )))
    }
}
