use futures::FutureExt;
use playback_overlay::coordinator::{RenderSurface, SurfaceLayout};
use playback_overlay::overlay::{OverlayPresentation, OverlayView, TransitionDone, Visibility};
use playback_overlay::player::{
    HostCallback, NativePlayer, PlayerEvents, PlayerFactory, PlayerOption, SurfaceHandle,
};
use playback_overlay::utils::PlayerError;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Everything the mock players were asked to do, across instances
#[derive(Default)]
pub struct PlayerLog {
    pub calls: Vec<String>,
    pub created: u64,
    pub events: Vec<PlayerEvents>,
    pub playing: bool,
    pub position_ms: i64,
    pub duration_ms: i64,
    pub fail_data_source: bool,
    pub fail_create: bool,
}

pub struct MockPlayer {
    log: Arc<Mutex<PlayerLog>>,
}

impl MockPlayer {
    fn record(&self, call: impl Into<String>) {
        self.log.lock().unwrap().calls.push(call.into());
    }
}

impl NativePlayer for MockPlayer {
    fn set_option(&mut self, option: &PlayerOption) {
        self.record(format!("option:{}", option.name));
    }

    fn set_data_source(&mut self, locator: &str) -> Result<(), PlayerError> {
        self.record(format!("source:{}", locator));
        if self.log.lock().unwrap().fail_data_source {
            return Err(PlayerError::DataSource {
                locator: locator.to_string(),
                reason: "unreachable".to_string(),
            });
        }
        Ok(())
    }

    fn set_display(&mut self, surface: Option<SurfaceHandle>) {
        self.record(format!("display:{:?}", surface.map(|s| s.0)));
    }

    fn prepare_async(&mut self) -> Result<(), PlayerError> {
        self.record("prepare");
        Ok(())
    }

    fn start(&mut self) {
        self.record("start");
        self.log.lock().unwrap().playing = true;
    }

    fn pause(&mut self) {
        self.record("pause");
        self.log.lock().unwrap().playing = false;
    }

    fn seek_to(&mut self, position_ms: i64) {
        self.record(format!("seek:{}", position_ms));
        self.log.lock().unwrap().position_ms = position_ms;
    }

    fn stop(&mut self) {
        self.record("stop");
        self.log.lock().unwrap().playing = false;
    }

    fn release(&mut self) {
        self.record("release");
    }

    fn is_playing(&self) -> bool {
        self.log.lock().unwrap().playing
    }

    fn current_position_ms(&self) -> i64 {
        self.log.lock().unwrap().position_ms
    }

    fn duration_ms(&self) -> i64 {
        self.log.lock().unwrap().duration_ms
    }
}

pub struct MockFactory {
    log: Arc<Mutex<PlayerLog>>,
}

impl MockFactory {
    pub fn new(log: Arc<Mutex<PlayerLog>>) -> Self {
        Self { log }
    }
}

impl PlayerFactory for MockFactory {
    fn create(&self, events: PlayerEvents) -> Result<Box<dyn NativePlayer>, PlayerError> {
        let mut log = self.log.lock().unwrap();
        if log.fail_create {
            return Err(PlayerError::Factory("decoder unavailable".to_string()));
        }
        log.created += 1;
        log.calls.push("create".to_string());
        log.playing = false;
        log.events.push(events);
        Ok(Box::new(MockPlayer {
            log: self.log.clone(),
        }))
    }
}

#[derive(Default)]
pub struct ViewLog {
    pub renders: Vec<OverlayPresentation>,
    pub animations: Vec<Visibility>,
}

impl ViewLog {
    pub fn last(&self) -> Option<&OverlayPresentation> {
        self.renders.last()
    }
}

pub struct MockView {
    log: Arc<Mutex<ViewLog>>,
}

impl MockView {
    pub fn new(log: Arc<Mutex<ViewLog>>) -> Self {
        Self { log }
    }
}

impl OverlayView for MockView {
    fn render(&mut self, presentation: &OverlayPresentation) {
        self.log.lock().unwrap().renders.push(presentation.clone());
    }

    fn animate_chrome(&mut self, target: Visibility, _duration: Duration) -> TransitionDone {
        self.log.lock().unwrap().animations.push(target);
        futures::future::ready(()).boxed()
    }
}

#[derive(Default)]
pub struct SurfaceLog {
    pub layouts: Vec<SurfaceLayout>,
    pub detached: u32,
}

pub struct MockSurface {
    log: Arc<Mutex<SurfaceLog>>,
}

impl MockSurface {
    pub fn new(log: Arc<Mutex<SurfaceLog>>) -> Self {
        Self { log }
    }
}

impl RenderSurface for MockSurface {
    fn handle(&self) -> SurfaceHandle {
        SurfaceHandle(42)
    }

    fn apply_layout(&mut self, layout: SurfaceLayout) {
        self.log.lock().unwrap().layouts.push(layout);
    }

    fn detach_observer(&mut self) {
        self.log.lock().unwrap().detached += 1;
    }
}

#[derive(Default)]
pub struct HostLog {
    pub backs: u32,
    pub full_screens: Vec<bool>,
    pub errors: Vec<PlayerError>,
}

pub struct MockHost {
    log: Arc<Mutex<HostLog>>,
}

impl MockHost {
    pub fn new(log: Arc<Mutex<HostLog>>) -> Self {
        Self { log }
    }
}

impl HostCallback for MockHost {
    fn on_back_click(&self) {
        self.log.lock().unwrap().backs += 1;
    }

    fn on_full_screen_click(&self, full_screen: bool) {
        self.log.lock().unwrap().full_screens.push(full_screen);
    }

    fn on_error(&self, error: &PlayerError) {
        self.log.lock().unwrap().errors.push(error.clone());
    }
}
