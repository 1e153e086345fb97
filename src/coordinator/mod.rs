//! Binds the native player to the render surface and to the overlay.

pub mod surface;

use std::rc::{Rc, Weak};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::config::Config;
use crate::overlay::{
    CommandSink, ControllerOverlay, Orientation, OverlayGesture, OverlayPresentation,
    OverlaySignal, OverlayState, OverlayView,
};
use crate::player::session::{HostCallback, PlayerSession};
use crate::player::traits::PlayerFactory;
use crate::player::types::{PlayerEvent, PlayerState};

pub use surface::{HostBounds, RenderSurface, SurfaceEvent, SurfaceLayout, fit_surface};

/// Point-in-time view of the whole playback core
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub player_state: PlayerState,
    pub buffering: bool,
    pub video_valid: bool,
    pub surface_ready: bool,
    pub locator: Option<String>,
    pub aspect_ratio: f32,
    pub layout: Option<SurfaceLayout>,
    pub overlay: OverlayState,
    pub presentation: OverlayPresentation,
    pub released: bool,
}

pub struct SurfaceCoordinator {
    config: Config,
    overlay: ControllerOverlay,
    session: Rc<PlayerSession>,
    surface: Option<Box<dyn RenderSurface>>,
    surface_ready: bool,
    locator: Option<String>,
    aspect_ratio: f32,
    host_bounds: Option<HostBounds>,
    relayout_pending: bool,
    layout: Option<SurfaceLayout>,
    released: bool,
}

impl SurfaceCoordinator {
    /// Build the coordinator and its overlay. Timer ticks and animation
    /// completions go to `overlay_signals`, native player events to
    /// `player_events`; the owner feeds both back in.
    pub fn new(
        config: Config,
        factory: Box<dyn PlayerFactory>,
        view: Box<dyn OverlayView>,
        surface: Box<dyn RenderSurface>,
        overlay_signals: mpsc::UnboundedSender<OverlaySignal>,
        player_events: mpsc::UnboundedSender<(u64, PlayerEvent)>,
    ) -> Self {
        let session = Rc::new(PlayerSession::new(factory, player_events));

        let mut overlay = ControllerOverlay::new(&config.overlay, view, overlay_signals);
        let sink: Weak<dyn CommandSink> = Rc::downgrade(&session) as Weak<dyn CommandSink>;
        overlay.set_callback(sink);
        overlay.set_loading(true);

        let aspect_ratio = config.playback.default_aspect_ratio;

        Self {
            config,
            overlay,
            session,
            surface: Some(surface),
            surface_ready: false,
            locator: None,
            aspect_ratio,
            host_bounds: None,
            relayout_pending: false,
            layout: None,
            released: false,
        }
    }

    pub fn set_host_callback(&self, host: Box<dyn HostCallback>) {
        self.session.set_host_callback(host);
    }

    /// Remember the locator, show the title, and load as soon as the surface
    /// is ready.
    pub fn set_source(&mut self, locator: &str, title: &str) {
        if self.released {
            return;
        }
        self.locator = Some(locator.to_string());
        self.overlay.set_title(title);
        self.try_load();
    }

    pub fn set_title(&mut self, title: &str) {
        if self.released {
            return;
        }
        self.overlay.set_title(title);
    }

    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        if self.released {
            trace!("Coordinator released, ignoring {:?}", event);
            return;
        }

        match event {
            SurfaceEvent::Created => {
                debug!("Render surface created");
                self.surface_ready = true;
                self.session.mark_surface_ready();
                self.try_load();
            }
            SurfaceEvent::Destroyed => {
                debug!("Render surface destroyed");
                self.surface_ready = false;
            }
            SurfaceEvent::Changed {
                format,
                width,
                height,
            } => {
                trace!("Render surface changed: {}x{} (format {})", width, height, format);
            }
        }
    }

    pub fn handle_player_event(&mut self, generation: u64, event: PlayerEvent) {
        if self.released {
            trace!("Coordinator released, ignoring {:?}", event);
            return;
        }
        if !self.session.is_current(generation) {
            trace!("Dropping {:?} from stale player #{}", event, generation);
            return;
        }

        match event {
            PlayerEvent::Prepared => {
                let autoplay = self.config.playback.autoplay;
                let duration = self.session.handle_prepared(autoplay);
                info!("Player prepared, duration {}s", duration);

                self.overlay.set_duration(duration);
                self.overlay.set_loading(false);
                if autoplay {
                    let force_show = self.config.overlay.autoplay_chrome.force_show();
                    self.overlay.set_playing_state(true, Some(force_show));
                } else {
                    self.overlay.set_playing_state(false, Some(true));
                }
            }
            PlayerEvent::BufferingStart => {
                debug!("Buffering started");
                self.session.handle_buffering(true);
                self.overlay.set_loading(true);
            }
            PlayerEvent::BufferingEnd => {
                debug!("Buffering finished");
                self.session.handle_buffering(false);
                self.overlay.set_loading(false);
            }
            PlayerEvent::BufferingUpdate(percent) => {
                trace!("Buffer fill {}%", percent);
            }
            PlayerEvent::SeekComplete => {
                debug!("Seek complete");
            }
            PlayerEvent::Error { what, extra } => {
                self.session.handle_error(what, extra);
                if self.session.state() == PlayerState::Error {
                    self.overlay.set_loading(false);
                }
            }
            PlayerEvent::VideoSizeChanged { width, height } => {
                if width <= 0 || height <= 0 {
                    debug!("Ignoring video size {}x{}", width, height);
                    return;
                }
                self.aspect_ratio = width as f32 / height as f32;
                debug!(
                    "Video size {}x{}, aspect ratio {:.3}",
                    width, height, self.aspect_ratio
                );
                self.resize();
            }
            PlayerEvent::TimedText(text) => {
                debug!("Timed text: {}", text);
            }
        }
    }

    pub fn handle_gesture(&mut self, gesture: OverlayGesture) {
        if self.released {
            return;
        }
        self.overlay.handle_gesture(gesture);
    }

    pub fn handle_overlay_signal(&mut self, signal: OverlaySignal) {
        self.overlay.handle_signal(signal);
    }

    /// The overlay picks up the new fullscreen flag now; the surface is
    /// refitted on the next host layout pass.
    pub fn on_orientation_changed(&mut self, orientation: Orientation) {
        if self.released {
            return;
        }
        self.overlay.on_orientation_changed(orientation);
        self.relayout_pending = true;
    }

    pub fn on_host_layout(&mut self, bounds: HostBounds) {
        if self.released {
            return;
        }
        self.host_bounds = Some(bounds);
        if self.relayout_pending {
            self.relayout_pending = false;
            self.resize();
        }
    }

    /// Release the overlay, detach from the surface, then stop and release
    /// the player. Safe to call more than once.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        self.overlay.release();
        if let Some(mut surface) = self.surface.take() {
            surface.detach_observer();
        }
        self.surface_ready = false;
        self.session.release();
        info!("Playback coordinator released");
    }

    pub fn overlay(&self) -> &ControllerOverlay {
        &self.overlay
    }

    pub fn session(&self) -> &PlayerSession {
        &self.session
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            player_state: self.session.state(),
            buffering: self.session.is_buffering(),
            video_valid: self.session.video_valid(),
            surface_ready: self.surface_ready,
            locator: self.locator.clone(),
            aspect_ratio: self.aspect_ratio,
            layout: self.layout,
            overlay: self.overlay.state().clone(),
            presentation: self.overlay.presentation().clone(),
            released: self.released,
        }
    }

    fn try_load(&mut self) {
        if !self.surface_ready {
            debug!("Surface not ready, deferring load");
            return;
        }
        let Some(locator) = self.locator.clone().filter(|l| !l.is_empty()) else {
            return;
        };
        let Some(handle) = self.surface.as_ref().map(|s| s.handle()) else {
            return;
        };

        self.overlay.set_loading(true);
        let options = self.config.playback.effective_player_options();
        if let Err(e) = self.session.open(&locator, handle, &options) {
            warn!("Failed to load {}: {}", locator, e);
            self.overlay.set_loading(false);
        }
    }

    fn resize(&mut self) {
        let Some(bounds) = self.host_bounds else {
            // Fit once the host reports its size
            self.relayout_pending = true;
            return;
        };
        let Some(layout) = fit_surface(bounds, self.aspect_ratio) else {
            return;
        };
        if let Some(surface) = self.surface.as_mut() {
            surface.apply_layout(layout);
        }
        self.layout = Some(layout);
        trace!("Surface laid out at {:?}", layout);
    }
}
