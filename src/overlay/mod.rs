//! Transport-control overlay.
//!
//! [`ControllerOverlay`] owns the chrome visibility state machine, the
//! auto-hide countdown and the seek-bar drag window. It never touches the
//! player directly: every transport command goes through the registered
//! [`CommandSink`], and everything it draws goes through [`OverlayView`].
//!
//! All methods run on the owner task. The timer task and animation
//! completions only send [`OverlaySignal`]s, which the owner feeds back in
//! through [`ControllerOverlay::handle_signal`].

pub mod presentation;
pub mod sink;
pub mod state;
pub mod timer;

use std::rc::{Rc, Weak};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::OverlayConfig;
use crate::utils::format_seconds;

pub use presentation::{FullScreenIcon, OverlayPresentation, OverlayView, PlayIcon, TransitionDone};
pub use sink::CommandSink;
pub use state::{AutoHideCountdown, OverlayState, Visibility};
pub use timer::OverlaySignal;

/// User input on the overlay, already decoded by the host toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayGesture {
    /// Big play button in the middle of the surface
    CenterButton,
    /// Single tap on the surface area
    SingleTap,
    /// Double tap on the surface area
    DoubleTap,
    PlayPauseButton,
    FullScreenButton,
    BackButton,
    SeekStart,
    SeekMove(i32),
    SeekEnd(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

pub struct ControllerOverlay {
    state: OverlayState,
    presentation: OverlayPresentation,
    rendered: Option<OverlayPresentation>,
    config: OverlayConfig,
    view: Box<dyn OverlayView>,
    sink: Option<Weak<dyn CommandSink>>,
    signals: mpsc::UnboundedSender<OverlaySignal>,
    timer: CancellationToken,
    transition_id: u64,
    released: bool,
}

impl ControllerOverlay {
    /// Create the overlay with its timer already running. Ticks and
    /// animation completions are delivered through `signals`.
    pub fn new(
        config: &OverlayConfig,
        view: Box<dyn OverlayView>,
        signals: mpsc::UnboundedSender<OverlaySignal>,
    ) -> Self {
        let timer = CancellationToken::new();
        timer::spawn_ticker(config.tick_interval(), signals.clone(), timer.clone());

        let mut overlay = Self {
            state: OverlayState::new(config.auto_hide_seconds),
            presentation: OverlayPresentation::new(
                config.show_back_button,
                config.show_fullscreen_button,
            ),
            rendered: None,
            config: config.clone(),
            view,
            sink: None,
            signals,
            timer,
            transition_id: 0,
            released: false,
        };
        overlay.sync_center();
        overlay.render();
        overlay
    }

    /// Register the command sink, replacing any previous one
    pub fn set_callback(&mut self, sink: Weak<dyn CommandSink>) {
        self.sink = Some(sink);
    }

    pub fn set_title(&mut self, title: &str) {
        self.presentation.title = title.to_string();
        self.render();
    }

    /// Set the media length. Zero or negative hides the duration label and
    /// the seek bar and disables seeking.
    pub fn set_duration(&mut self, seconds: i32) {
        self.state.duration_seconds = seconds.max(0);
        if seconds <= 0 {
            self.presentation.duration_label = None;
            self.presentation.seek_visible = false;
            self.presentation.seek_max = 0;
        } else {
            self.presentation.duration_label = Some(format_seconds(seconds));
            self.presentation.seek_visible = true;
            self.presentation.seek_max = seconds;
        }
        self.render();
    }

    /// Update the play/pause state. An explicit `force_show` decides the
    /// chrome visibility; otherwise playing hides it and pausing shows it.
    pub fn set_playing_state(&mut self, playing: bool, force_show: Option<bool>) {
        self.state.playing = playing;
        self.presentation.play_icon = if playing {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        };
        self.sync_center();

        match force_show {
            Some(true) => self.show(),
            Some(false) => self.hide(),
            None if playing => self.hide(),
            None => self.show(),
        }
        self.render();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.state.loading = loading;
        self.presentation.spinner_visible = loading;
        self.sync_center();
        self.render();
    }

    /// Recompute the fullscreen flag from the new orientation. Only the icon
    /// changes.
    pub fn on_orientation_changed(&mut self, orientation: Orientation) {
        self.state.fullscreen = orientation == Orientation::Landscape;
        self.presentation.fullscreen_icon = if self.state.fullscreen {
            FullScreenIcon::Exit
        } else {
            FullScreenIcon::Enter
        };
        self.render();
    }

    pub fn handle_gesture(&mut self, gesture: OverlayGesture) {
        if self.released {
            trace!("Overlay released, ignoring {:?}", gesture);
            return;
        }

        match gesture {
            OverlayGesture::CenterButton => self.start_or_pause(true, Some(true)),
            OverlayGesture::SingleTap => {
                if self.state.is_shown() {
                    self.hide();
                    self.reset_countdown();
                } else {
                    self.show();
                }
            }
            OverlayGesture::DoubleTap | OverlayGesture::PlayPauseButton => {
                self.start_or_pause(!self.state.playing, None)
            }
            OverlayGesture::FullScreenButton => {
                if self.presentation.fullscreen_button_enabled
                    && let Some(sink) = self.sink()
                {
                    sink.full_screen(!self.state.fullscreen);
                }
            }
            OverlayGesture::BackButton => {
                if self.presentation.back_button_enabled
                    && let Some(sink) = self.sink()
                {
                    sink.back();
                }
            }
            OverlayGesture::SeekStart => self.begin_seek_drag(),
            OverlayGesture::SeekMove(value) => self.update_seek_drag(value),
            OverlayGesture::SeekEnd(value) => self.end_seek_drag(value),
        }
        self.render();
    }

    /// Feed a timer tick or animation completion back in on the owner task.
    /// No-op after [`release`](Self::release).
    pub fn handle_signal(&mut self, signal: OverlaySignal) {
        if self.released {
            trace!("Overlay released, dropping {:?}", signal);
            return;
        }

        match signal {
            OverlaySignal::Tick => self.on_tick(),
            OverlaySignal::TransitionFinished(id) => {
                if id == self.transition_id && self.state.transitioning {
                    self.state.transitioning = false;
                    trace!("Chrome transition {} finished", id);
                }
            }
        }
        self.render();
    }

    /// Stop the timer for good. Safe to call more than once.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.timer.cancel();
        debug!("Overlay released");
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn presentation(&self) -> &OverlayPresentation {
        &self.presentation
    }

    fn on_tick(&mut self) {
        // Never disturb an active drag
        if self.state.seek_drag_active {
            return;
        }

        if self.state.countdown.tick() && self.state.playing {
            debug!("Auto-hide countdown elapsed");
            self.hide();
        }

        if !self.state.playing {
            return;
        }
        let Some(sink) = self.sink() else {
            return;
        };
        if !sink.video_valid() {
            return;
        }
        let progress = sink.get_progress();
        self.presentation.progress_label = format_seconds(progress);
        self.presentation.seek_value = progress.max(0);
    }

    fn start_or_pause(&mut self, start: bool, force_show: Option<bool>) {
        let Some(sink) = self.sink() else {
            trace!("No command sink registered");
            return;
        };
        if !sink.video_valid() {
            trace!("Session not valid, dropping start/pause");
            return;
        }
        if self.state.loading {
            trace!("Loading, dropping start/pause");
            return;
        }

        self.set_playing_state(start, force_show);
        if start {
            sink.start();
        } else {
            sink.pause();
        }
        self.reset_countdown();
    }

    fn begin_seek_drag(&mut self) {
        if !self.state.seekable() {
            trace!("Duration unknown, seeking disabled");
            return;
        }
        self.state.seek_drag_active = true;
        self.state.countdown.suspend();
    }

    fn update_seek_drag(&mut self, value: i32) {
        if !self.state.seek_drag_active {
            return;
        }
        let value = self.clamp_seek(value);
        self.presentation.seek_value = value;
        self.presentation.progress_label = format_seconds(value);
    }

    fn end_seek_drag(&mut self, value: i32) {
        if !self.state.seek_drag_active {
            return;
        }
        let value = self.clamp_seek(value);
        self.presentation.seek_value = value;
        self.presentation.progress_label = format_seconds(value);

        if let Some(sink) = self.sink()
            && sink.video_valid()
        {
            debug!("Seeking to {}s", value);
            sink.seek(value);
        }
        self.state.seek_drag_active = false;
        self.reset_countdown();
    }

    fn clamp_seek(&self, value: i32) -> i32 {
        value.clamp(0, self.state.duration_seconds)
    }

    fn show(&mut self) {
        self.reset_countdown();
        if self.state.is_shown() || self.state.transitioning {
            return;
        }
        self.state.visibility = Visibility::Shown;
        self.begin_transition(Visibility::Shown);
    }

    fn hide(&mut self) {
        if !self.state.is_shown() || self.state.transitioning {
            return;
        }
        self.state.visibility = Visibility::Hidden;
        self.begin_transition(Visibility::Hidden);
    }

    fn begin_transition(&mut self, target: Visibility) {
        self.transition_id += 1;
        self.state.transitioning = true;

        let id = self.transition_id;
        let done = self
            .view
            .animate_chrome(target, self.config.transition_duration());
        let signals = self.signals.clone();
        let spawned = timer::spawn_on_runtime(async move {
            done.await;
            let _ = signals.send(OverlaySignal::TransitionFinished(id));
        });
        if !spawned {
            self.state.transitioning = false;
        }
        trace!("Chrome transition {} to {:?} started", id, target);
    }

    fn reset_countdown(&mut self) {
        self.state.countdown.reset(self.config.auto_hide_seconds);
    }

    fn sync_center(&mut self) {
        self.presentation.center_button_visible = !self.state.loading && !self.state.playing;
    }

    fn sink(&self) -> Option<Rc<dyn CommandSink>> {
        self.sink.as_ref().and_then(Weak::upgrade)
    }

    fn render(&mut self) {
        if self.rendered.as_ref() == Some(&self.presentation) {
            return;
        }
        self.view.render(&self.presentation);
        self.rendered = Some(self.presentation.clone());
    }
}

impl Drop for ControllerOverlay {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}
