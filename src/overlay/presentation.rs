use futures::future::BoxFuture;
use std::time::Duration;

use super::state::Visibility;
use crate::utils::UNKNOWN_TIME;

/// Completion signal of a chrome animation, resolved by the host toolkit
pub type TransitionDone = BoxFuture<'static, ()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullScreenIcon {
    Enter,
    Exit,
}

/// Everything the host draws for the overlay, pushed on every change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayPresentation {
    pub title: String,
    /// `None` hides the duration label
    pub duration_label: Option<String>,
    pub progress_label: String,
    pub seek_visible: bool,
    pub seek_max: i32,
    pub seek_value: i32,
    pub center_button_visible: bool,
    pub spinner_visible: bool,
    pub play_icon: PlayIcon,
    pub fullscreen_icon: FullScreenIcon,
    pub back_button_enabled: bool,
    pub fullscreen_button_enabled: bool,
}

impl OverlayPresentation {
    pub fn new(back_button_enabled: bool, fullscreen_button_enabled: bool) -> Self {
        Self {
            title: String::new(),
            duration_label: Some(UNKNOWN_TIME.to_string()),
            progress_label: UNKNOWN_TIME.to_string(),
            seek_visible: true,
            seek_max: 0,
            seek_value: 0,
            center_button_visible: false,
            spinner_visible: false,
            play_icon: PlayIcon::Play,
            fullscreen_icon: FullScreenIcon::Enter,
            back_button_enabled,
            fullscreen_button_enabled,
        }
    }
}

/// Drawing side of the overlay, implemented by the host UI toolkit.
pub trait OverlayView {
    fn render(&mut self, presentation: &OverlayPresentation);

    /// Slide the top and bottom bars on or off screen over `duration`.
    /// The returned future resolves when the animation has finished.
    fn animate_chrome(&mut self, target: Visibility, duration: Duration) -> TransitionDone;
}
