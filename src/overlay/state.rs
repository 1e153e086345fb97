/// Chrome visibility as the overlay sees it (top and bottom bar move together)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

/// Auto-hide countdown state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoHideCountdown {
    /// Seconds left before the chrome hides
    Remaining(u32),
    /// Frozen while the user drags the seek bar
    Suspended,
}

impl AutoHideCountdown {
    /// Zero is treated as one tick so the chrome still hides on the next tick
    pub fn reset(&mut self, seconds: u32) {
        *self = AutoHideCountdown::Remaining(seconds.max(1));
    }

    pub fn suspend(&mut self) {
        *self = AutoHideCountdown::Suspended;
    }

    /// Advance one tick. Returns true only on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        match self {
            AutoHideCountdown::Remaining(remaining) if *remaining > 0 => {
                *remaining -= 1;
                *remaining == 0
            }
            _ => false,
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        match self {
            AutoHideCountdown::Remaining(remaining) => Some(*remaining),
            AutoHideCountdown::Suspended => None,
        }
    }
}

/// State owned exclusively by the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayState {
    pub visibility: Visibility,
    /// True strictly between animation start and its completion signal
    pub transitioning: bool,
    pub countdown: AutoHideCountdown,
    pub seek_drag_active: bool,
    pub playing: bool,
    pub loading: bool,
    /// 0 means unknown length, seeking disabled
    pub duration_seconds: i32,
    pub fullscreen: bool,
}

impl OverlayState {
    pub fn new(auto_hide_seconds: u32) -> Self {
        Self {
            visibility: Visibility::Shown,
            transitioning: false,
            countdown: AutoHideCountdown::Remaining(auto_hide_seconds.max(1)),
            seek_drag_active: false,
            playing: false,
            loading: false,
            duration_seconds: 0,
            fullscreen: false,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    pub fn seekable(&self) -> bool {
        self.duration_seconds > 0
    }
}
