// Timing and layout defaults for the overlay and the player session.
// Config values fall back to these.

// === Overlay chrome ===
/// Seconds of inactivity before the chrome auto-hides
pub const AUTO_HIDE_SECONDS: u32 = 3;
/// Period of the auto-hide/progress timer
pub const TICK_INTERVAL_MS: u64 = 1000;
/// Duration of the top/bottom bar slide animation
pub const CHROME_TRANSITION_MS: u64 = 250;

// === Player session ===
/// Aspect ratio assumed until the player reports a frame size
pub const DEFAULT_ASPECT_RATIO: f32 = 16.0 / 9.0;
/// `get_progress` result when no player exists
pub const UNKNOWN_PROGRESS: i32 = -1;
/// SDL fourcc for planar YV12 output
pub const FOURCC_YV12: u32 =
    (b'Y' as u32) | ((b'V' as u32) << 8) | ((b'1' as u32) << 16) | ((b'2' as u32) << 24);
