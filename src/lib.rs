// Embeddable playback core: transport-control overlay plus player/surface
// coordination. Hosts supply the view, render surface and native player.

pub mod config;
pub mod constants;
pub mod controller;
pub mod coordinator;
pub mod overlay;
pub mod player;
pub mod utils;

pub use config::Config;
pub use controller::{PlaybackCommand, PlaybackController, PlaybackHandle};
pub use coordinator::{PlaybackSnapshot, SurfaceCoordinator};
pub use overlay::ControllerOverlay;
