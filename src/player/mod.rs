pub mod session;
pub mod simulated;
pub mod traits;
pub mod types;

pub use session::{HostCallback, PlayerSession};
pub use simulated::{SimulatedFactory, SimulatedPlayer};
pub use traits::{NativePlayer, PlayerEvents, PlayerFactory};
pub use types::{
    OptionCategory, OptionValue, PlayerEvent, PlayerOption, PlayerState, SurfaceHandle,
};
