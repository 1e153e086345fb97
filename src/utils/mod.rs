pub mod errors;
pub mod format;

pub use errors::PlayerError;
pub use format::{UNKNOWN_TIME, format_seconds};
