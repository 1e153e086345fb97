use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Player factory failed: {0}")]
    Factory(String),

    #[error("Invalid data source {locator}: {reason}")]
    DataSource { locator: String, reason: String },

    #[error("Preparation failed: {0}")]
    Prepare(String),

    #[error("Native player error (what: {what}, extra: {extra})")]
    Native { what: i32, extra: i32 },
}
