use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Hour outside 1..=12 or minute not a multiple of five in 0..=55
    #[error("invalid time {hour}:{minute:02} (hour must be 1-12, minute a multiple of 5 in 0-55)")]
    InvalidTime { hour: u8, minute: u8 },

    #[error("cannot parse time {0:?}, expected H:MM")]
    ParseTime(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("history database error: {0}")]
    History(#[from] rusqlite::Error),
}
