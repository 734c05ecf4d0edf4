// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod phrase;
pub mod runtime;
pub mod score;
pub mod session;
pub mod time_source;
pub mod ui;
pub mod vocabulary;

pub use error::{Error, Result};
pub use phrase::generate_phrase;
