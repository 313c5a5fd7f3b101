pub mod config;
pub mod error;
pub mod feed;
pub mod storage;
pub mod sync;

pub use config::AppConfig;
pub use error::{Error, Result};
