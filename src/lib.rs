pub mod classify;
pub mod client;
pub mod config;
pub mod cost;
pub mod error;
pub mod llm;
pub mod server;

pub use error::{Error, Result};
