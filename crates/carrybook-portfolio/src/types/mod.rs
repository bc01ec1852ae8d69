//! Portfolio configuration types.

mod config;

pub use config::EngineConfig;
