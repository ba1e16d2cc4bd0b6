//! # Configuration Management
//!
//! Application settings loaded once from environment variables, plus the
//! process-wide [`RuntimeContext`] that drives credential resolution.

mod settings;

pub use settings::{
    AppConfig, ObservabilityConfig, RuntimeContext, RuntimeMode, ServerConfig, StoreConfig,
};
