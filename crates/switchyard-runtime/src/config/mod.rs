//! Configuration for Switchyard applications.
//!
//! Layered loading through figment, the schema, and validation.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    ControllersConfig, DispatchConfig, LogFormat, LogLevel, LogOutput, LogRotation,
    LoggingConfig, SpanEventConfig, SwitchyardConfig,
};
pub use validation::validate_config;
