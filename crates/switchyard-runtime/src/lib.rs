//! Switchyard Runtime - host plumbing around the dispatch engine.
//!
//! This crate provides:
//! - Layered configuration (`switchyard.toml`, profiles, `SWITCHYARD_*` variables)
//! - Logging setup driven by that configuration
//! - The [`Application`] lifecycle: explicit start, reload and stop
//! - Command-line and HTTP front-end adapters
//!
//! ```rust,no_run
//! use switchyard_runtime::Application;
//! # use switchyard_framework::{ControllerDescriptor, action, define_controller};
//! # async fn ping() {}
//! # static PING: ControllerDescriptor = define_controller! {
//! #     name: "ping",
//! #     actions: [action("ping").handler(ping)],
//! # };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = Application::builder()
//!         .profile("production")
//!         .controller(PING)
//!         .with_logging()
//!         .build()?;
//!
//!     // Serves until Ctrl+C; a host front end would call `app.dispatcher()`.
//!     app.run().await?;
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod config;
pub mod error;
pub mod frontend;
pub mod logging;

pub use application::{Application, ApplicationBuilder, LifecycleState};
pub use config::{ConfigError, ConfigLoader, ConfigResult, SwitchyardConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use frontend::{FrontendError, FrontendResult};
pub use logging::LoggingBuilder;

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Logging macros for application code.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
