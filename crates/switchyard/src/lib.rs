//! # Switchyard
//!
//! Declare an action once and reach it from a command line or an HTTP
//! request alike.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐  InvocationRequest  ┌────────────┐   snapshot   ┌──────────────────┐
//! │ CLI / HTTP │────────────────────▶│ Dispatcher │─────────────▶│ Action registry  │
//! │ front end  │◀────────────────────│            │              │ (controllers)    │
//! └────────────┘  InvocationResult   └────────────┘              └──────────────────┘
//! ```
//!
//! - **Front ends** normalize their input into an `InvocationRequest`
//! - **Dispatcher** resolves the name, checks the mode, picks one overload,
//!   binds parameters and runs the handler
//! - **Controllers** group actions and are listed in a `Manifest`
//! - **Application** owns the registry lifecycle and configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use switchyard::prelude::*;
//!
//! async fn say(ctx: Context) -> ActionResult<String> {
//!     Ok(ctx.require("words")?.to_string())
//! }
//!
//! async fn say_words(words: String) -> String {
//!     words
//! }
//!
//! static GREETER: ControllerDescriptor = define_controller! {
//!     name: "greeter",
//!     actions: [
//!         action("say").cli().handler(say),
//!         action("say").cli().params(["words"]).handler(say_words),
//!     ],
//! };
//!
//! let app = Application::builder()
//!     .config(SwitchyardConfig::default())
//!     .controller(GREETER)
//!     .build()
//!     .unwrap();
//! app.start().unwrap();
//!
//! let request = cli::request_from_args(["say", "Hello"]).unwrap();
//! let result = tokio_test::block_on(app.dispatch(request));
//! assert_eq!(result.payload(), Some(&Payload::Text("Hello".into())));
//! ```
//!
//! ## Features
//!
//! - `command` *(default)*: shell-style splitting for whole command lines
//! - `toml-config` *(default)* / `yaml-config`: configuration file formats
//! - `json-log`: JSON log output

pub use switchyard_core as core;
pub use switchyard_framework as framework;
pub use switchyard_runtime as runtime;

/// Common imports for building an application.
pub mod prelude {
    pub use switchyard_framework::prelude::*;

    pub use switchyard_runtime::frontend::{cli, http};
    pub use switchyard_runtime::{Application, SwitchyardConfig};
}
