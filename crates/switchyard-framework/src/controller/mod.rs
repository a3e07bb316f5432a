//! Controllers: named groups of actions, declared statically and registered
//! through an explicit [`Manifest`].
//!
//! A controller is the unit configuration enables or disables. Its actions
//! are created fresh each time the registry is (re)built, so a reload never
//! shares handler state with the snapshot it replaces.
//!
//! ```rust,ignore
//! use switchyard_framework::prelude::*;
//!
//! /// Echo commands.
//! pub static GREETER: ControllerDescriptor = define_controller! {
//!     name: "greeter",
//!     actions: [
//!         action("say").cli().handler(say),
//!         action("say").cli().params(["words"]).handler(say_words),
//!     ],
//! };
//!
//! let manifest = Manifest::new().with(GREETER);
//! let snapshot = manifest.build_snapshot(|_| true)?;
//! ```

pub mod core;
pub mod descriptor;
pub mod macros;
pub mod manifest;

pub use self::core::{Controller, ControllerMetadata};
pub use descriptor::ControllerDescriptor;
pub use manifest::Manifest;
