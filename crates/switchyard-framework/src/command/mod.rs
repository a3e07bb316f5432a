//! Command-line helpers (requires the `command` feature).
//!
//! Front ends that receive a whole command line as one string (a REPL, a
//! chat bridge, a test harness) split it here before building an
//! [`InvocationRequest`](switchyard_core::InvocationRequest).

pub mod split;

pub use split::{SplitError, shell_split};
