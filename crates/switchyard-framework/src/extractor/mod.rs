//! Parameter binding.
//!
//! Every handler parameter type implements [`FromInvocation`]. The trait
//! serves two purposes:
//!
//! - [`FromInvocation::kind`] tells the registry, at build time, whether the
//!   parameter consumes a positional segment (and of which type) or is
//!   infrastructure supplied by the [`Context`](crate::Context).
//! - [`FromInvocation::from_invocation`] performs the actual binding from a
//!   [`BindCursor`] after resolution has selected an action.
//!
//! Segment types are bound in declaration order from the captured trailing
//! segments. Infrastructure types never consume a segment. Binding is
//! all-or-nothing: the handler does not start unless every parameter bound
//! and no segment was left over.

pub mod core;
pub mod infra;
pub mod segment;

pub use self::core::{BindCursor, FromInvocation};
pub use infra::{Attributes, State};
