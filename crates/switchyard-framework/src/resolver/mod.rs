//! Resolution: from a request to exactly one action plus its captures.
//!
//! The pipeline is literal-prefix matching in the registry snapshot, then the
//! [`mode`] filter, then [`overload`] selection. Resolution is pure: the
//! same snapshot and request always produce the same outcome.

pub mod mode;
pub mod overload;

use switchyard_core::{Failure, InvocationRequest};
use tracing::debug;

use crate::descriptor::SharedDescriptor;
use crate::registry::RegistrySnapshot;

/// The action chosen for a request.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub descriptor: SharedDescriptor,
    /// Captured trailing segments, bound positionally to the handler.
    pub captures: Vec<String>,
}

/// Resolves `request` against `snapshot`.
///
/// # Errors
///
/// - `NotFound` if no action's literal prefix matches.
/// - `ModeRejected` if prefixes matched but no action admits the observed mode.
/// - `MissingParameter`, `BindingTypeMismatch` or `AmbiguousMatch` from
///   overload selection.
pub fn resolve(
    snapshot: &RegistrySnapshot,
    request: &InvocationRequest,
    explain: bool,
) -> Result<Resolution, Failure> {
    let path = request.path();
    let matched = snapshot.resolve_candidates(&path);
    if matched.is_empty() {
        return Err(Failure::not_found(format!(
            "no action matches '{}'",
            path.join("/")
        )));
    }

    let observed = request.mode();
    let name = matched[0].descriptor.name().to_string();
    let admissible = mode::admissible(matched.clone(), observed);
    if admissible.is_empty() {
        return Err(mode::rejection(&name, observed, &matched));
    }

    let chosen = overload::select(&name, admissible, explain)?;
    debug!(
        action = chosen.descriptor.name(),
        mode = %observed,
        signature = %chosen.descriptor.signature(),
        captures = chosen.captures.len(),
        "Resolved action"
    );
    Ok(Resolution {
        descriptor: chosen.descriptor,
        captures: chosen.captures,
    })
}
