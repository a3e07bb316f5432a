//! Mode resolver: keeps the candidates whose declared mode admits the
//! observed one.

use std::collections::BTreeSet;

use switchyard_core::{Failure, InvocationMode};

use crate::registry::Candidate;

/// Filters `candidates` down to those admissible for `observed`.
///
/// An action declared with [`InvocationMode::Any`] admits every observed
/// mode; any other declaration admits only itself.
pub fn admissible(candidates: Vec<Candidate>, observed: InvocationMode) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.descriptor.mode().admits(observed))
        .collect()
}

/// Builds the failure for a name that matched but whose actions all
/// rejected the observed mode.
pub fn rejection(name: &str, observed: InvocationMode, candidates: &[Candidate]) -> Failure {
    let accepted: BTreeSet<&'static str> = candidates
        .iter()
        .map(|candidate| candidate.descriptor.mode().as_str())
        .collect();
    Failure::mode_rejected(format!(
        "action '{name}' does not accept {observed} (accepts {})",
        accepted.into_iter().collect::<Vec<_>>().join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::action;
    use crate::registry::RegistryBuilder;

    async fn list() {}

    #[test]
    fn filters_by_declared_mode() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_all([
                action("users").get().handler(list),
                action("users")
                    .mode(InvocationMode::Any)
                    .params(["x"])
                    .handler(|_x: String| async {}),
            ])
            .unwrap();
        let snapshot = builder.build();

        let post = admissible(snapshot.resolve_candidates(&["users"]), InvocationMode::Post);
        assert_eq!(post.len(), 1);
        assert_eq!(post[0].descriptor.mode(), InvocationMode::Any);

        let get = admissible(snapshot.resolve_candidates(&["users"]), InvocationMode::Get);
        assert_eq!(get.len(), 2);
    }

    #[test]
    fn rejection_names_accepted_modes() {
        let mut builder = RegistryBuilder::new();
        builder.register(action("users").get().handler(list)).unwrap();
        let candidates = builder.build().resolve_candidates(&["users"]);
        let failure = rejection("users", InvocationMode::Post, &candidates);
        assert_eq!(
            failure.detail(),
            "action 'users' does not accept POST (accepts GET)"
        );
    }
}
