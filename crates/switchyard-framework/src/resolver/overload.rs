//! Overload resolver.
//!
//! Picks exactly one action from the mode-admissible candidates. Candidates
//! are grouped by literal-prefix specificity and the most specific group is
//! tried first. Within a group:
//!
//! 1. The preferred arity is the largest arity not exceeding the number of
//!    captured segments. A preferred arity below the capture count leaves
//!    segments unconsumed, which is a binding mismatch. No arity at all
//!    means a required segment is missing.
//! 2. Candidates of the preferred arity whose segment types reject a capture
//!    are eliminated.
//! 3. Among survivors the strictly highest explicit priority wins. A tie is
//!    ambiguous, never resolved by declaration order.
//!
//! A group that fails with a binding mismatch or a missing segment defers to
//! the next less specific group; if every group fails, the most specific
//! group's failure is reported. Ambiguity is final.

use switchyard_core::{Failure, FailureKind};
use tracing::trace;

use crate::registry::Candidate;

/// Selects one candidate.
///
/// `candidates` must be non-empty and ordered as returned by
/// [`RegistrySnapshot::resolve_candidates`](crate::RegistrySnapshot::resolve_candidates).
/// With `explain` set, failure details list the overloads considered.
pub fn select(name: &str, candidates: Vec<Candidate>, explain: bool) -> Result<Candidate, Failure> {
    let mut first_failure: Option<Failure> = None;
    let mut rest = candidates;

    while !rest.is_empty() {
        let specificity = rest[0].specificity();
        let split = rest
            .iter()
            .position(|c| c.specificity() != specificity)
            .unwrap_or(rest.len());
        let tail = rest.split_off(split);
        let group = rest;
        rest = tail;

        match select_in_group(name, group, explain) {
            Ok(candidate) => return Ok(candidate),
            Err(failure) if failure.kind() == FailureKind::AmbiguousMatch => return Err(failure),
            Err(failure) => {
                trace!(specificity, %failure, "Overload group failed");
                if first_failure.is_none() {
                    first_failure = Some(failure);
                }
            }
        }
    }

    Err(first_failure.unwrap_or_else(|| Failure::not_found(format!("no action matches '{name}'"))))
}

fn select_in_group(name: &str, group: Vec<Candidate>, explain: bool) -> Result<Candidate, Failure> {
    let supplied = group.first().map_or(0, |c| c.captures.len());

    let preferred = group
        .iter()
        .map(|c| c.descriptor.arity())
        .filter(|&arity| arity <= supplied)
        .max();

    let Some(arity) = preferred else {
        return Err(missing_segment(name, &group, supplied, explain));
    };

    if arity < supplied {
        let unconsumed = &group[0].captures[arity..];
        return Err(with_overloads(
            Failure::type_mismatch(format!(
                "{} unconsumed argument(s) for '{name}': {}",
                unconsumed.len(),
                unconsumed.join(" ")
            )),
            &group,
            explain,
        ));
    }

    let (shaped, _): (Vec<Candidate>, Vec<Candidate>) =
        group.into_iter().partition(|c| c.descriptor.arity() == arity);

    let first_rejection = shaped.first().and_then(rejected_segment);
    let survivors: Vec<Candidate> = shaped
        .iter()
        .filter(|c| rejected_segment(c).is_none())
        .cloned()
        .collect();

    if survivors.is_empty() {
        let detail = match first_rejection {
            Some((value, expected)) => {
                format!("argument '{value}' of '{name}' is not a valid {expected}")
            }
            None => format!("arguments of '{name}' do not match any overload"),
        };
        return Err(with_overloads(Failure::type_mismatch(detail), &shaped, explain));
    }

    let top = survivors
        .iter()
        .map(|c| c.descriptor.priority())
        .max()
        .unwrap_or_default();
    let mut winners: Vec<Candidate> = survivors
        .into_iter()
        .filter(|c| c.descriptor.priority() == top)
        .collect();

    if winners.len() == 1 {
        let winner = winners.remove(0);
        trace!(
            action = winner.descriptor.name(),
            signature = %winner.descriptor.signature(),
            "Overload selected"
        );
        return Ok(winner);
    }

    let tied = winners
        .iter()
        .map(|c| c.descriptor.usage())
        .collect::<Vec<_>>()
        .join("; ");
    Err(Failure::ambiguous(format!(
        "{} overloads of '{name}' accept the same arguments: {tied}",
        winners.len()
    )))
}

/// Returns the first capture the candidate's segment types reject.
fn rejected_segment(candidate: &Candidate) -> Option<(String, &'static str)> {
    candidate
        .descriptor
        .segment_params()
        .zip(&candidate.captures)
        .find(|((_, ty), value)| !(ty.accepts)(value))
        .map(|((_, ty), value)| (value.clone(), ty.name))
}

fn missing_segment(name: &str, group: &[Candidate], supplied: usize, explain: bool) -> Failure {
    let nearest = group.iter().min_by_key(|c| c.descriptor.arity());
    let detail = match nearest.and_then(|c| c.descriptor.segment_params().nth(supplied)) {
        Some((param, ty)) => format!("missing parameter '{param}' ({}) for '{name}'", ty.name),
        None => format!("missing parameter for '{name}'"),
    };
    with_overloads(Failure::missing_parameter(detail), group, explain)
}

fn with_overloads(failure: Failure, group: &[Candidate], explain: bool) -> Failure {
    if !explain || group.is_empty() {
        return failure;
    }
    let overloads = group
        .iter()
        .map(|c| c.descriptor.usage())
        .collect::<Vec<_>>()
        .join("; ");
    Failure::new(
        failure.kind(),
        format!("{} (candidates: {overloads})", failure.detail()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ActionDescriptor, action};
    use crate::registry::RegistryBuilder;

    async fn zero() {}
    async fn int(_id: i64) {}
    async fn text(_s: String) {}
    async fn two(_a: String, _b: String) {}

    fn select_for(descriptors: Vec<ActionDescriptor>, path: &[&str]) -> Result<Candidate, Failure> {
        let mut builder = RegistryBuilder::new();
        builder.register_all(descriptors).unwrap();
        let candidates = builder.build().resolve_candidates(path);
        select(path[0], candidates, false)
    }

    #[test]
    fn arity_picks_the_matching_overload() {
        let chosen = select_for(
            vec![action("say").handler(zero), action("say").handler(text)],
            &["say", "Hello"],
        )
        .unwrap();
        assert_eq!(chosen.descriptor.arity(), 1);

        let chosen = select_for(
            vec![action("say").handler(zero), action("say").handler(text)],
            &["say"],
        )
        .unwrap();
        assert_eq!(chosen.descriptor.arity(), 0);
    }

    #[test]
    fn extra_arguments_are_a_mismatch() {
        let failure = select_for(
            vec![action("say").handler(zero), action("say").handler(text)],
            &["say", "a", "b", "c"],
        )
        .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::BindingTypeMismatch);
        assert!(failure.detail().contains("2 unconsumed"));
    }

    #[test]
    fn too_few_arguments_name_the_first_unbound_parameter() {
        let failure = select_for(
            vec![action("pair").params(["left", "right"]).handler(two)],
            &["pair", "x"],
        )
        .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::MissingParameter);
        assert!(failure.detail().contains("'right'"));
    }

    #[test]
    fn types_eliminate_candidates() {
        let chosen = select_for(
            vec![action("users").handler(int), action("users").handler(zero)],
            &["users", "42"],
        )
        .unwrap();
        assert_eq!(chosen.descriptor.signature(), "Integer");

        let failure = select_for(
            vec![action("users").handler(int), action("users").handler(zero)],
            &["users", "abc"],
        )
        .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::BindingTypeMismatch);
        assert!(failure.detail().contains("'abc'"));
    }

    #[test]
    fn string_and_integer_at_same_arity_are_ambiguous() {
        let failure = select_for(
            vec![action("find").handler(text), action("find").handler(int)],
            &["find", "42"],
        )
        .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::AmbiguousMatch);

        // Only the String overload accepts a non-numeric segment.
        let chosen = select_for(
            vec![action("find").handler(text), action("find").handler(int)],
            &["find", "bob"],
        )
        .unwrap();
        assert_eq!(chosen.descriptor.signature(), "String");
    }

    #[test]
    fn explicit_priority_breaks_ties() {
        let chosen = select_for(
            vec![
                action("find").handler(text),
                action("find").priority(1).handler(int),
            ],
            &["find", "42"],
        )
        .unwrap();
        assert_eq!(chosen.descriptor.signature(), "Integer");
    }

    #[test]
    fn more_specific_prefix_wins() {
        let chosen = select_for(
            vec![action("users").handler(text), action("users/admin").handler(zero)],
            &["users", "admin"],
        )
        .unwrap();
        assert_eq!(chosen.descriptor.name(), "users/admin");
    }

    #[test]
    fn failing_specific_group_falls_through() {
        let chosen = select_for(
            vec![action("users").handler(two), action("users/admin").handler(zero)],
            &["users", "admin", "x"],
        )
        .unwrap();
        assert_eq!(chosen.descriptor.name(), "users");

        let failure = select_for(
            vec![action("users").handler(int), action("users/admin").handler(zero)],
            &["users", "admin", "x"],
        )
        .unwrap_err();
        assert!(failure.detail().contains("unconsumed"));
    }

    #[test]
    fn explain_lists_candidates() {
        let mut builder = RegistryBuilder::new();
        builder
            .register(action("users").params(["id"]).handler(int))
            .unwrap();
        let candidates = builder.build().resolve_candidates(&["users", "abc"]);
        let failure = select("users", candidates, true).unwrap_err();
        assert!(failure.detail().contains("candidates: users <id:Integer> [ANY]"));
    }
}
