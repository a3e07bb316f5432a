//! Action registry.
//!
//! Registration happens on a [`RegistryBuilder`]. Building it yields an
//! immutable [`RegistrySnapshot`], and an [`ActionRegistry`] publishes
//! snapshots atomically: readers take the current `Arc` without locking and
//! keep using it for the whole dispatch, so a concurrent reload is never
//! observed half-applied.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use switchyard_core::InvocationMode;
use tracing::{debug, info, warn};

use crate::descriptor::{ActionDescriptor, SharedDescriptor};
use crate::error::{RegistrationError, RegistrationResult};
use crate::pattern::CompiledPattern;

/// Mutable registration phase.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<SharedDescriptor>,
    keys: HashSet<(String, InvocationMode, String)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one action.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::EmptyName`] if the name has no literal segment.
    /// - [`RegistrationError::Conflict`] if an action with the same name,
    ///   mode and segment type list is already registered. Overloads that
    ///   differ in arity, segment types or mode are not conflicts.
    pub fn register(&mut self, descriptor: ActionDescriptor) -> RegistrationResult<()> {
        if descriptor.pattern().is_empty() {
            return Err(RegistrationError::EmptyName(descriptor.name().to_string()));
        }

        let key = (
            descriptor.pattern().to_string(),
            descriptor.mode(),
            descriptor.signature(),
        );
        if self.keys.contains(&key) {
            warn!(
                action = %key.0,
                mode = %key.1,
                signature = %key.2,
                "Rejected duplicate action registration"
            );
            return Err(RegistrationError::Conflict {
                name: key.0,
                mode: key.1,
                signature: key.2,
            });
        }

        debug!(
            action = %key.0,
            mode = %key.1,
            signature = %key.2,
            controller = descriptor.controller(),
            "Registered action"
        );
        self.keys.insert(key);
        self.entries.push(Arc::new(descriptor));
        Ok(())
    }

    /// Adds every action, stopping at the first error.
    pub fn register_all<I>(&mut self, descriptors: I) -> RegistrationResult<()>
    where
        I: IntoIterator<Item = ActionDescriptor>,
    {
        descriptors
            .into_iter()
            .try_for_each(|descriptor| self.register(descriptor))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the registered actions into a snapshot.
    pub fn build(self) -> RegistrySnapshot {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (seq, descriptor) in self.entries.iter().enumerate() {
            if let Some(head) = descriptor.pattern().head() {
                index.entry(head.to_string()).or_default().push(seq);
            }
        }
        RegistrySnapshot {
            entries: self.entries,
            index,
        }
    }
}

/// One action whose literal prefix matched a request path.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub descriptor: SharedDescriptor,
    /// Trailing segments after the literal prefix.
    pub captures: Vec<String>,
    /// Registration order.
    pub seq: usize,
}

impl Candidate {
    pub fn specificity(&self) -> usize {
        self.descriptor.pattern().specificity()
    }
}

/// Immutable set of registered actions.
#[derive(Debug, Default)]
pub struct RegistrySnapshot {
    entries: Vec<SharedDescriptor>,
    index: HashMap<String, Vec<usize>>,
}

impl RegistrySnapshot {
    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every action whose literal prefix matches `path`, most specific first,
    /// then by descending priority, then in registration order.
    ///
    /// Mode is not considered here.
    pub fn resolve_candidates<S: AsRef<str>>(&self, path: &[S]) -> Vec<Candidate> {
        let Some(head) = path.first() else {
            return Vec::new();
        };
        let Some(slots) = self.index.get(head.as_ref()) else {
            return Vec::new();
        };

        let mut candidates: Vec<Candidate> = slots
            .iter()
            .filter_map(|&seq| {
                let descriptor = &self.entries[seq];
                descriptor
                    .pattern()
                    .match_path(path)
                    .map(|captures| Candidate {
                        descriptor: Arc::clone(descriptor),
                        captures,
                        seq,
                    })
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.specificity()
                .cmp(&a.specificity())
                .then_with(|| b.descriptor.priority().cmp(&a.descriptor.priority()))
                .then_with(|| a.seq.cmp(&b.seq))
        });
        candidates
    }

    /// All actions in registration order.
    pub fn actions(&self) -> impl Iterator<Item = &ActionDescriptor> {
        self.entries.iter().map(AsRef::as_ref)
    }

    /// Usage lines for every overload registered under exactly `name`.
    ///
    /// Returns `None` when no action has that name.
    pub fn help_for(&self, name: &str) -> Option<String> {
        let pattern = CompiledPattern::compile(name);
        let lines: Vec<String> = self
            .actions()
            .filter(|descriptor| descriptor.pattern() == &pattern)
            .map(ActionDescriptor::usage)
            .collect();
        (!lines.is_empty()).then(|| lines.join("\n"))
    }

    /// Usage lines for every action, in registration order.
    pub fn help(&self) -> String {
        self.actions()
            .map(ActionDescriptor::usage)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns `true` if any action is registered under exactly `name`.
    pub fn contains(&self, name: &str) -> bool {
        let pattern = CompiledPattern::compile(name);
        self.actions().any(|descriptor| descriptor.pattern() == &pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Publishes registry snapshots.
///
/// Reads go through [`load`](Self::load) and never block. Writers are
/// serialised, and each write replaces the whole snapshot.
pub struct ActionRegistry {
    current: ArcSwap<RegistrySnapshot>,
    generation: AtomicU64,
    write: Mutex<()>,
}

impl ActionRegistry {
    /// Creates a registry publishing an empty snapshot.
    pub fn new() -> Self {
        Self::with_snapshot(RegistrySnapshot::empty())
    }

    pub fn with_snapshot(snapshot: RegistrySnapshot) -> Self {
        Self {
            current: ArcSwap::new(Arc::new(snapshot)),
            generation: AtomicU64::new(0),
            write: Mutex::new(()),
        }
    }

    /// Returns the current snapshot.
    pub fn load(&self) -> Arc<RegistrySnapshot> {
        self.current.load_full()
    }

    /// Number of snapshots published since creation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Atomically replaces the current snapshot.
    pub fn publish(&self, snapshot: RegistrySnapshot) {
        let _guard = self.write.lock();
        let actions = snapshot.len();
        self.current.store(Arc::new(snapshot));
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(actions, generation, "Published action registry snapshot");
    }

    /// Builds a fresh snapshot with `register` and publishes it.
    ///
    /// Nothing is published if `register` fails; the previous snapshot stays
    /// current.
    pub fn reload<F>(&self, register: F) -> RegistrationResult<()>
    where
        F: FnOnce(&mut RegistryBuilder) -> RegistrationResult<()>,
    {
        let mut builder = RegistryBuilder::new();
        register(&mut builder)?;
        self.publish(builder.build());
        Ok(())
    }

    /// Publishes an empty snapshot.
    pub fn clear(&self) {
        self.publish(RegistrySnapshot::empty());
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.current.load().len())
            .field("generation", &self.generation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::action;

    async fn noop() {}

    async fn one(_id: i64) {}

    async fn text(_s: String) {}

    #[test]
    fn true_duplicates_conflict() {
        let mut builder = RegistryBuilder::new();
        builder.register(action("users").get().handler(one)).unwrap();
        let err = builder
            .register(action("users").get().handler(one))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::Conflict { ref name, .. } if name == "users"));
    }

    #[test]
    fn overloads_are_not_conflicts() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_all([
                action("users").get().handler(noop),
                action("users").get().handler(one),
                action("users").get().handler(text),
                action("users").post().handler(one),
            ])
            .unwrap();
        assert_eq!(builder.len(), 4);
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut builder = RegistryBuilder::new();
        assert_eq!(
            builder.register(action("/").handler(noop)),
            Err(RegistrationError::EmptyName("/".into()))
        );
    }

    #[test]
    fn candidates_are_ordered_by_specificity_then_priority() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_all([
                action("users").handler(one),
                action("users").priority(5).handler(text),
                action("users/admin").handler(noop),
                action("posts").handler(noop),
            ])
            .unwrap();
        let snapshot = builder.build();

        let candidates = snapshot.resolve_candidates(&["users", "admin"]);
        let order: Vec<_> = candidates
            .iter()
            .map(|c| (c.descriptor.name().to_string(), c.captures.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("users/admin".to_string(), vec![]),
                ("users".to_string(), vec!["admin".to_string()]),
                ("users".to_string(), vec!["admin".to_string()]),
            ]
        );
        assert_eq!(candidates[1].descriptor.priority(), 5);
        assert!(snapshot.resolve_candidates(&["nope"]).is_empty());
        assert!(snapshot.resolve_candidates::<&str>(&[]).is_empty());
    }

    #[test]
    fn help_lists_every_overload() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_all([
                action("say").cli().help("Echo").handler(noop),
                action("say").cli().params(["words"]).handler(text),
            ])
            .unwrap();
        let snapshot = builder.build();
        assert_eq!(
            snapshot.help_for("say").as_deref(),
            Some("say [CLI] Echo\nsay <words:String> [CLI]")
        );
        assert_eq!(snapshot.help_for("missing"), None);
        assert!(snapshot.contains("say"));
    }

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let registry = ActionRegistry::new();
        registry
            .reload(|b| b.register(action("a").handler(noop)))
            .unwrap();
        assert_eq!(registry.generation(), 1);

        let result = registry.reload(|b| {
            b.register(action("b").handler(noop))?;
            b.register(action("b").handler(noop))
        });
        assert!(result.is_err());
        assert!(registry.load().contains("a"));
        assert!(!registry.load().contains("b"));
        assert_eq!(registry.generation(), 1);
    }

    #[test]
    fn readers_keep_their_snapshot_across_publish() {
        let registry = ActionRegistry::new();
        registry
            .reload(|b| b.register(action("a").handler(noop)))
            .unwrap();
        let held = registry.load();
        registry.clear();
        assert!(held.contains("a"));
        assert!(registry.load().is_empty());
    }
}
