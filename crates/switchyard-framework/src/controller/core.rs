use std::borrow::Cow;

use crate::descriptor::ActionDescriptor;
use crate::error::RegistrationResult;
use crate::registry::RegistryBuilder;

/// Static metadata describing a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerMetadata {
    pub version: &'static str,
    /// One-line description shown in listings.
    pub desc: &'static str,
    /// Long description, taken from doc comments when not given explicitly.
    pub full_desc: Option<&'static str>,
}

/// A live controller: a name plus the actions it owns.
pub struct Controller {
    name: Cow<'static, str>,
    actions: Vec<ActionDescriptor>,
    metadata: ControllerMetadata,
}

impl Controller {
    /// Creates an empty controller; add actions with [`action`](Self::action).
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
            metadata: ControllerMetadata {
                version: "0.0.0",
                desc: "",
                full_desc: None,
            },
        }
    }

    /// Adds one action.
    pub fn action(mut self, descriptor: ActionDescriptor) -> Self {
        self.actions.push(descriptor);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> ControllerMetadata {
        self.metadata
    }

    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.actions
    }

    /// Registers every action, recording this controller as their owner.
    pub fn register_into(self, builder: &mut RegistryBuilder) -> RegistrationResult<()> {
        let name = self.name;
        builder.register_all(self.actions.into_iter().map(|mut descriptor| {
            descriptor.set_controller(&name);
            descriptor
        }))
    }

    #[doc(hidden)]
    pub fn __new(
        name: &'static str,
        actions: Vec<ActionDescriptor>,
        metadata: ControllerMetadata,
    ) -> Self {
        Controller {
            name: Cow::Borrowed(name),
            actions,
            metadata,
        }
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .field("metadata", &self.metadata)
            .finish()
    }
}
