//! The explicit registration list.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{RegistrationError, RegistrationResult};
use crate::registry::{RegistryBuilder, RegistrySnapshot};

use super::descriptor::ControllerDescriptor;

/// An ordered list of controllers an application may serve.
///
/// Order is registration order, which only matters for the stable ordering
/// of listings; resolution never depends on it.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    controllers: Vec<ControllerDescriptor>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a controller (builder pattern).
    pub fn with(mut self, controller: ControllerDescriptor) -> Self {
        self.controllers.push(controller);
        self
    }

    pub fn add(&mut self, controller: ControllerDescriptor) {
        self.controllers.push(controller);
    }

    pub fn controllers(&self) -> &[ControllerDescriptor] {
        &self.controllers
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.controllers.iter().map(|c| c.name)
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Instantiates every controller accepted by `filter` and registers its
    /// actions into `builder`.
    ///
    /// Returns the names of the registered controllers.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::DuplicateController`] if two listed controllers
    ///   share a name.
    /// - Any error from registering an action.
    pub fn register_into<F>(
        &self,
        builder: &mut RegistryBuilder,
        filter: F,
    ) -> RegistrationResult<Vec<&'static str>>
    where
        F: Fn(&ControllerDescriptor) -> bool,
    {
        let mut seen = HashSet::new();
        let mut registered = Vec::new();

        for descriptor in &self.controllers {
            if !seen.insert(descriptor.name) {
                return Err(RegistrationError::DuplicateController(
                    descriptor.name.to_string(),
                ));
            }
            if !filter(descriptor) {
                debug!(controller = descriptor.name, "Controller skipped by filter");
                continue;
            }
            descriptor.instantiate().register_into(builder)?;
            registered.push(descriptor.name);
        }

        info!(
            controllers = registered.len(),
            actions = builder.len(),
            "Registered controllers"
        );
        Ok(registered)
    }

    /// Builds a complete snapshot from the controllers accepted by `filter`.
    pub fn build_snapshot<F>(&self, filter: F) -> RegistrationResult<RegistrySnapshot>
    where
        F: Fn(&ControllerDescriptor) -> bool,
    {
        let mut builder = RegistryBuilder::new();
        self.register_into(&mut builder, filter)?;
        Ok(builder.build())
    }
}
