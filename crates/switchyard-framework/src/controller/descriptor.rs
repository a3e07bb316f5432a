//! Controller descriptor: the static, `Copy` handle to a controller.

use super::core::{Controller, ControllerMetadata};

/// A static descriptor that names and instantiates a controller.
///
/// Produced by [`define_controller!`](crate::define_controller) and listed in
/// a [`Manifest`](super::Manifest).
#[derive(Debug, Clone, Copy)]
pub struct ControllerDescriptor {
    /// Controller name; also the key used by configuration filters.
    pub name: &'static str,

    /// Factory creating the live controller with fresh action descriptors.
    pub create: fn() -> Controller,

    pub metadata: ControllerMetadata,
}

impl ControllerDescriptor {
    /// Creates the live controller.
    #[inline]
    pub fn instantiate(&self) -> Controller {
        (self.create)()
    }

    #[inline]
    pub fn metadata(&self) -> ControllerMetadata {
        self.metadata
    }
}
