//! Process-wide container and the convenience functions built on it.
//!
//! Call [`init`] once at startup to install a configured container. If it
//! is never called, [`instance`] lazily creates an empty one.

use std::any::Any;
use std::sync::OnceLock;

use crate::container::{Container, Instance};
use crate::errors::ContainerError;

static GLOBAL_CONTAINER: OnceLock<Container> = OnceLock::new();

/// Install `container` as the process-wide instance
pub fn init(container: Container) -> Result<&'static Container, ContainerError> {
    GLOBAL_CONTAINER
        .set(container)
        .map_err(|_| ContainerError::AlreadyInitialized)?;
    tracing::info!("Global container initialized");
    Ok(instance())
}

/// The process-wide container, created empty on first access
pub fn instance() -> &'static Container {
    GLOBAL_CONTAINER.get_or_init(|| {
        tracing::debug!("Creating empty global container");
        Container::new()
    })
}

/// Resolve `name` through the global container
pub fn dependency(name: &str) -> Result<Instance, ContainerError> {
    instance().get(name)
}

/// Resolve `name` through the global container as a `T`
pub fn dependency_as<T: Any>(name: &str) -> Result<T, ContainerError> {
    instance().get_as(name)
}

/// Check `name` against the global container; never fails
pub fn dependency_exists(name: &str) -> bool {
    instance().has(name)
}
