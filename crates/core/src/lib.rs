//! # kiln-core
//!
//! String-keyed dependency injection container. Identifiers resolve through
//! factory bindings, alias bindings, or the catalog of constructible types,
//! whose constructor parameters are injected recursively.

pub mod config;
pub mod container;
pub mod errors;
pub mod global;

pub use config::{ConfigError, ContainerConfig, UntypedParameterPolicy};
pub use container::{
    Arguments, Binding, Constructible, Constructor, Container, Instance, Parameter,
    ServiceLocator, TypeDescriptor,
};
pub use errors::{ContainerError, LookupError};
pub use global::{dependency, dependency_as, dependency_exists};

#[cfg(feature = "derive")]
pub use kiln_core_derive::constructible;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get crate version
pub fn version() -> &'static str {
    VERSION
}
