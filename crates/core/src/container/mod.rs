#[allow(clippy::module_inception)]
pub mod container;
pub mod autowiring;
pub mod binding;
pub mod descriptor;
pub mod locator;
pub mod registry;
pub mod resolver;

pub use container::Container;
pub use autowiring::{Arguments, Constructible, Instance};
pub use binding::{Binding, FactoryFn};
pub use descriptor::{BuildFn, Constructor, Parameter, TypeDescriptor, TypeKind};
pub use locator::ServiceLocator;
pub use registry::TypeCatalog;
pub use resolver::ResolutionPath;
