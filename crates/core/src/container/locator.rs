use crate::container::autowiring::Instance;
use crate::container::Container;
use crate::errors::ContainerError;

/// Minimal lookup contract shared with other container implementations
///
/// Unlike the generic resolver traits this one is object safe, so
/// consumers can hold a `&dyn ServiceLocator`.
pub trait ServiceLocator: Send + Sync {
    /// Resolve `id`, failing with `NotFound` when nothing matches
    fn get(&self, id: &str) -> Result<Instance, ContainerError>;

    /// Check whether `id` resolves; never fails
    fn has(&self, id: &str) -> bool;
}

impl ServiceLocator for Container {
    fn get(&self, id: &str) -> Result<Instance, ContainerError> {
        Container::get(self, id)
    }

    fn has(&self, id: &str) -> bool {
        Container::has(self, id)
    }
}
