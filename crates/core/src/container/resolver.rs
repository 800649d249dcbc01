use crate::errors::ContainerError;

/// Identifiers currently being resolved within one `get` chain
#[derive(Debug, Clone, Default)]
pub struct ResolutionPath {
    services: Vec<String>,
}

impl ResolutionPath {
    /// Create a new resolution path
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `id`, failing if it is already in progress
    pub fn enter(&mut self, id: &str) -> Result<(), ContainerError> {
        if self.contains(id) {
            self.services.push(id.to_string());
            let path = self.path_string();
            self.services.pop();
            return Err(ContainerError::CircularDependency {
                path,
                cycle_service: id.to_string(),
            });
        }
        self.services.push(id.to_string());
        Ok(())
    }

    /// Leave the most recently entered identifier
    pub fn leave(&mut self) -> Option<String> {
        self.services.pop()
    }

    /// Check if the path contains a service (for cycle detection)
    pub fn contains(&self, id: &str) -> bool {
        self.services.iter().any(|s| s == id)
    }

    pub fn depth(&self) -> usize {
        self.services.len()
    }

    /// Get the path as a string for error messages
    pub fn path_string(&self) -> String {
        self.services.join(" -> ")
    }
}
