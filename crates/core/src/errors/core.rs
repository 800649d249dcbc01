use thiserror::Error;

/// Boxed cause carried by container errors
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Core error type for the kiln container
///
/// `NotFound` is the "not found" capability; every other variant is a
/// general container failure.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Service not found: {id}")]
    NotFound {
        id: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Circular dependency detected: {path} (cycle at: {cycle_service})")]
    CircularDependency { path: String, cycle_service: String },

    #[error("Type '{type_name}' is not instantiable")]
    NotInstantiable { type_name: String },

    #[error("Cannot resolve parameter '{parameter}' of '{type_name}': it has no declared type")]
    UnresolvableParameter { type_name: String, parameter: String },

    #[error("Constructor argument {position} is not a '{expected}'")]
    ArgumentMismatch { position: usize, expected: &'static str },

    #[error("Constructor argument {position} ('{expected}') was not supplied")]
    MissingArgument { position: usize, expected: &'static str },

    #[error("Factory for '{id}' failed: {message}")]
    Factory {
        id: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Resolved value for '{id}' is not a '{expected}'")]
    TypeMismatch { id: String, expected: &'static str },

    #[error("Global container is already initialized")]
    AlreadyInitialized,

    #[error("Container error: {message}")]
    Failure {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl ContainerError {
    /// Create a new not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            id: id.into(),
            source: None,
        }
    }

    /// Create a new not found error wrapping the lookup failure
    pub fn not_found_with_source(id: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::NotFound {
            id: id.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new factory error
    pub fn factory(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Factory {
            id: id.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a new general container failure
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new general container failure with source
    pub fn failure_with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Failure {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Check if the error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error is a circular dependency error
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "SERVICE_NOT_FOUND",
            Self::CircularDependency { .. } => "CIRCULAR_DEPENDENCY",
            Self::NotInstantiable { .. } => "NOT_INSTANTIABLE",
            Self::UnresolvableParameter { .. } => "UNRESOLVABLE_PARAMETER",
            Self::ArgumentMismatch { .. } => "ARGUMENT_MISMATCH",
            Self::MissingArgument { .. } => "MISSING_ARGUMENT",
            Self::Factory { .. } => "FACTORY_FAILED",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::Failure { .. } => "CONTAINER_ERROR",
        }
    }

    /// Human-readable message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Failure to produce a type descriptor for a name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Type name '{0}' is malformed")]
    Malformed(String),

    #[error("Type '{0}' does not exist")]
    Unknown(String),
}
