use crate::container::autowiring::{Arguments, Constructible, Instance};
use crate::errors::{ContainerError, LookupError};

/// A single constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name, used in error messages only
    pub name: String,
    /// Identifier resolved through the container for this slot
    pub declared_type: Option<String>,
    /// Whether the parameter has no default value
    pub required: bool,
}

impl Parameter {
    /// Required parameter resolved through the container
    pub fn typed(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(declared_type.into()),
            required: true,
        }
    }

    /// Parameter the container has no identifier for
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            required: true,
        }
    }

    /// Mark the parameter as having a default value
    pub fn with_default(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Constructor signature of a constructible type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constructor {
    parameters: Vec<Parameter>,
}

impl Constructor {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self { parameters }
    }

    /// Parameters in declaration order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Number of parameters without a default value
    pub fn required_count(&self) -> usize {
        self.parameters.iter().filter(|p| p.required).count()
    }
}

/// Whether a described type can be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Concrete,
    /// Interface-like name with no implementation of its own
    Abstract,
}

/// Type-erased constructor of a concrete type
pub type BuildFn = fn(&mut Arguments) -> Result<Instance, ContainerError>;

/// Metadata about a constructible type, rebuilt on every resolution
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    constructor: Option<Constructor>,
    build: Option<BuildFn>,
}

impl std::fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("constructor", &self.constructor)
            .field("build", &self.build.map(|_| "<build_fn>"))
            .finish()
    }
}

impl TypeDescriptor {
    /// Describe a concrete constructible type
    pub fn of<T: Constructible>() -> Self {
        Self {
            name: T::TYPE_NAME.to_string(),
            kind: TypeKind::Concrete,
            constructor: T::constructor(),
            build: Some(build_erased::<T>),
        }
    }

    /// Describe an interface-like name that cannot be built
    pub fn abstract_type(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Abstract,
            constructor: None,
            build: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    /// Constructor parameters, empty when there is no constructor
    pub fn parameters(&self) -> &[Parameter] {
        self.constructor
            .as_ref()
            .map(Constructor::parameters)
            .unwrap_or(&[])
    }

    /// True when no argument has to be injected to build the type
    pub fn is_default_constructible(&self) -> bool {
        self.constructor
            .as_ref()
            .map_or(true, |c| c.required_count() == 0)
    }

    /// Whether the type can be built at all; dependencies are not checked
    pub fn is_instantiable(&self) -> bool {
        self.kind == TypeKind::Concrete && self.build.is_some()
    }

    /// Invoke the constructor with the assembled arguments
    pub fn build(&self, args: &mut Arguments) -> Result<Instance, ContainerError> {
        match self.build {
            Some(build) if self.kind == TypeKind::Concrete => build(args),
            _ => Err(ContainerError::NotInstantiable {
                type_name: self.name.clone(),
            }),
        }
    }
}

fn build_erased<T: Constructible>(args: &mut Arguments) -> Result<Instance, ContainerError> {
    T::construct(args).map(|value| Box::new(value) as Instance)
}

/// Reject names that can never denote a type
pub fn validate_type_name(name: &str) -> Result<(), LookupError> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(LookupError::Malformed(name.to_string()));
    }
    Ok(())
}
