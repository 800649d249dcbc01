use std::any::{type_name, Any};
use std::collections::VecDeque;

use crate::container::descriptor::Constructor;
use crate::errors::ContainerError;

/// A constructed value handed to the caller; the container keeps no reference
pub type Instance = Box<dyn Any + Send + Sync>;

/// Trait for types the container can build by injecting constructor arguments
///
/// `constructor` describes the parameter list; `construct` receives the
/// resolved arguments in declaration order. Usually generated by the
/// `#[constructible]` attribute from `kiln-core-derive`.
pub trait Constructible: Any + Send + Sync + Sized {
    /// Identifier under which the type is known to the catalog
    const TYPE_NAME: &'static str;

    /// Constructor signature, `None` when the type has no constructor
    fn constructor() -> Option<Constructor> {
        None
    }

    /// Build the value from positional arguments
    fn construct(args: &mut Arguments) -> Result<Self, ContainerError>;
}

/// Positional constructor arguments resolved by the container
#[derive(Default)]
pub struct Arguments {
    values: VecDeque<Instance>,
    position: usize,
}

impl std::fmt::Debug for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arguments")
            .field("remaining", &self.values.len())
            .field("position", &self.position)
            .finish()
    }
}

impl Arguments {
    /// Empty argument list, used for default construction
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_instances(values: Vec<Instance>) -> Self {
        Self {
            values: values.into(),
            position: 0,
        }
    }

    pub fn push(&mut self, value: Instance) {
        self.values.push_back(value);
    }

    /// Take the next argument as `T`
    pub fn next<T: Any>(&mut self) -> Result<T, ContainerError> {
        let position = self.position;
        let value = self
            .values
            .pop_front()
            .ok_or(ContainerError::MissingArgument {
                position,
                expected: type_name::<T>(),
            })?;
        self.position += 1;

        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ContainerError::ArgumentMismatch {
                position,
                expected: type_name::<T>(),
            })
    }

    /// Take the next argument, or `T::default()` when none was supplied
    pub fn next_or_default<T: Any + Default>(&mut self) -> Result<T, ContainerError> {
        if self.values.is_empty() {
            self.position += 1;
            return Ok(T::default());
        }
        self.next()
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
