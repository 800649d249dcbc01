use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};
use std::thread::{self, ThreadId};

use crate::config::{ConfigError, ContainerConfig, UntypedParameterPolicy};
use crate::container::autowiring::{Arguments, Constructible, Instance};
use crate::container::binding::Binding;
use crate::container::descriptor::TypeDescriptor;
use crate::container::registry::TypeCatalog;
use crate::container::resolver::ResolutionPath;
use crate::errors::ContainerError;

/// Outcome of looking an identifier up
enum Resolved {
    /// Terminal value produced by a factory binding
    Value(Instance),
    /// Type to be instantiated
    Type(TypeDescriptor),
}

/// Dependency injection container resolving string identifiers
///
/// Resolution never caches: every `get` re-runs factories and rebuilds
/// the whole object graph. The binding table and type catalog are guarded
/// by locks that are released before any factory or constructor runs.
///
/// Identifiers in progress are tracked per thread, so a factory that calls
/// back into the container is still part of the caller's resolution chain.
#[derive(Debug, Default)]
pub struct Container {
    bindings: RwLock<HashMap<String, Binding>>,
    catalog: RwLock<TypeCatalog>,
    in_progress: Mutex<HashMap<ThreadId, ResolutionPath>>,
    config: ContainerConfig,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container from configuration, seeding its alias bindings
    pub fn with_config(config: ContainerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let bindings = config
            .aliases
            .iter()
            .map(|(id, target)| (id.clone(), Binding::alias(target.as_str())))
            .collect();

        tracing::debug!(
            "Creating container with {} configured aliases (untyped parameters: {})",
            config.aliases.len(),
            config.untyped_parameters
        );

        Ok(Self {
            bindings: RwLock::new(bindings),
            catalog: RwLock::new(TypeCatalog::new()),
            in_progress: Mutex::new(HashMap::new()),
            config,
        })
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Make a constructible type known under its `TYPE_NAME`
    pub fn register<T: Constructible>(&self) -> &Self {
        tracing::debug!("Registering type: {}", T::TYPE_NAME);
        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        if catalog.contains(T::TYPE_NAME) {
            tracing::trace!("Replacing catalog entry {}", T::TYPE_NAME);
        }
        catalog.register::<T>();
        self
    }

    /// Make an interface-like name known that cannot be instantiated
    pub fn register_abstract(&self, name: impl Into<String>) -> &Self {
        let name = name.into();
        tracing::debug!("Registering abstract type: {}", name);
        self.catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register_abstract(name);
        self
    }

    /// Bind `id`, replacing any earlier binding
    pub fn set(&self, id: impl Into<String>, binding: impl Into<Binding>) -> &Self {
        let id = id.into();
        let binding = binding.into();
        tracing::debug!("Binding {} to {:?}", id, binding);

        let previous = self
            .bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, binding);
        if let Some(previous) = previous {
            tracing::trace!("Replaced previous binding {:?}", previous);
        }
        self
    }

    /// Bind `id` to a factory invoked on every resolution
    pub fn set_factory<T, F>(&self, id: impl Into<String>, factory: F) -> &Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.set(id, Binding::factory(factory))
    }

    /// Bind `id` to another type name
    pub fn set_alias(&self, id: impl Into<String>, target: impl Into<String>) -> &Self {
        self.set(id, Binding::alias(target))
    }

    /// Bind `id` to a value; every resolution returns a clone
    pub fn set_instance<T>(&self, id: impl Into<String>, value: T) -> &Self
    where
        T: Any + Clone + Send + Sync,
    {
        self.set(id, Binding::instance(value))
    }

    /// Check whether `id` has an explicit binding
    pub fn is_bound(&self, id: &str) -> bool {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Resolve `id` into a freshly produced value
    pub fn get(&self, id: &str) -> Result<Instance, ContainerError> {
        self.enter(id)?;
        let result = match self.resolve_binding(id) {
            Ok(Resolved::Value(value)) => Ok(value),
            Ok(Resolved::Type(descriptor)) => self.instantiate(&descriptor),
            Err(err) => Err(err),
        };
        self.leave();
        result
    }

    /// Resolve `id` and downcast the value to `T`
    pub fn get_as<T: Any>(&self, id: &str) -> Result<T, ContainerError> {
        self.get(id)?
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ContainerError::TypeMismatch {
                id: id.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Check whether `id` resolves to something usable
    ///
    /// Types are checked for instantiability without being built. A
    /// factory binding is invoked, since factory resolution is eager, and
    /// counts as present unless it produced nothing.
    pub fn has(&self, id: &str) -> bool {
        match self.resolve_binding(id) {
            Ok(Resolved::Value(_)) => true,
            Ok(Resolved::Type(descriptor)) => descriptor.is_instantiable(),
            Err(err) if err.is_not_found() => false,
            Err(err) => {
                tracing::warn!("Existence check for '{}' failed: {}", id, err);
                false
            }
        }
    }

    /// Push `id` onto this thread's resolution path
    fn enter(&self, id: &str) -> Result<(), ContainerError> {
        self.in_progress
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(thread::current().id())
            .or_default()
            .enter(id)
    }

    /// Pop the innermost identifier, dropping the path once it is empty
    fn leave(&self) {
        let thread = thread::current().id();
        let mut in_progress = self.in_progress.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(path) = in_progress.get_mut(&thread) {
            path.leave();
            if path.depth() == 0 {
                in_progress.remove(&thread);
            }
        }
    }

    /// Turn an identifier into either a factory result or a type descriptor
    fn resolve_binding(&self, id: &str) -> Result<Resolved, ContainerError> {
        let binding = self
            .bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned();

        let name = match binding {
            None => id.to_string(),
            Some(Binding::Factory(factory)) => {
                tracing::debug!("Invoking factory for {}", id);
                return factory()?
                    .map(Resolved::Value)
                    .ok_or_else(|| ContainerError::not_found(id));
            }
            Some(Binding::Alias(target)) => {
                tracing::debug!("Resolving {} as {}", id, target);
                target
            }
        };

        self.describe(&name)
            .map(Resolved::Type)
            .map_err(|source| ContainerError::not_found_with_source(id, source))
    }

    fn describe(&self, name: &str) -> Result<TypeDescriptor, crate::errors::LookupError> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .describe(name)
    }

    /// Build a described type, injecting each typed constructor parameter
    fn instantiate(&self, descriptor: &TypeDescriptor) -> Result<Instance, ContainerError> {
        if !descriptor.is_instantiable() {
            return Err(ContainerError::NotInstantiable {
                type_name: descriptor.name().to_string(),
            });
        }

        if descriptor.is_default_constructible() {
            tracing::debug!("Constructing {} with defaults", descriptor.name());
            return descriptor.build(&mut Arguments::new());
        }

        let mut args = Arguments::new();
        for parameter in descriptor.parameters() {
            match &parameter.declared_type {
                Some(declared_type) => {
                    tracing::trace!(
                        "Injecting {} into {}::{}",
                        declared_type,
                        descriptor.name(),
                        parameter.name
                    );
                    args.push(self.get(declared_type)?);
                }
                None if !parameter.required => {
                    tracing::trace!(
                        "Leaving untyped parameter {}::{} to its default",
                        descriptor.name(),
                        parameter.name
                    );
                }
                None => match self.config.untyped_parameters {
                    UntypedParameterPolicy::Reject => {
                        return Err(ContainerError::UnresolvableParameter {
                            type_name: descriptor.name().to_string(),
                            parameter: parameter.name.clone(),
                        });
                    }
                    UntypedParameterPolicy::Skip => {
                        tracing::trace!(
                            "Skipping untyped parameter {}::{}",
                            descriptor.name(),
                            parameter.name
                        );
                    }
                },
            }
        }

        tracing::debug!(
            "Constructing {} with {} injected arguments",
            descriptor.name(),
            args.remaining()
        );
        descriptor.build(&mut args)
    }
}
