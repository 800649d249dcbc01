use std::any::Any;
use std::sync::Arc;

use crate::container::autowiring::Instance;
use crate::errors::ContainerError;

/// Zero-argument factory, invoked fresh on every resolution
///
/// `Ok(None)` means the factory produced nothing: the identifier then
/// resolves as not found and `has` reports it absent.
pub type FactoryFn = Arc<dyn Fn() -> Result<Option<Instance>, ContainerError> + Send + Sync>;

/// Entry in the registration table
#[derive(Clone)]
pub enum Binding {
    /// Produces the value directly; never cached
    Factory(FactoryFn),
    /// Redirects to another type name, looked up once in the type catalog
    Alias(String),
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Factory(_) => write!(f, "Factory(<factory_fn>)"),
            Binding::Alias(target) => write!(f, "Alias({target})"),
        }
    }
}

impl Binding {
    /// Bind a factory producing `T`
    pub fn factory<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Binding::Factory(Arc::new(move || Ok(Some(Box::new(factory()) as Instance))))
    }

    /// Bind a factory that may fail
    pub fn try_factory<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        Binding::Factory(Arc::new(move || {
            factory().map(|value| Some(Box::new(value) as Instance))
        }))
    }

    /// Bind a factory whose `None` leaves the identifier unresolved
    pub fn optional_factory<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> Option<T> + Send + Sync + 'static,
    {
        Binding::Factory(Arc::new(move || {
            Ok(factory().map(|value| Box::new(value) as Instance))
        }))
    }

    /// Bind a concrete value; each resolution hands out a fresh clone
    pub fn instance<T>(value: T) -> Self
    where
        T: Any + Clone + Send + Sync,
    {
        Self::factory(move || value.clone())
    }

    /// Redirect to another type name
    pub fn alias(target: impl Into<String>) -> Self {
        Binding::Alias(target.into())
    }

    pub fn is_factory(&self) -> bool {
        matches!(self, Binding::Factory(_))
    }

    /// Alias target, if this binding is an alias
    pub fn as_alias(&self) -> Option<&str> {
        match self {
            Binding::Alias(target) => Some(target),
            Binding::Factory(_) => None,
        }
    }
}

impl From<&str> for Binding {
    fn from(target: &str) -> Self {
        Binding::alias(target)
    }
}

impl From<String> for Binding {
    fn from(target: String) -> Self {
        Binding::Alias(target)
    }
}

impl From<FactoryFn> for Binding {
    fn from(factory: FactoryFn) -> Self {
        Binding::Factory(factory)
    }
}
