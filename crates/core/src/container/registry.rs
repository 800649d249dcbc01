use std::collections::HashMap;

use crate::container::autowiring::Constructible;
use crate::container::descriptor::{validate_type_name, TypeDescriptor};
use crate::errors::LookupError;

#[derive(Debug, Clone, Copy)]
enum CatalogEntry {
    Concrete(fn() -> TypeDescriptor),
    Abstract,
}

/// Catalog of type names the container knows how to describe
#[derive(Debug, Default)]
pub struct TypeCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a concrete type known under its `TYPE_NAME`
    pub fn register<T: Constructible>(&mut self) {
        self.entries
            .insert(T::TYPE_NAME.to_string(), CatalogEntry::Concrete(TypeDescriptor::of::<T>));
    }

    /// Make an interface-like name known without an implementation
    pub fn register_abstract(&mut self, name: impl Into<String>) {
        self.entries.insert(name.into(), CatalogEntry::Abstract);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a fresh descriptor for `name`
    pub fn describe(&self, name: &str) -> Result<TypeDescriptor, LookupError> {
        validate_type_name(name)?;

        match self.entries.get(name) {
            Some(CatalogEntry::Concrete(describe)) => Ok(describe()),
            Some(CatalogEntry::Abstract) => Ok(TypeDescriptor::abstract_type(name)),
            None => Err(LookupError::Unknown(name.to_string())),
        }
    }
}
