//! # kiln-core-derive
//!
//! Procedural macros for the kiln-core container.
//!
//! - `#[constructible]`: implement `Constructible` for a struct, treating its
//!   fields as constructor parameters in declaration order

use proc_macro::TokenStream;

mod constructible;

/// Constructible attribute macro
///
/// Each field becomes a parameter whose identifier is the last segment of
/// its type path. Field options:
///
/// - `#[inject(id = "...")]` resolves the field under another identifier
/// - `#[inject(default)]` marks the parameter optional, falling back to
///   `Default` when the type is built without injection
/// - `#[inject(untyped)]` gives the parameter no identifier
///
/// `#[constructible(name = "...")]` overrides the catalog name, which
/// defaults to the struct name.
#[proc_macro_attribute]
pub fn constructible(args: TokenStream, input: TokenStream) -> TokenStream {
    constructible::constructible_impl(args, input)
}
