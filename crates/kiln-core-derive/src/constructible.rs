//! Constructible attribute macro implementation
//!
//! Reads the fields of a struct as its constructor signature and generates
//! the `Constructible` implementation the container uses to build it.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{
    parse::Result, parse_macro_input, Error, Fields, Item, ItemStruct, LitStr, Member, Type,
};

/// Main implementation function for the constructible macro
pub fn constructible_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut type_name: Option<LitStr> = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            type_name = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported constructible option, expected `name = \"...\"`"))
        }
    });
    parse_macro_input!(args with parser);

    let input_item = parse_macro_input!(input as Item);

    match process_item(input_item, type_name) {
        Ok(result) => result.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn process_item(item: Item, type_name: Option<LitStr>) -> Result<TokenStream2> {
    match item {
        Item::Struct(mut item_struct) => process_struct(&mut item_struct, type_name),
        _ => Err(Error::new_spanned(
            item,
            "#[constructible] can only be applied to structs",
        )),
    }
}

/// One constructor parameter, taken from a struct field
struct ParameterInfo {
    member: Member,
    name: String,
    ty: Type,
    declared_type: Option<String>,
    has_default: bool,
}

fn process_struct(
    item_struct: &mut ItemStruct,
    type_name: Option<LitStr>,
) -> Result<TokenStream2> {
    if !item_struct.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &item_struct.generics,
            "#[constructible] does not support generic structs",
        ));
    }

    let parameters = extract_parameters(item_struct)?;
    let constructible_impl = generate_impl(item_struct, type_name, &parameters);

    Ok(quote! {
        #item_struct

        #constructible_impl
    })
}

/// Collect parameters and strip the `#[inject]` attributes from the fields
fn extract_parameters(item_struct: &mut ItemStruct) -> Result<Vec<ParameterInfo>> {
    let mut parameters = Vec::new();

    for (index, field) in item_struct.fields.iter_mut().enumerate() {
        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
            None => (Member::Unnamed(index.into()), index.to_string()),
        };

        let mut id: Option<String> = None;
        let mut untyped = false;
        let mut has_default = false;

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("inject")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    let value: LitStr = meta.value()?.parse()?;
                    id = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("default") {
                    has_default = true;
                    Ok(())
                } else if meta.path.is_ident("untyped") {
                    untyped = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported inject option, expected `id`, `default` or `untyped`"))
                }
            })?;
        }
        field.attrs.retain(|a| !a.path().is_ident("inject"));

        if untyped && id.is_some() {
            return Err(Error::new_spanned(
                &field.ty,
                "`untyped` parameters cannot declare an `id`",
            ));
        }

        let declared_type = if untyped {
            None
        } else {
            match id {
                Some(id) => Some(id),
                None => Some(type_identifier(&field.ty)?),
            }
        };

        parameters.push(ParameterInfo {
            member,
            name,
            ty: field.ty.clone(),
            declared_type,
            has_default,
        });
    }

    Ok(parameters)
}

/// Derive the identifier of a field type from the last path segment
fn type_identifier(ty: &Type) -> Result<String> {
    if let Type::Path(type_path) = ty {
        if type_path.qself.is_none() {
            if let Some(segment) = type_path.path.segments.last() {
                return Ok(segment.ident.to_string());
            }
        }
    }

    Err(Error::new_spanned(
        ty,
        "Cannot derive an identifier for this type. Use #[inject(id = \"...\")] or #[inject(untyped)]",
    ))
}

fn generate_impl(
    item_struct: &ItemStruct,
    type_name: Option<LitStr>,
    parameters: &[ParameterInfo],
) -> TokenStream2 {
    let struct_name = &item_struct.ident;
    let type_name = type_name
        .unwrap_or_else(|| LitStr::new(&struct_name.to_string(), Span::call_site()));

    let constructor = if parameters.is_empty() {
        quote! { ::std::option::Option::None }
    } else {
        let descriptors = parameters.iter().map(|param| {
            let name = &param.name;
            let parameter = match &param.declared_type {
                Some(declared_type) => quote! {
                    ::kiln_core::container::Parameter::typed(#name, #declared_type)
                },
                None => quote! {
                    ::kiln_core::container::Parameter::untyped(#name)
                },
            };
            if param.has_default {
                quote! { #parameter.with_default() }
            } else {
                parameter
            }
        });
        quote! {
            ::std::option::Option::Some(::kiln_core::container::Constructor::new(
                ::std::vec![#(#descriptors),*]
            ))
        }
    };

    let bindings: Vec<_> = (0..parameters.len())
        .map(|index| format_ident!("__arg{}", index))
        .collect();

    let reads = parameters.iter().zip(&bindings).map(|(param, binding)| {
        let ty = &param.ty;
        if param.has_default {
            quote! { let #binding: #ty = args.next_or_default::<#ty>()?; }
        } else {
            quote! { let #binding: #ty = args.next::<#ty>()?; }
        }
    });

    let body = match &item_struct.fields {
        Fields::Named(_) => {
            let members = parameters.iter().map(|param| &param.member);
            quote! { Self { #(#members: #bindings),* } }
        }
        Fields::Unnamed(_) => quote! { Self(#(#bindings),*) },
        Fields::Unit => quote! { Self },
    };

    quote! {
        impl ::kiln_core::container::Constructible for #struct_name {
            const TYPE_NAME: &'static str = #type_name;

            fn constructor() -> ::std::option::Option<::kiln_core::container::Constructor> {
                #constructor
            }

            #[allow(unused_variables)]
            fn construct(
                args: &mut ::kiln_core::container::Arguments,
            ) -> ::std::result::Result<Self, ::kiln_core::errors::ContainerError> {
                #(#reads)*
                ::std::result::Result::Ok(#body)
            }
        }
    }
}
