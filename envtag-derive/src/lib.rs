//! Derive macro implementation for envtag

use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, Data, DeriveInput, Fields, GenericArgument, Path, PathArguments,
    PathSegment, Type, Visibility,
};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// Extract inner type from Option<T>
fn extract_option_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        let path = path_string(&type_path.path);
        if matches!(
            path.as_str(),
            "Option" | "std::option::Option" | "core::option::Option"
        ) {
            return single_type_argument(type_path.path.segments.last()?);
        }
    }
    None
}

/// Path segments joined by `::`, without generics or a leading `::`.
fn path_string(path: &Path) -> String {
    path.segments
        .iter()
        .map(|seg| seg.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

fn single_type_argument(seg: &PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    match (args.args.len(), args.args.first()) {
        (1, Some(GenericArgument::Type(inner))) => Some(inner),
        _ => None,
    }
}

/// Registry key for a field type `envtag` has a fetcher for.
///
/// A type is registered only when written as its bare name or one of its
/// known paths. `chrono::Duration` or `DateTime<Tz>` get `None`.
fn registry_key(ty: &Type) -> Option<&'static str> {
    let type_path = match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path,
        Type::Group(group) => return registry_key(&group.elem),
        Type::Paren(paren) => return registry_key(&paren.elem),
        _ => return None,
    };
    let last = type_path.path.segments.last()?;

    let key = match path_string(&type_path.path).as_str() {
        "String" | "std::string::String" | "alloc::string::String" => "String",
        "isize" | "std::primitive::isize" | "core::primitive::isize" => "isize",
        "bool" | "std::primitive::bool" | "core::primitive::bool" => "bool",
        "f64" | "std::primitive::f64" | "core::primitive::f64" => "f64",
        "Duration" | "std::time::Duration" | "core::time::Duration" => "Duration",
        "Url" | "url::Url" => "Url",
        "UriRef" | "fluent_uri::UriRef" | "envtag::UriRef" => {
            let inner = single_type_argument(last)?;
            return (registry_key(inner) == Some("String")).then_some("Url");
        }
        "DateTime" | "chrono::DateTime" => {
            let Type::Path(zone) = single_type_argument(last)? else {
                return None;
            };
            let zone_known = matches!(
                path_string(&zone.path).as_str(),
                "Utc" | "FixedOffset" | "Local" | "chrono::Utc" | "chrono::FixedOffset"
                    | "chrono::Local"
            );
            return (zone_known && zone.qself.is_none()).then_some("DateTime");
        }
        _ => return None,
    };
    matches!(last.arguments, PathArguments::None).then_some(key)
}

/// Name reported for a type with no registry key, e.g. `chrono::Duration`.
fn display_type(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
}

/// `Populate` derive macro
///
/// Registers each field of a struct with the `envtag` populate engine: a
/// static table describing the fields and a setter that writes converted
/// values back.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[conf(prefix = "PREFIX_")]`: Add prefix to all env var names
///
/// **Field-level**:
/// - `#[conf("VAR_NAME,default=value,format=layout")]`: Tag string
/// - `#[conf = "VAR_NAME"]`: Same, name-value form
/// - `#[conf("-")]`: Skip the field
///
/// # Example
///
/// See the `envtag` crate documentation for usage examples.
#[proc_macro_derive(Populate, attributes(conf))]
pub fn derive_populate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let struct_attrs = match StructAttrs::from_attrs(&input.attrs) {
        Ok(attrs) => attrs,
        Err(e) => return e.to_compile_error().into(),
    };
    let prefix = struct_attrs.prefix;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "Populate only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Populate only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let mut slots = Vec::new();
    let mut arms = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = field_ident.unraw().to_string();
        let field_type = &field.ty;

        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(e) => return e.to_compile_error().into(),
        };

        let inner_type = extract_option_inner_type(field_type);
        let optional = inner_type.is_some();
        let base_type = inner_type.unwrap_or(field_type);
        let key = registry_key(base_type);
        let base_name = key.map_or_else(|| display_type(base_type), str::to_string);
        let settable = !matches!(field.vis, Visibility::Inherited);

        let tag = match &attrs.tag {
            Some(lit) => quote! { ::core::option::Option::Some(#lit) },
            None => quote! { ::core::option::Option::None },
        };

        slots.push(quote! {
            ::envtag::FieldSlot {
                name: #field_name,
                tag: #tag,
                type_name: #base_name,
                optional: #optional,
                settable: #settable,
            }
        });

        let annotated = attrs
            .tag
            .as_ref()
            .is_some_and(|lit| !matches!(lit.value().as_str(), "" | "-"));
        if !annotated || !settable || key.is_none() {
            continue;
        }

        let convert = quote! {
            <#base_type as ::envtag::FromValue>::from_value(value)
                .map_err(|v| ::envtag::PopulateError::assign_error::<Self>(#index, &v))?
        };
        let store = if optional {
            quote! { self.#field_ident = ::core::option::Option::Some(#convert); }
        } else {
            quote! { self.#field_ident = #convert; }
        };

        arms.push(quote! {
            #index => {
                #store
                ::core::result::Result::Ok(())
            }
        });
    }

    let expanded = quote! {
        impl #impl_generics ::envtag::Populate for #struct_name #ty_generics #where_clause {
            const PREFIX: &'static str = #prefix;

            fn fields() -> &'static [::envtag::FieldSlot] {
                const FIELDS: &[::envtag::FieldSlot] = &[#(#slots),*];
                FIELDS
            }

            fn assign(
                &mut self,
                index: usize,
                value: ::envtag::Value,
            ) -> ::core::result::Result<(), ::envtag::PopulateError> {
                match index {
                    #(#arms)*
                    _ => ::core::result::Result::Err(
                        ::envtag::PopulateError::assign_error::<Self>(index, &value),
                    ),
                }
            }
        }
    };

    TokenStream::from(expanded)
}
