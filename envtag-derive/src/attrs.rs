//! Attribute parsing for `#[conf(...)]` annotations.
//!
//! Field tags are kept as raw strings; their contents are parsed at runtime
//! by `envtag::annotation`. This module only extracts them.

use syn::{Attribute, Expr, ExprLit, Field, Lit, LitStr, Meta};

/// Parsed `#[conf(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Raw tag string, e.g. `"PORT,default=8080"`.
    ///
    /// `None` when the field has no `#[conf]` attribute.
    pub tag: Option<LitStr>,
}

impl FieldAttrs {
    /// Extract the tag from `#[conf("...")]` or `#[conf = "..."]`.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("conf")) {
            if attrs.tag.is_some() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "duplicate conf attribute; combine options into one tag string",
                ));
            }
            attrs.tag = Some(parse_tag(attr)?);
        }

        Ok(attrs)
    }
}

fn parse_tag(attr: &Attribute) -> syn::Result<LitStr> {
    match &attr.meta {
        Meta::List(list) => list.parse_args::<LitStr>().map_err(|_| {
            syn::Error::new_spanned(
                attr,
                r#"expected a tag string, e.g. #[conf("VAR_NAME,default=value")]"#,
            )
        }),
        Meta::NameValue(name_value) => match &name_value.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => Ok(s.clone()),
            other => Err(syn::Error::new_spanned(other, "conf tag must be a string literal")),
        },
        Meta::Path(_) => Err(syn::Error::new_spanned(
            attr,
            r#"missing tag string, e.g. #[conf("VAR_NAME")]"#,
        )),
    }
}

/// Parsed struct-level `#[conf(...)]` attributes.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prepended to every variable name.
    pub prefix: String,
}

impl StructAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("conf")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    let value: LitStr = meta.value()?.parse()?;
                    parsed.prefix = value.value();
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level conf attribute"))
            })?;
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, DeriveInput};

    #[test]
    fn test_parse_list_tag() {
        let field: Field = parse_quote! {
            #[conf("FIELDA,default=foo")]
            pub a: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tag.unwrap().value(), "FIELDA,default=foo");
    }

    #[test]
    fn test_parse_name_value_tag() {
        let field: Field = parse_quote! {
            #[conf = "FIELDB,default=10"]
            pub b: isize
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tag.unwrap().value(), "FIELDB,default=10");
    }

    #[test]
    fn test_parse_skip_tag() {
        let field: Field = parse_quote! {
            #[conf("-")]
            pub e: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tag.unwrap().value(), "-");
    }

    #[test]
    fn test_no_attribute() {
        let field: Field = parse_quote! {
            #[serde(rename = "x")]
            pub plain: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.tag.is_none());
    }

    #[test]
    fn test_duplicate_attribute_is_rejected() {
        let field: Field = parse_quote! {
            #[conf("A")]
            #[conf("B")]
            pub a: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_non_string_tag_is_rejected() {
        let field: Field = parse_quote! {
            #[conf(default = 10)]
            pub a: isize
        };
        assert!(FieldAttrs::from_field(&field).is_err());

        let field: Field = parse_quote! {
            #[conf]
            pub a: isize
        };
        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_struct_prefix() {
        let input: DeriveInput = parse_quote! {
            #[conf(prefix = "APP_")]
            struct Config {}
        };

        let attrs = StructAttrs::from_attrs(&input.attrs).unwrap();
        assert_eq!(attrs.prefix, "APP_");
    }

    #[test]
    fn test_struct_unknown_attribute() {
        let input: DeriveInput = parse_quote! {
            #[conf(suffix = "_X")]
            struct Config {}
        };

        assert!(StructAttrs::from_attrs(&input.attrs).is_err());
    }
}
