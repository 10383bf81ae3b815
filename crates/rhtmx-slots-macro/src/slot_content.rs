// File: rhtmx-slots-macro/src/slot_content.rs
// Purpose: SlotContent derive macro and #[slot(...)] attribute processing

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, GenericArgument, Ident, LitStr, PathArguments, Type};

/// Parsed `#[slot(...)]` options of one field
#[derive(Default)]
struct SlotAttrs {
    positional: bool,
    default: bool,
    skip: bool,
    content: bool,
    rename: Option<String>,
}

fn extract_slot_attrs(field: &Field) -> syn::Result<SlotAttrs> {
    let mut attrs = SlotAttrs::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("slot") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("positional") {
                attrs.positional = true;
            } else if meta.path.is_ident("default") {
                attrs.default = true;
            } else if meta.path.is_ident("skip") {
                attrs.skip = true;
            } else if meta.path.is_ident("content") {
                attrs.content = true;
            } else if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                attrs.rename = Some(name.value());
            } else {
                return Err(meta.error("unsupported slot attribute"));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

/// Check if a type is Option<T>
fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Option" {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    return matches!(args.args.first(), Some(GenericArgument::Type(_)));
                }
            }
        }
    }
    false
}

pub fn impl_slot_content(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "SlotContent only supports structs with named fields",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "SlotContent only supports structs")),
    };

    let parsed = fields
        .iter()
        .filter(|field| field.ident.is_some())
        .map(|field| extract_slot_attrs(field).map(|attrs| (field, attrs)))
        .collect::<syn::Result<Vec<_>>>()?;

    let marked: Vec<&Field> = parsed
        .iter()
        .filter(|(_, attrs)| attrs.content)
        .map(|(field, _)| *field)
        .collect();
    if marked.len() > 1 {
        return Err(syn::Error::new_spanned(
            marked[1],
            "only one field can be marked #[slot(content)]",
        ));
    }
    let content_field = marked
        .first()
        .and_then(|field| field.ident.as_ref())
        .or_else(|| {
            fields
                .iter()
                .filter_map(|field| field.ident.as_ref())
                .find(|ident| *ident == "content")
        });
    let Some(content_field) = content_field else {
        return Err(syn::Error::new_spanned(
            name,
            "SlotContent requires a `content: Option<Value>` field or a field marked #[slot(content)]",
        ));
    };

    let mut field_inits = Vec::new();

    for (field, attrs) in parsed {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        if field_name == content_field {
            continue;
        }

        if attrs.skip {
            field_inits.push(quote! {
                let #field_name = ::std::default::Default::default();
            });
            continue;
        }

        let key = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let lookup = if attrs.positional {
            quote! {
                match args.next_positional() {
                    ::std::option::Option::Some(value) => ::std::option::Option::Some(value),
                    ::std::option::Option::None => args.take_named(#key),
                }
            }
        } else {
            quote! { args.take_named(#key) }
        };

        let missing = if attrs.default || is_option_type(&field.ty) {
            quote! { ::std::default::Default::default() }
        } else {
            quote! {
                return ::std::result::Result::Err(
                    ::rhtmx_slots::ArgError::Missing(#key.to_string())
                )
            }
        };

        field_inits.push(quote! {
            let #field_name = match #lookup {
                ::std::option::Option::Some(value) => {
                    ::rhtmx_slots::FromSlotValue::from_slot_value(value)
                        .map_err(|message| ::rhtmx_slots::ArgError::invalid(#key, message))?
                }
                ::std::option::Option::None => { #missing }
            };
        });
    }

    let field_names: Vec<&Ident> = fields
        .iter()
        .filter_map(|f| f.ident.as_ref())
        .filter(|ident| *ident != content_field)
        .collect();

    Ok(quote! {
        impl #impl_generics ::rhtmx_slots::SlotContent for #name #ty_generics #where_clause {
            fn content(&self) -> ::std::option::Option<&::rhtmx_slots::Value> {
                self.#content_field.as_ref()
            }

            fn set_content(&mut self, content: ::rhtmx_slots::Value) {
                self.#content_field = ::std::option::Option::Some(content);
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        impl #impl_generics ::rhtmx_slots::FromSlotArgs for #name #ty_generics #where_clause {
            #[allow(unused_mut)]
            fn from_slot_args(
                mut args: ::rhtmx_slots::SlotArgs,
            ) -> ::std::result::Result<Self, ::rhtmx_slots::ArgError> {
                #(#field_inits)*
                args.finish()?;
                ::std::result::Result::Ok(Self {
                    #(#field_names,)*
                    #content_field: ::std::option::Option::None,
                })
            }
        }
    })
}
