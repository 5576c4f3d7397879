//! `cel-derive` provides `#[derive(Event)]` for `cel-mapper`.
//!
//! Users should depend on `cel-mapper` (with its default `derive` feature)
//! rather than on this crate directly.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_macro_input, Data, DeriveInput, Error, Fields, LitStr, Result, Visibility};

/// Derive `cel_mapper::Event` for a struct with named fields.
///
/// Each field may carry a `#[cel("index[,json][,noerror]")]` directive.
/// Only `pub` fields with a directive are mapped; the directive's contents
/// are checked when a record is mapped, not at compile time.
///
/// Mapped fields must be `cel_mapper::Slot`s, i.e. `'static` and `Deserialize`.
/// A mapped field of any other type (e.g. `std::sync::mpsc::Sender<String>`) is a
/// compile error rather than a mapping error. Private or untagged fields can
/// have any type.
#[proc_macro_derive(Event, attributes(cel))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// A single struct field, as seen by the derive.
struct ParsedField {
    ident: syn::Ident,
    tag: Option<LitStr>,
    settable: bool,
}

impl ParsedField {
    fn from_field(field: &syn::Field) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(field.span(), "Event requires named fields"))?;

        let mut tag = None;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("cel")) {
            if tag.is_some() {
                return Err(Error::new(attr.span(), "duplicate #[cel(...)] attribute"));
            }
            tag = Some(attr.parse_args::<LitStr>()?);
        }

        Ok(Self {
            ident: ident,
            tag: tag,
            settable: matches!(field.vis, Visibility::Public(_)),
        })
    }

    fn descriptor(&self) -> TokenStream2 {
        let ident = &self.ident;
        let name = ident.to_string();

        match &self.tag {
            Some(tag) if self.settable => quote! {
                ::cel_mapper::Field::new(#name, #tag, &mut self.#ident)
            },
            Some(tag) => quote! {
                ::cel_mapper::Field::unsettable(#name, #tag)
            },
            None => quote! {
                ::cel_mapper::Field::unsettable(#name, "")
            },
        }
    }
}

fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .map(ParsedField::from_field)
                .collect::<Result<Vec<_>>>()?,
            Fields::Unit => vec![],
            Fields::Unnamed(_) => {
                return Err(Error::new(
                    input.span(),
                    "Event can't be derived for tuple structs",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Event can only be derived for structs",
            ))
        }
    };

    let ident = &input.ident;
    let name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let descriptors = fields.iter().map(ParsedField::descriptor);

    Ok(quote! {
        impl #impl_generics ::cel_mapper::Event for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;

            fn fields(&mut self) -> ::std::vec::Vec<::cel_mapper::Field<'_>> {
                ::std::vec![#(#descriptors),*]
            }
        }

        impl #impl_generics ::cel_mapper::Destination for #ident #ty_generics #where_clause {
            fn resolve(
                &mut self,
            ) -> ::std::result::Result<
                ::std::vec::Vec<::cel_mapper::Field<'_>>,
                ::cel_mapper::InvalidTargetError,
            > {
                ::std::result::Result::Err(::cel_mapper::map::reject_by_value::<Self>())
            }
        }
    })
}
