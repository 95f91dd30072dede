//! Procedural macros for Spy.
//!
//! `#[derive(Object)]` marks a type as a valid factory product.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, parse_macro_input};

/// Implements `spy::Object` for a struct or enum.
///
/// ```rust,ignore
/// #[derive(Object)]
/// struct Logger {
///     prefix: String,
/// }
/// ```
///
/// Generic parameters and where clauses are carried over unchanged; the
/// type must still be `Send + Sync + 'static` to compile.
#[proc_macro_derive(Object)]
pub fn derive_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_object(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_object(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if let Data::Union(data) = &input.data {
        return Err(syn::Error::new_spanned(
            data.union_token,
            "Object cannot be derived for unions",
        ));
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::spy::Object for #name #ty_generics #where_clause {}
    })
}
