use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse2};

use super::field_utils::parse_field_options;

/// Derive macro for the FieldAccess trait.
///
/// Generates a `field()` lookup that matches each exposed field name and
/// forwards to the field's own `as_lookup()`, so `Option` fields report
/// `Null` when empty.
pub fn expand(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match parse2(input) {
        Ok(i) => i,
        Err(e) => return e.to_compile_error(),
    };

    let name = &input.ident;

    // Every type parameter must itself be walkable.
    let mut generics = input.generics.clone();
    let params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
    let where_preds = &mut generics.make_where_clause().predicates;
    for param in params {
        where_preds.push(syn::parse_quote!(#param: ::formbind::access::FieldAccess));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "#[derive(Model)] requires a struct with named fields",
                )
                .to_compile_error();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "#[derive(Model)] only supports structs")
                .to_compile_error();
        }
    };

    let mut arms = Vec::new();
    for field in fields {
        let options = match parse_field_options(&field.attrs) {
            Ok(o) => o,
            Err(e) => return e.to_compile_error(),
        };
        if options.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let exposed = options
            .rename
            .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());
        arms.push(quote! {
            #exposed => ::std::option::Option::Some(
                ::formbind::access::FieldAccess::as_lookup(&self.#ident)
            ),
        });
    }

    quote! {
        impl #impl_generics ::formbind::access::FieldAccess for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                ::std::any::type_name::<Self>()
            }

            fn field(&self, name: &str) -> ::std::option::Option<::formbind::access::Lookup<'_>> {
                match name {
                    #(#arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    }
}
