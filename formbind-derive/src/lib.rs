mod macros;

use proc_macro::TokenStream;

/// Derive `formbind::access::FieldAccess` for a struct with named fields.
///
/// Every field becomes a path segment under its Rust name. Field attributes:
/// - `#[field(rename = "Name")]` exposes the field under another name.
/// - `#[field(skip)]` hides the field from path resolution.
///
/// Field types must implement `FieldAccess` themselves.
#[proc_macro_derive(Model, attributes(field))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    macros::model::expand(input.into()).into()
}
