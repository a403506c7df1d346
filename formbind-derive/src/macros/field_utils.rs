//! Shared utilities for `#[field(...)]` attributes.

use syn::{Attribute, LitStr};

/// Parsed `#[field(...)]` options for one struct field.
#[derive(Default)]
pub struct FieldOptions {
    pub skip: bool,
    pub rename: Option<String>,
}

/// Parse every `#[field(...)]` attribute on a field.
pub fn parse_field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("field") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                options.rename = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok(options)
}
