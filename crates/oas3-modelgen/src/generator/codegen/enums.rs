use std::collections::BTreeSet;

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::{
  RenderContext,
  attributes::{generate_derives, generate_docs, generate_serde_attrs},
  types,
};
use crate::{
  generator::model::Model,
  naming::identifiers::{ensure_unique, to_enum_variant_name},
};

const ENUM_DERIVES: &[&str] = &[
  "Debug",
  "Clone",
  "Copy",
  "PartialEq",
  "Eq",
  "Hash",
  "PartialOrd",
  "Ord",
  "Serialize",
  "Deserialize",
];

/// Renders a closed set of string values as a fieldless enum with an
/// `as_str` accessor returning the wire value.
pub(crate) fn generate_enum(ctx: RenderContext<'_>, model: &Model, values: &[String]) -> TokenStream {
  let name = types::type_ident(ctx, model.name());
  let docs = generate_docs(&model.docs);
  let vis = ctx.visibility.to_tokens();
  let derives = generate_derives(ENUM_DERIVES);

  let mut used = BTreeSet::new();
  let variants: Vec<(Ident, &str)> = values
    .iter()
    .map(|value| {
      let variant = ensure_unique(&to_enum_variant_name(value), &used);
      used.insert(variant.clone());
      (format_ident!("{}", variant), value.as_str())
    })
    .collect();

  let variant_defs = variants.iter().map(|(ident, value)| {
    let serde_attrs = if ident.to_string() == *value {
      quote! {}
    } else {
      generate_serde_attrs(&[quote! { rename = #value }])
    };
    quote! {
      #serde_attrs
      #ident
    }
  });

  let match_arms = variants.iter().map(|(ident, value)| quote! { Self::#ident => #value });

  quote! {
    #docs
    #derives
    #vis enum #name {
      #(#variant_defs),*
    }

    impl #name {
      #vis fn as_str(&self) -> &'static str {
        match self {
          #(#match_arms),*
        }
      }
    }
  }
}
