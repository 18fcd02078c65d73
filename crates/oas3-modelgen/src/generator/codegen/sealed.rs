use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{
  RenderContext,
  attributes::{generate_derives, generate_docs, generate_serde_attrs},
  types,
};
use crate::{
  generator::model::Model,
  naming::identifiers::ensure_unique,
};

const SEALED_DERIVES: &[&str] = &["Debug", "Clone", "PartialEq", "Serialize", "Deserialize"];

struct Variant<'m> {
  schema_name: &'m str,
  tag_value: Option<&'m str>,
}

/// Members of the sealed hierarchy, in declaration order.
///
/// Discriminator mappings win, then `oneOf` members, then concrete `allOf`
/// subtypes. Members missing from the arena are skipped.
fn variants<'m>(ctx: RenderContext<'m>, model: &'m Model) -> Vec<Variant<'m>> {
  if let Some(polymorphism) = &model.polymorphism {
    return polymorphism
      .schema_name_to_discriminator_value
      .iter()
      .map(|(schema_name, value)| Variant {
        schema_name,
        tag_value: Some(value.as_str()),
      })
      .collect();
  }

  let one_of: Vec<Variant<'m>> = model
    .raw
    .one_of_children
    .iter()
    .filter(|child| ctx.arena.contains(child))
    .map(|schema_name| Variant {
      schema_name,
      tag_value: None,
    })
    .collect();
  if !one_of.is_empty() {
    return one_of;
  }

  model
    .all_of_children
    .iter()
    .filter(|child| ctx.arena.get(child).is_some_and(|child| child.shape.is_class()))
    .map(|schema_name| Variant {
      schema_name,
      tag_value: None,
    })
    .collect()
}

pub(crate) fn has_variants(ctx: RenderContext<'_>, model: &Model) -> bool {
  !variants(ctx, model).is_empty()
}

/// Renders a sealed interface as an enum over its members.
///
/// A discriminated hierarchy becomes an internally tagged enum whose variants
/// carry the wire values; anything else is untagged and matched in order.
pub(crate) fn generate_sealed_enum(ctx: RenderContext<'_>, model: &Model) -> TokenStream {
  let name = types::type_ident(ctx, model.name());
  let vis = ctx.visibility.to_tokens();
  let derives = generate_derives(SEALED_DERIVES);

  let mut docs = model.docs.clone();
  for parent in model.shape.interfaces() {
    docs.push(format!("Member of [`{}`].", types::type_ident(ctx, parent)));
  }
  let docs = generate_docs(&docs);

  let enum_attrs = match &model.polymorphism {
    Some(polymorphism) => {
      let tag = &polymorphism.discriminator_property_original_name;
      generate_serde_attrs(&[quote! { tag = #tag }])
    }
    None => generate_serde_attrs(&[quote! { untagged }]),
  };

  let mut seen = BTreeSet::new();
  let mut used = BTreeSet::new();
  let members: Vec<(TokenStream, TokenStream)> = variants(ctx, model)
    .into_iter()
    .filter(|variant| seen.insert(variant.schema_name))
    .map(|variant| {
      let variant_name = ensure_unique(&types::type_ident(ctx, variant.schema_name).to_string(), &used);
      used.insert(variant_name.clone());
      let variant_ident = format_ident!("{}", variant_name);

      let child = types::type_ident(ctx, variant.schema_name);
      let boxed = ctx.cycles.same_cycle(model.name(), variant.schema_name);
      let content = if boxed {
        quote! { Box<#child> }
      } else {
        quote! { #child }
      };

      let serde_attrs = match variant.tag_value {
        Some(value) if variant_ident != value => generate_serde_attrs(&[quote! { rename = #value }]),
        _ => quote! {},
      };

      let definition = quote! {
        #serde_attrs
        #variant_ident(#content)
      };
      let wrap = if boxed {
        quote! { Self::#variant_ident(Box::new(value)) }
      } else {
        quote! { Self::#variant_ident(value) }
      };
      let from_impl = quote! {
        impl From<#child> for #name {
          fn from(value: #child) -> Self {
            #wrap
          }
        }
      };
      (definition, from_impl)
    })
    .collect();

  let definitions = members.iter().map(|(definition, _)| definition);
  let from_impls = members.iter().map(|(_, from_impl)| from_impl);

  quote! {
    #docs
    #derives
    #enum_attrs
    #vis enum #name {
      #(#definitions),*
    }

    #(#from_impls)*
  }
}
