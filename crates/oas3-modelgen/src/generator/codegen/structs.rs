use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{
  RenderContext,
  attributes::{
    generate_deprecated_attr, generate_derives, generate_docs, generate_serde_attrs, generate_validation_attrs,
    has_validation, pattern_docs,
  },
  sealed, types,
};
use crate::{
  generator::model::{Field, Model, ModelAnnotation},
  naming::identifiers::{ensure_unique, to_rust_field_name},
};

const STRUCT_DERIVES: &[&str] = &["Debug", "Clone", "PartialEq", "Serialize", "Deserialize"];

pub(crate) fn generate_struct(ctx: RenderContext<'_>, model: &Model) -> TokenStream {
  let name = types::type_ident(ctx, model.name());
  let vis = ctx.visibility.to_tokens();

  let tag_fields = tag_fields(ctx, model);
  let rendered: Vec<&Field> = model
    .fields
    .iter()
    .filter(|field| !tag_fields.contains(field.original_name.as_str()))
    .collect();

  let mut derives = STRUCT_DERIVES.to_vec();
  if rendered.iter().any(|field| has_validation(&field.annotations)) {
    derives.push("validator::Validate");
  }
  let derives = generate_derives(&derives);
  let docs = generate_docs(&struct_docs(ctx, model, &tag_fields));

  let mut used = BTreeSet::new();
  let fields: Vec<TokenStream> = rendered
    .into_iter()
    .map(|field| generate_field(ctx, model, field, &mut used))
    .collect();

  quote! {
    #docs
    #derives
    #vis struct #name {
      #(#fields),*
    }
  }
}

/// Discriminator properties carried by an enclosing tagged enum rather than
/// by the struct itself.
fn tag_fields<'m>(ctx: RenderContext<'m>, model: &Model) -> BTreeSet<&'m str> {
  model
    .annotations
    .iter()
    .filter_map(|annotation| match annotation {
      ModelAnnotation::DiscriminatorValue { parent, .. } => ctx.arena.get(parent),
      _ => None,
    })
    .filter(|parent| parent.shape.is_sealed_interface() && sealed::has_variants(ctx, parent))
    .filter_map(|parent| parent.polymorphism.as_ref())
    .map(|polymorphism| polymorphism.discriminator_property_original_name.as_str())
    .collect()
}

fn struct_docs(ctx: RenderContext<'_>, model: &Model, tag_fields: &BTreeSet<&str>) -> Vec<String> {
  let mut docs = model.docs.clone();
  if let Some(parent) = model.shape.extend() {
    docs.push(format!("Extends [`{}`].", types::type_ident(ctx, parent)));
  }
  for interface in model.shape.interfaces() {
    docs.push(format!("Implements [`{}`].", types::type_ident(ctx, interface)));
  }
  for tag in tag_fields {
    docs.push(format!("The `{tag}` discriminator is written by the enclosing enum."));
  }
  docs
}

fn generate_field(ctx: RenderContext<'_>, owner: &Model, field: &Field, used: &mut BTreeSet<String>) -> TokenStream {
  let ident_name = ensure_unique(&to_rust_field_name(&field.generated_name), used);
  used.insert(ident_name.clone());
  let ident = format_ident!("{}", ident_name);

  let vis = ctx.visibility.to_tokens();
  let ty = types::rust_type(ctx, &field.field_type, Some(owner.name()));

  let mut docs = field.docs.clone();
  if let Some(default) = &field.default_value_code {
    docs.push(format!("Default: `{default}`"));
  }
  docs.extend(pattern_docs(&field.annotations));
  let docs = generate_docs(&docs);

  let mut serde_attrs = vec![];
  let wire_name = field.original_name.as_str();
  if ident_name.trim_start_matches("r#") != wire_name {
    serde_attrs.push(quote! { rename = #wire_name });
  }
  if field.field_type.nullable() {
    serde_attrs.push(quote! { default, skip_serializing_if = "Option::is_none" });
  }
  let serde_attrs = generate_serde_attrs(&serde_attrs);
  let deprecated = generate_deprecated_attr(field.deprecated);
  let validation = generate_validation_attrs(&field.annotations);

  quote! {
    #docs
    #deprecated
    #serde_attrs
    #validation
    #vis #ident: #ty
  }
}
