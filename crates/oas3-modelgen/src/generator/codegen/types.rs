use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::RenderContext;
use crate::{
  generator::model::{FieldType, TrivialKind},
  naming::identifiers::{to_generated_type_name, to_rust_type_name},
};

/// Rust identifier for the model stored under `schema_name`.
///
/// Unknown schemas fall back to a name derived from the raw schema name.
pub(crate) fn type_ident(ctx: RenderContext<'_>, schema_name: &str) -> Ident {
  let generated = ctx
    .arena
    .get(schema_name)
    .map_or_else(|| to_generated_type_name(schema_name), |model| model.generated_name.clone());
  format_ident!("{}", to_rust_type_name(&generated))
}

/// Rust type for a resolved field type.
///
/// A direct reference from `owner` into its own reference cycle is boxed; a
/// reference inside a list already has indirection.
pub(crate) fn rust_type(ctx: RenderContext<'_>, field_type: &FieldType, owner: Option<&str>) -> TokenStream {
  let inner = match field_type {
    FieldType::Trivial { kind, .. } => trivial_type(*kind),
    FieldType::Ref { schema_name, .. } => {
      let ident = type_ident(ctx, schema_name);
      if owner.is_some_and(|owner| ctx.cycles.same_cycle(owner, schema_name)) {
        quote! { Box<#ident> }
      } else {
        quote! { #ident }
      }
    }
    FieldType::List { element_type, .. } => {
      let element = rust_type(ctx, element_type, None);
      quote! { Vec<#element> }
    }
  };

  if field_type.nullable() {
    quote! { Option<#inner> }
  } else {
    inner
  }
}

pub(crate) fn trivial_type(kind: TrivialKind) -> TokenStream {
  match kind {
    TrivialKind::String => quote! { String },
    TrivialKind::Int => quote! { i32 },
    TrivialKind::Long => quote! { i64 },
    TrivialKind::Float => quote! { f32 },
    TrivialKind::Double => quote! { f64 },
    TrivialKind::BigDecimal => quote! { serde_json::Number },
    TrivialKind::Boolean => quote! { bool },
    TrivialKind::Date => quote! { chrono::NaiveDate },
    TrivialKind::DateTime => quote! { chrono::DateTime<chrono::Utc> },
    TrivialKind::Bytes => quote! { Vec<u8> },
    TrivialKind::Any => quote! { serde_json::Value },
  }
}
