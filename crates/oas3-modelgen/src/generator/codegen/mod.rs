use proc_macro2::TokenStream;
use quote::quote;

use super::{
  analyzer::CycleReport,
  model::{ApiDescriptor, Model, ModelArena, ModelShape},
};

pub mod apis;
pub mod attributes;
pub mod enums;
pub mod sealed;
pub mod structs;
pub mod type_aliases;
pub mod types;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
  #[default]
  Public,
  Crate,
  File,
}

impl Visibility {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "public" => Some(Visibility::Public),
      "crate" => Some(Visibility::Crate),
      "file" => Some(Visibility::File),
      _ => None,
    }
  }

  pub(crate) fn to_tokens(self) -> TokenStream {
    match self {
      Visibility::Public => quote! { pub },
      Visibility::Crate => quote! { pub(crate) },
      Visibility::File => quote! {},
    }
  }
}

/// Read-only view shared by every renderer.
#[derive(Clone, Copy)]
pub(crate) struct RenderContext<'a> {
  pub arena: &'a ModelArena,
  pub cycles: &'a CycleReport,
  pub visibility: Visibility,
}

impl<'a> RenderContext<'a> {
  pub(crate) fn new(arena: &'a ModelArena, cycles: &'a CycleReport, visibility: Visibility) -> Self {
    Self {
      arena,
      cycles,
      visibility,
    }
  }
}

pub(crate) fn generate(ctx: RenderContext<'_>, apis: &[ApiDescriptor]) -> TokenStream {
  let type_tokens: Vec<TokenStream> = ctx.arena.iter().map(|model| generate_model(ctx, model)).collect();
  let api_tokens: Vec<TokenStream> = apis.iter().map(|api| apis::generate_api_trait(ctx, api)).collect();

  quote! {
    use serde::{Deserialize, Serialize};

    #(#type_tokens)*

    #(#api_tokens)*
  }
}

fn generate_model(ctx: RenderContext<'_>, model: &Model) -> TokenStream {
  match &model.shape {
    ModelShape::TypeAlias { target } => type_aliases::generate_type_alias(ctx, model, target),
    ModelShape::EnumClass { values } => enums::generate_enum(ctx, model, values),
    ModelShape::SealedInterface { .. } if sealed::has_variants(ctx, model) => sealed::generate_sealed_enum(ctx, model),
    ModelShape::SealedInterface { .. }
    | ModelShape::DataClass { .. }
    | ModelShape::OpenClass { .. }
    | ModelShape::Undecided => structs::generate_struct(ctx, model),
  }
}
