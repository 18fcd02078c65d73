use proc_macro2::TokenStream;
use quote::quote;

use super::{RenderContext, attributes::generate_docs, types};
use crate::generator::model::{FieldType, Model};

pub(crate) fn generate_type_alias(ctx: RenderContext<'_>, model: &Model, target: &FieldType) -> TokenStream {
  let name = types::type_ident(ctx, model.name());
  let docs = generate_docs(&model.docs);
  let vis = ctx.visibility.to_tokens();
  let target = types::rust_type(ctx, target, Some(model.name()));

  quote! {
    #docs
    #vis type #name = #target;
  }
}
