use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{
  RenderContext,
  attributes::{generate_deprecated_attr, generate_docs},
  types,
};
use crate::{
  generator::model::{ApiDescriptor, ApiOperation},
  naming::identifiers::{ensure_unique, to_rust_field_name, to_rust_type_name},
};

/// Renders one API group as an async trait with an associated error type.
pub(crate) fn generate_api_trait(ctx: RenderContext<'_>, api: &ApiDescriptor) -> TokenStream {
  let name = format_ident!("{}", to_rust_type_name(&api.generated_name));
  let vis = ctx.visibility.to_tokens();
  let group = &api.original_name;
  let docs = generate_docs(&[format!("Operations tagged `{group}`.")]);
  let methods: Vec<TokenStream> = api.operations.iter().map(|operation| generate_operation(ctx, operation)).collect();

  quote! {
    #docs
    #vis trait #name {
      type Error;

      #(#methods)*
    }
  }
}

fn generate_operation(ctx: RenderContext<'_>, operation: &ApiOperation) -> TokenStream {
  let method = format_ident!("{}", to_rust_field_name(&operation.generated_name));

  let mut docs: Vec<String> = operation
    .summary
    .iter()
    .flat_map(|summary| summary.lines().map(str::to_string))
    .collect();
  docs.push(format!("`{} {}`", operation.method, operation.path));
  let docs = generate_docs(&docs);
  let deprecated = generate_deprecated_attr(operation.deprecated);

  let mut used = BTreeSet::from(["self".to_string()]);
  let mut params: Vec<TokenStream> = operation
    .params
    .iter()
    .map(|param| {
      let ident_name = ensure_unique(&to_rust_field_name(&param.generated_name), &used);
      used.insert(ident_name.clone());
      let ident = format_ident!("{}", ident_name);
      let ty = types::rust_type(ctx, &param.field_type, None);
      quote! { #ident: #ty }
    })
    .collect();

  if let Some(body) = &operation.body {
    let ident = format_ident!("{}", ensure_unique("body", &used));
    let ty = types::rust_type(ctx, &body.field_type, None);
    params.push(quote! { #ident: #ty });
  }

  let output = operation
    .success_response
    .as_ref()
    .and_then(|response| response.field_type.as_ref())
    .map_or_else(|| quote! { () }, |field_type| types::rust_type(ctx, field_type, None));

  quote! {
    #docs
    #deprecated
    async fn #method(&self, #(#params),*) -> Result<#output, Self::Error>;
  }
}
