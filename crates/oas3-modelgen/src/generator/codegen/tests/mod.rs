mod structs;

use crate::generator::{
  codegen::{self, RenderContext, Visibility},
  config::MappingConfig,
  raw::RawSchema,
  tests::support::resolve_with,
};

fn format_tokens(tokens: proc_macro2::TokenStream) -> String {
  prettyplease::unparse(&syn::parse2(tokens).unwrap())
}

/// Resolves `schemas` and renders every model.
fn render_with(schemas: Vec<RawSchema>, visibility: Visibility) -> String {
  let resolved = resolve_with(schemas, &[], &MappingConfig::default());
  let ctx = RenderContext::new(&resolved.arena, &resolved.cycles, visibility);
  format_tokens(codegen::generate(ctx, &[]))
}

fn render(schemas: Vec<RawSchema>) -> String {
  render_with(schemas, Visibility::Public)
}
