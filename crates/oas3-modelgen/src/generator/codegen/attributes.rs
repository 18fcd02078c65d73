use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use crate::generator::model::{FieldAnnotation, ValidationRule};

pub(crate) fn generate_docs(docs: &[String]) -> TokenStream {
  if docs.is_empty() {
    return quote! {};
  }
  let doc_lines: Vec<TokenStream> = docs.iter().map(|line| quote! { #[doc = #line] }).collect();
  quote! { #(#doc_lines)* }
}

pub(crate) fn generate_derives(derives: &[&str]) -> TokenStream {
  if derives.is_empty() {
    return quote! {};
  }
  let derive_paths = derives.iter().filter_map(|derive| derive.parse::<TokenStream>().ok());
  quote! { #[derive(#(#derive_paths),*)] }
}

/// Combines serde options into a single `#[serde(...)]` attribute.
pub(crate) fn generate_serde_attrs(attrs: &[TokenStream]) -> TokenStream {
  if attrs.is_empty() {
    return quote! {};
  }
  quote! { #[serde(#(#attrs),*)] }
}

pub(crate) fn generate_deprecated_attr(deprecated: bool) -> TokenStream {
  if deprecated {
    quote! { #[deprecated] }
  } else {
    quote! {}
  }
}

/// Whether any annotation turns into a `#[validate(...)]` rule.
pub(crate) fn has_validation(annotations: &[FieldAnnotation]) -> bool {
  annotations.iter().any(|annotation| validation_rule_tokens(annotation).is_some())
}

/// Combines length and range rules into a single `#[validate(...)]` attribute.
///
/// Patterns are documented rather than validated since the derive needs a
/// named regex static.
pub(crate) fn generate_validation_attrs(annotations: &[FieldAnnotation]) -> TokenStream {
  let rules: Vec<TokenStream> = annotations.iter().filter_map(validation_rule_tokens).collect();
  if rules.is_empty() {
    return quote! {};
  }
  quote! { #[validate(#(#rules),*)] }
}

fn validation_rule_tokens(annotation: &FieldAnnotation) -> Option<TokenStream> {
  let FieldAnnotation::Validation(rule) = annotation else {
    return None;
  };

  let (name, min, max) = match rule {
    ValidationRule::Length { min, max } => (
      "length",
      min.map(Literal::u64_unsuffixed),
      max.map(Literal::u64_unsuffixed),
    ),
    ValidationRule::Range { min, max } => ("range", min.as_ref().map(number_literal), max.as_ref().map(number_literal)),
    ValidationRule::Pattern { .. } => return None,
  };

  let rule = format_ident!("{}", name);
  let bounds: Vec<TokenStream> = [min.map(|min| quote! { min = #min }), max.map(|max| quote! { max = #max })]
    .into_iter()
    .flatten()
    .collect();
  Some(quote! { #rule(#(#bounds),*) })
}

fn number_literal(number: &serde_json::Number) -> Literal {
  if let Some(value) = number.as_i64() {
    Literal::i64_unsuffixed(value)
  } else if let Some(value) = number.as_u64() {
    Literal::u64_unsuffixed(value)
  } else {
    Literal::f64_unsuffixed(number.as_f64().unwrap_or_default())
  }
}

/// Doc lines describing a field's pattern constraint, if any.
pub(crate) fn pattern_docs(annotations: &[FieldAnnotation]) -> Vec<String> {
  annotations
    .iter()
    .filter_map(|annotation| match annotation {
      FieldAnnotation::Validation(ValidationRule::Pattern { regex }) => Some(format!("Pattern: `{regex}`")),
      _ => None,
    })
    .collect()
}
