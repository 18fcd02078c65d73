use oas3::spec::{ObjectOrReference, ObjectSchema, Ref};

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Schema name behind an internal `#/components/schemas/...` reference.
///
/// External documents and other component kinds yield `None`.
pub(crate) fn parse_schema_ref_path(ref_path: &str) -> Option<String> {
  if !ref_path.starts_with(SCHEMA_REF_PREFIX) {
    return None;
  }
  ref_path.parse::<Ref>().ok().map(|component| component.name)
}

/// Schema name of a `$ref` entry; inline schemas yield `None`.
pub(crate) fn extract_schema_ref_name(obj_ref: &ObjectOrReference<ObjectSchema>) -> Option<String> {
  match obj_ref {
    ObjectOrReference::Ref { ref_path, .. } => parse_schema_ref_path(ref_path),
    ObjectOrReference::Object(_) => None,
  }
}

/// Discriminator mapping targets are either bare schema names or `$ref` paths.
pub(crate) fn mapping_target_name(target: &str) -> String {
  if target.starts_with('#') {
    parse_schema_ref_path(target).unwrap_or_else(|| target.rsplit('/').next().unwrap_or(target).to_string())
  } else {
    target.to_string()
  }
}
