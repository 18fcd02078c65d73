use std::{
  collections::{BTreeSet, HashSet},
  sync::LazyLock,
};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

pub(crate) static FORBIDDEN_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "gen",
  ]
  .into_iter()
  .collect()
});

static RESERVED_TYPE_NAMES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "Box", "Clone", "Copy", "Default", "Display", "Option", "Result", "Self", "Send", "String", "Sync", "Type", "Vec",
  ]
  .into_iter()
  .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());
static ACRONYM_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());
static CASE_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// Transliterates to ASCII and turns every run of non-alphanumerics into a
/// single `_`, trimming the ends.
pub(crate) fn sanitize(input: &str) -> String {
  let ascii = any_ascii(input);
  INVALID_CHARS_RE
    .replace_all(&ascii, "_")
    .trim_matches('_')
    .to_string()
}

/// Lowercase words joined by `_`, split on separators and case boundaries
/// (`HTTPServer_error` → `http_server_error`).
///
/// Acronym runs are split and lowered before handing off to `inflections`, which
/// does not see a boundary inside `HTTPServer`.
pub(crate) fn snake_words(input: &str) -> String {
  let sanitized = sanitize(input);
  let split = ACRONYM_BOUNDARY_RE.replace_all(&sanitized, "${1}_${2}");
  CASE_BOUNDARY_RE
    .replace_all(&split, "${1}_${2}")
    .to_ascii_lowercase()
    .to_snake_case()
}

fn is_mixed_case_word(input: &str) -> bool {
  input.chars().all(|c| c.is_ascii_alphanumeric())
    && input.chars().any(|c| c.is_ascii_uppercase())
    && input.chars().any(|c| c.is_ascii_lowercase())
}

/// Sanitized `PascalCase` name for a schema.
///
/// Names already written in mixed case keep their capitalization (`XMLHttpRequest`
/// stays as is); everything else is re-cased word by word.
pub(crate) fn to_generated_type_name(name: &str) -> String {
  let mut ident = if is_mixed_case_word(name) {
    let mut chars = name.chars();
    chars
      .next()
      .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
      .unwrap_or_default()
  } else {
    snake_words(name).to_pascal_case()
  };

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, 'T');
  }

  ident
}

/// Sanitized `camelCase` name for a property.
///
/// A leading `@` becomes the word `at`, so `@type` → `atType` and
/// `@odata.type` → `atOdataType`.
pub(crate) fn to_generated_field_name(name: &str) -> String {
  if let Some(rest) = name.strip_prefix('@') {
    let tail = to_generated_type_name(rest);
    return if tail == "Unnamed" {
      "at".to_string()
    } else {
      format!("at{tail}")
    };
  }

  let mut ident = if is_mixed_case_word(name) {
    let mut chars = name.chars();
    chars
      .next()
      .map(|first| first.to_ascii_lowercase().to_string() + chars.as_str())
      .unwrap_or_default()
  } else {
    snake_words(name).to_camel_case()
  };

  if ident.is_empty() {
    return "field".to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  ident
}

/// `PascalCase` variant name for an enum value. Numeric values get a `V` prefix.
pub(crate) fn to_enum_variant_name(value: &str) -> String {
  let ident = snake_words(value).to_pascal_case();
  if ident.is_empty() {
    return "Empty".to_string();
  }
  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    return format!("V{ident}");
  }
  ident
}

/// Converts a generated name into a Rust field or method identifier (`snake_case`).
///
/// Keywords get a raw identifier prefix, `self` becomes `self_`, and a leading
/// digit is prefixed with `_`.
pub(crate) fn to_rust_field_name(name: &str) -> String {
  let mut ident = snake_words(name);

  if ident.is_empty() {
    return "_".to_string();
  }

  if ident == "self" {
    return "self_".to_string();
  }

  if FORBIDDEN_IDENTIFIERS.contains(ident.as_str()) {
    return format!("r#{ident}");
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  ident
}

/// Converts a generated type name into a Rust type identifier that cannot
/// shadow a prelude type.
pub(crate) fn to_rust_type_name(name: &str) -> String {
  let ident = to_generated_type_name(name);
  if RESERVED_TYPE_NAMES.contains(ident.as_str()) {
    format!("{ident}Model")
  } else {
    ident
  }
}

/// Appends the smallest counter (from 2) that makes `base_name` unused.
pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  (2..)
    .map(|i| format!("{base_name}{i}"))
    .find(|candidate| !used_names.contains(candidate))
    .unwrap_or_else(|| base_name.to_string())
}

/// `camelCase` name for an operation, derived from its id or from method and path.
///
/// Path templates become `By<Param>`: `GET /pets/{petId}` → `getPetsByPetId`.
pub(crate) fn to_operation_name(operation_id: Option<&str>, method: &str, path: &str) -> String {
  if let Some(id) = operation_id.filter(|id| !sanitize(id).is_empty()) {
    return to_generated_field_name(id);
  }

  let segments = path.split('/').filter(|segment| !segment.is_empty()).map(|segment| {
    match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
      Some(param) => format!("By{}", to_generated_type_name(param)),
      None => to_generated_type_name(segment),
    }
  });

  let mut name = method.to_lowercase();
  name.extend(segments);
  to_generated_field_name(&name)
}
