use indexmap::IndexMap;
use oas3::spec::ParameterIn;
use serde::Serialize;
use strum::Display;

/// Primitive wire types, as declared by `type` + `format` in the spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum RawPrimitiveType {
  String,
  Int32,
  Int64,
  /// `type: integer` without a recognised format.
  Integer,
  Float,
  Double,
  /// `type: number` without a recognised format.
  Number,
  Boolean,
  Date,
  DateTime,
  Binary,
  Any,
}

impl RawPrimitiveType {
  pub(crate) fn from_type_and_format(type_name: &str, format: Option<&str>) -> Self {
    match (type_name, format) {
      ("string", Some("date")) => Self::Date,
      ("string", Some("date-time")) => Self::DateTime,
      ("string", Some("byte" | "binary")) => Self::Binary,
      ("string", _) => Self::String,
      ("integer", Some("int32")) => Self::Int32,
      ("integer", Some("int64")) => Self::Int64,
      ("integer", _) => Self::Integer,
      ("number", Some("float")) => Self::Float,
      ("number", Some("double")) => Self::Double,
      ("number", _) => Self::Number,
      ("boolean", _) => Self::Boolean,
      _ => Self::Any,
    }
  }
}

/// Unresolved property type. References stay as plain schema names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RawType {
  Primitive(RawPrimitiveType),
  Ref(String),
  Array(Box<RawType>),
}

impl RawType {
  #[must_use]
  pub fn reference(name: impl Into<String>) -> Self {
    Self::Ref(name.into())
  }

  #[must_use]
  pub fn array_of(item: RawType) -> Self {
    Self::Array(Box::new(item))
  }

  /// Schema name referenced by this type, looking through array nesting.
  #[must_use]
  pub fn referenced_schema(&self) -> Option<&str> {
    match self {
      Self::Primitive(_) => None,
      Self::Ref(name) => Some(name),
      Self::Array(item) => item.referenced_schema(),
    }
  }
}

impl From<RawPrimitiveType> for RawType {
  fn from(primitive: RawPrimitiveType) -> Self {
    Self::Primitive(primitive)
  }
}

/// Validation constraints carried through from the property declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Constraints {
  pub min_length: Option<u64>,
  pub max_length: Option<u64>,
  pub minimum: Option<serde_json::Number>,
  pub maximum: Option<serde_json::Number>,
  pub min_items: Option<u64>,
  pub max_items: Option<u64>,
  pub pattern: Option<String>,
}

impl Constraints {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, bon::Builder)]
pub struct RawProperty {
  pub raw_type: RawType,
  #[builder(default)]
  pub required: bool,
  pub default_value: Option<serde_json::Value>,
  #[builder(into)]
  pub description: Option<String>,
  #[builder(default)]
  pub deprecated: bool,
  #[builder(default)]
  pub constraints: Constraints,
  /// Schemas named inside an inline property schema. A multi-member union maps
  /// to `Any`, so its members only survive here. Followed by usage analysis.
  #[builder(default)]
  pub inline_refs: Vec<String>,
}

impl RawProperty {
  /// The property type's schema plus everything named in its inline schema.
  pub(crate) fn referenced_schemas(&self) -> impl Iterator<Item = &str> {
    self
      .raw_type
      .referenced_schema()
      .into_iter()
      .chain(self.inline_refs.iter().map(String::as_str))
  }
}

/// One `components.schemas` entry, normalized but undecided.
///
/// Built by the spec parser. The usage analyzer stamps the usage flags once;
/// the record is read-only from then on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, bon::Builder)]
pub struct RawSchema {
  #[builder(into)]
  pub original_name: String,
  #[builder(into)]
  pub description: Option<String>,
  #[builder(default)]
  pub all_of_parents: Vec<String>,
  #[builder(default)]
  pub one_of_children: Vec<String>,
  /// `anyOf` references. Only followed by usage analysis.
  #[builder(default)]
  pub any_of_members: Vec<String>,
  #[builder(default)]
  pub enum_values: Vec<String>,
  #[builder(default)]
  pub is_array_schema: bool,
  pub array_item_type: Option<RawType>,
  /// Schemas named inside inline array items. Only followed by usage analysis.
  #[builder(default)]
  pub inline_refs: Vec<String>,
  #[builder(default)]
  pub own_properties: IndexMap<String, RawProperty>,
  #[builder(into)]
  pub discriminator_property_name: Option<String>,
  /// Discriminator value to schema name, in declaration order.
  #[builder(default)]
  pub discriminator_mapping: IndexMap<String, String>,
  #[builder(default)]
  pub used_in_paths: bool,
  #[builder(default)]
  pub used_as_property: bool,
}

impl RawSchema {
  /// Every schema name this schema points at: property types, array items and
  /// all composition branches, inline ones included.
  pub(crate) fn outgoing_refs(&self) -> impl Iterator<Item = &str> {
    self
      .own_properties
      .values()
      .flat_map(RawProperty::referenced_schemas)
      .chain(self.array_item_type.iter().filter_map(RawType::referenced_schema))
      .chain(self.inline_refs.iter().map(String::as_str))
      .chain(self.all_of_parents.iter().map(String::as_str))
      .chain(self.one_of_children.iter().map(String::as_str))
      .chain(self.any_of_members.iter().map(String::as_str))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
  Path,
  Query,
  Header,
  Cookie,
}

impl From<ParameterIn> for ParameterLocation {
  fn from(location: ParameterIn) -> Self {
    match location {
      ParameterIn::Path => Self::Path,
      ParameterIn::Query => Self::Query,
      ParameterIn::Header => Self::Header,
      ParameterIn::Cookie => Self::Cookie,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawParameter {
  pub name: String,
  pub location: ParameterLocation,
  pub required: bool,
  pub raw_type: RawType,
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawRequestBody {
  pub content_type: String,
  pub raw_type: RawType,
  pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
  pub status_code: String,
  pub content_type: Option<String>,
  pub raw_type: Option<RawType>,
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawOperation {
  pub operation_id: Option<String>,
  pub method: http::Method,
  pub path: String,
  pub summary: Option<String>,
  pub deprecated: bool,
  pub parameters: Vec<RawParameter>,
  pub request_body: Option<RawRequestBody>,
  /// Sorted by status code.
  pub responses: Vec<RawResponse>,
  /// Schemas named inside inline parameter, body and response schemas.
  pub inline_refs: Vec<String>,
}

impl RawOperation {
  /// Every type this operation mentions: parameters, body and responses.
  pub(crate) fn raw_types(&self) -> impl Iterator<Item = &RawType> {
    self
      .parameters
      .iter()
      .map(|param| &param.raw_type)
      .chain(self.request_body.iter().map(|body| &body.raw_type))
      .chain(self.responses.iter().filter_map(|response| response.raw_type.as_ref()))
  }

  /// Schemas this operation reaches directly, through its types or inline schemas.
  pub(crate) fn referenced_schemas(&self) -> impl Iterator<Item = &str> {
    self
      .raw_types()
      .filter_map(RawType::referenced_schema)
      .chain(self.inline_refs.iter().map(String::as_str))
  }
}

/// Operations grouped by tag (or leading path segment).
#[derive(Debug, Clone, PartialEq)]
pub struct RawPath {
  pub name: String,
  pub operations: Vec<RawOperation>,
}
