mod api;
mod arena;

pub use api::{ApiBody, ApiDescriptor, ApiOperation, ApiParam, ApiResponse};
pub use arena::ModelArena;
use indexmap::IndexMap;
use serde::Serialize;
use strum::{Display, IntoStaticStr};

use super::raw::{Constraints, RawSchema};
use crate::naming::identifiers::to_generated_type_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TrivialKind {
  String,
  Int,
  Long,
  Float,
  Double,
  BigDecimal,
  Boolean,
  Date,
  DateTime,
  Bytes,
  Any,
}

/// Resolved type of a field, parameter or alias target.
///
/// `Ref` holds a schema name, never a pointer. Renderers look it up at emission
/// time and fall back to the raw name when the schema does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant")]
pub enum FieldType {
  Trivial { kind: TrivialKind, nullable: bool },
  Ref { schema_name: String, nullable: bool },
  List { element_type: Box<FieldType>, nullable: bool },
}

impl FieldType {
  #[must_use]
  pub fn trivial(kind: TrivialKind, nullable: bool) -> Self {
    Self::Trivial { kind, nullable }
  }

  #[must_use]
  pub fn reference(schema_name: impl Into<String>, nullable: bool) -> Self {
    Self::Ref {
      schema_name: schema_name.into(),
      nullable,
    }
  }

  #[must_use]
  pub fn list(element_type: FieldType, nullable: bool) -> Self {
    Self::List {
      element_type: Box::new(element_type),
      nullable,
    }
  }

  #[must_use]
  pub fn nullable(&self) -> bool {
    match self {
      Self::Trivial { nullable, .. } | Self::Ref { nullable, .. } | Self::List { nullable, .. } => *nullable,
    }
  }

  pub fn set_nullable(&mut self, value: bool) {
    match self {
      Self::Trivial { nullable, .. } | Self::Ref { nullable, .. } | Self::List { nullable, .. } => *nullable = value,
    }
  }

  #[must_use]
  pub fn with_nullable(mut self, value: bool) -> Self {
    self.set_nullable(value);
    self
  }

  /// Schema name this type points at, looking through lists.
  #[must_use]
  pub fn referenced_schema(&self) -> Option<&str> {
    match self {
      Self::Trivial { .. } => None,
      Self::Ref { schema_name, .. } => Some(schema_name),
      Self::List { element_type, .. } => element_type.referenced_schema(),
    }
  }
}

/// Decided output category of a model. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, IntoStaticStr)]
#[serde(tag = "shape")]
pub enum ModelShape {
  #[default]
  Undecided,
  TypeAlias {
    target: FieldType,
  },
  EnumClass {
    values: Vec<String>,
  },
  SealedInterface {
    extends: Vec<String>,
  },
  DataClass {
    extend: Option<String>,
    implements: Vec<String>,
  },
  OpenClass {
    extend: Option<String>,
    implements: Vec<String>,
  },
}

impl ModelShape {
  #[must_use]
  pub fn data_class() -> Self {
    Self::DataClass {
      extend: None,
      implements: vec![],
    }
  }

  #[must_use]
  pub fn open_class() -> Self {
    Self::OpenClass {
      extend: None,
      implements: vec![],
    }
  }

  #[must_use]
  pub fn sealed_interface() -> Self {
    Self::SealedInterface { extends: vec![] }
  }

  #[must_use]
  pub fn kind_name(&self) -> &'static str {
    self.into()
  }

  #[must_use]
  pub fn is_class(&self) -> bool {
    matches!(self, Self::DataClass { .. } | Self::OpenClass { .. })
  }

  #[must_use]
  pub fn is_sealed_interface(&self) -> bool {
    matches!(self, Self::SealedInterface { .. })
  }

  /// Whether models of this shape carry fields at all.
  #[must_use]
  pub fn has_fields(&self) -> bool {
    !matches!(self, Self::TypeAlias { .. } | Self::EnumClass { .. })
  }

  /// The single class parent, when one was linked.
  #[must_use]
  pub fn extend(&self) -> Option<&str> {
    match self {
      Self::DataClass { extend, .. } | Self::OpenClass { extend, .. } => extend.as_deref(),
      _ => None,
    }
  }

  /// Interfaces implemented (classes) or extended (sealed interfaces).
  #[must_use]
  pub fn interfaces(&self) -> &[String] {
    match self {
      Self::DataClass { implements, .. } | Self::OpenClass { implements, .. } => implements,
      Self::SealedInterface { extends } => extends,
      _ => &[],
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationRule {
  Length { min: Option<u64>, max: Option<u64> },
  Range {
    min: Option<serde_json::Number>,
    max: Option<serde_json::Number>,
  },
  Pattern { regex: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "annotation", rename_all = "snake_case")]
pub enum FieldAnnotation {
  /// Wire name differs from the generated name.
  Rename { wire_name: String },
  Deprecated,
  Validation(ValidationRule),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "annotation", rename_all = "snake_case")]
pub enum ModelAnnotation {
  /// Polymorphic parent carrying a discriminator property.
  Tagged { property: String },
  /// Polymorphic parent without a discriminator.
  Untagged,
  /// Child value under a polymorphic parent.
  DiscriminatorValue { parent: String, value: String },
}

/// One resolved property of a model.
#[derive(Debug, Clone, PartialEq, Serialize, bon::Builder)]
pub struct Field {
  #[builder(into)]
  pub original_name: String,
  #[builder(into)]
  pub generated_name: String,
  #[serde(rename = "type")]
  pub field_type: FieldType,
  pub required: bool,
  #[builder(default)]
  pub overridden: bool,
  #[builder(into)]
  pub default_value_code: Option<String>,
  #[builder(default)]
  pub docs: Vec<String>,
  #[builder(default)]
  pub deprecated: bool,
  #[builder(default)]
  #[serde(skip_serializing_if = "Constraints::is_empty")]
  pub constraints: Constraints,
  #[builder(default)]
  pub annotations: Vec<FieldAnnotation>,
}

impl Field {
  /// Sets requiredness and keeps `nullable == !required`.
  pub fn set_required(&mut self, required: bool) {
    self.required = required;
    self.field_type.set_nullable(!required);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Polymorphism {
  pub discriminator_property_original_name: String,
  pub discriminator_property_generated_name: String,
  /// Schema name to wire value, in child order.
  pub schema_name_to_discriminator_value: IndexMap<String, String>,
}

/// A schema under resolution.
///
/// Created once per [`RawSchema`]. Each pipeline pass overwrites `shape` and
/// `fields` wholesale; after the pipeline the model is read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
  #[serde(rename = "schema")]
  pub raw: RawSchema,
  pub package_name: String,
  pub generated_name: String,
  pub all_of_children: Vec<String>,
  pub parent_one_of: Option<String>,
  pub used_as_discriminator_child: bool,
  pub shape: ModelShape,
  pub fields: Vec<Field>,
  pub docs: Vec<String>,
  pub annotations: Vec<ModelAnnotation>,
  pub polymorphism: Option<Polymorphism>,
}

impl Model {
  #[must_use]
  pub fn new(raw: RawSchema, package_name: &str) -> Self {
    let generated_name = to_generated_type_name(&raw.original_name);
    let docs = raw
      .description
      .as_deref()
      .map(|text| text.lines().map(str::to_string).collect())
      .unwrap_or_default();

    Self {
      raw,
      package_name: package_name.to_string(),
      generated_name,
      all_of_children: vec![],
      parent_one_of: None,
      used_as_discriminator_child: false,
      shape: ModelShape::Undecided,
      fields: vec![],
      docs,
      annotations: vec![],
      polymorphism: None,
    }
  }

  /// Stable key: the schema's original name.
  #[must_use]
  pub fn name(&self) -> &str {
    &self.raw.original_name
  }

  #[must_use]
  pub fn field(&self, generated_name: &str) -> Option<&Field> {
    self.fields.iter().find(|field| field.generated_name == generated_name)
  }
}
