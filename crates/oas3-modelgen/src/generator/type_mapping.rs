use super::{
  config::MappingConfig,
  model::{FieldType, TrivialKind},
  raw::{RawPrimitiveType, RawType},
};

/// Maps raw wire types onto resolved [`FieldType`]s.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TypeMapper<'a> {
  config: &'a MappingConfig,
}

impl<'a> TypeMapper<'a> {
  pub(crate) fn new(config: &'a MappingConfig) -> Self {
    Self { config }
  }

  /// Top-level nullability is `!required`. Nested element types are never null.
  pub(crate) fn map(&self, raw_type: &RawType, required: bool) -> FieldType {
    self.map_inner(raw_type).with_nullable(!required)
  }

  fn map_inner(&self, raw_type: &RawType) -> FieldType {
    match raw_type {
      RawType::Primitive(primitive) => FieldType::trivial(self.trivial_kind(*primitive), false),
      RawType::Ref(name) => FieldType::reference(name.clone(), false),
      RawType::Array(item) => FieldType::list(self.map_inner(item), false),
    }
  }

  pub(crate) fn trivial_kind(&self, primitive: RawPrimitiveType) -> TrivialKind {
    match primitive {
      RawPrimitiveType::String => TrivialKind::String,
      RawPrimitiveType::Int32 => TrivialKind::Int,
      RawPrimitiveType::Int64 => TrivialKind::Long,
      RawPrimitiveType::Integer if self.config.integer_maps_to_wide_int => TrivialKind::Long,
      RawPrimitiveType::Integer => TrivialKind::Int,
      RawPrimitiveType::Float if self.config.float_maps_to_arbitrary_precision => TrivialKind::BigDecimal,
      RawPrimitiveType::Float => TrivialKind::Float,
      RawPrimitiveType::Double | RawPrimitiveType::Number if self.config.double_maps_to_arbitrary_precision => {
        TrivialKind::BigDecimal
      }
      RawPrimitiveType::Double | RawPrimitiveType::Number => TrivialKind::Double,
      RawPrimitiveType::Boolean => TrivialKind::Boolean,
      RawPrimitiveType::Date => TrivialKind::Date,
      RawPrimitiveType::DateTime => TrivialKind::DateTime,
      RawPrimitiveType::Binary => TrivialKind::Bytes,
      RawPrimitiveType::Any => TrivialKind::Any,
    }
  }
}
