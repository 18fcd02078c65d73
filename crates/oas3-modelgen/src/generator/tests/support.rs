use indexmap::IndexMap;
use oas3::Spec;

use crate::generator::{
  config::MappingConfig,
  model::ModelArena,
  raw::{RawPath, RawPrimitiveType, RawProperty, RawSchema, RawType},
  resolver::{ModelResolver, ResolvedModels},
};

pub(crate) fn parse_spec(spec_json: &str) -> Spec {
  oas3::from_json(spec_json).expect("failed to parse test spec")
}

pub(crate) fn string_prop(required: bool) -> RawProperty {
  RawProperty::builder()
    .raw_type(RawPrimitiveType::String.into())
    .required(required)
    .build()
}

pub(crate) fn typed_prop(primitive: RawPrimitiveType, required: bool) -> RawProperty {
  RawProperty::builder()
    .raw_type(primitive.into())
    .required(required)
    .build()
}

pub(crate) fn ref_prop(schema: &str, required: bool) -> RawProperty {
  RawProperty::builder()
    .raw_type(RawType::reference(schema))
    .required(required)
    .build()
}

pub(crate) fn props(entries: Vec<(&str, RawProperty)>) -> IndexMap<String, RawProperty> {
  entries.into_iter().map(|(name, prop)| (name.to_string(), prop)).collect()
}

pub(crate) fn names(values: &[&str]) -> Vec<String> {
  values.iter().map(|value| (*value).to_string()).collect()
}

pub(crate) fn object(name: &str, entries: Vec<(&str, RawProperty)>) -> RawSchema {
  RawSchema::builder().original_name(name).own_properties(props(entries)).build()
}

/// `Animal` is a `oneOf` union of `Dog` and `Cat`, both of which also list it in
/// `allOf`. The union carries discriminator `type`.
pub(crate) fn animal_hierarchy() -> Vec<RawSchema> {
  vec![
    RawSchema::builder()
      .original_name("Animal")
      .one_of_children(names(&["Dog", "Cat"]))
      .discriminator_property_name("type")
      .discriminator_mapping(
        [("dog", "Dog"), ("cat", "Cat")]
          .into_iter()
          .map(|(value, schema)| (value.to_string(), schema.to_string()))
          .collect(),
      )
      .build(),
    RawSchema::builder()
      .original_name("Dog")
      .all_of_parents(names(&["Animal"]))
      .own_properties(props(vec![("bark", string_prop(true))]))
      .build(),
    RawSchema::builder()
      .original_name("Cat")
      .all_of_parents(names(&["Animal"]))
      .own_properties(props(vec![("meow", string_prop(true))]))
      .build(),
  ]
}

pub(crate) fn resolve_with(schemas: Vec<RawSchema>, paths: &[RawPath], config: &MappingConfig) -> ResolvedModels {
  ModelResolver::new(config).resolve(schemas, paths)
}

pub(crate) fn resolve(schemas: Vec<RawSchema>) -> ModelArena {
  resolve_with(schemas, &[], &MappingConfig::default()).arena
}
