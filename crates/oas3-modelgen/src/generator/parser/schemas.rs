use std::collections::{BTreeMap, BTreeSet};

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Schema, SchemaType, SchemaTypeSet},
};

use crate::{
  generator::raw::{Constraints, RawPrimitiveType, RawProperty, RawSchema, RawType},
  naming::identifiers::{ensure_unique, to_generated_type_name},
  utils::{extract_schema_ref_name, mapping_target_name},
};

/// Normalizes `components.schemas` into [`RawSchema`] records.
///
/// Inline object and enum properties are hoisted into their own records, named
/// after the owning schema and the property.
pub(super) struct SchemaCollector<'a> {
  spec: &'a Spec,
  schemas: BTreeMap<String, RawSchema>,
  taken_names: BTreeSet<String>,
}

impl<'a> SchemaCollector<'a> {
  pub(super) fn new(spec: &'a Spec) -> Self {
    let taken_names = spec
      .components
      .as_ref()
      .map(|components| components.schemas.keys().cloned().collect())
      .unwrap_or_default();

    Self {
      spec,
      schemas: BTreeMap::new(),
      taken_names,
    }
  }

  pub(super) fn collect(mut self) -> Vec<RawSchema> {
    let spec = self.spec;
    let Some(components) = &spec.components else {
      return vec![];
    };

    for (name, schema_ref) in &components.schemas {
      match schema_ref.resolve(spec) {
        Ok(schema) => {
          let raw = self.normalize(name, &schema);
          self.schemas.insert(name.clone(), raw);
        }
        Err(error) => {
          tracing::warn!(schema = %name, %error, "skipping unresolvable schema");
        }
      }
    }

    self.schemas.into_values().collect()
  }

  fn normalize(&mut self, name: &str, schema: &ObjectSchema) -> RawSchema {
    let mut raw = RawSchema::builder()
      .original_name(name)
      .maybe_description(schema.description.clone())
      .build();

    let mut required: BTreeSet<&str> = schema.required.iter().map(String::as_str).collect();
    let mut properties: Vec<(&String, &ObjectOrReference<ObjectSchema>)> = schema.properties.iter().collect();
    let mut discriminator = schema.discriminator.as_ref();

    for member in &schema.all_of {
      match member {
        ObjectOrReference::Ref { .. } => raw.all_of_parents.extend(extract_schema_ref_name(member)),
        ObjectOrReference::Object(inline) => {
          required.extend(inline.required.iter().map(String::as_str));
          properties.extend(inline.properties.iter());
          discriminator = discriminator.or(inline.discriminator.as_ref());
        }
      }
    }

    raw.one_of_children = schema.one_of.iter().filter_map(extract_schema_ref_name).collect();
    raw.any_of_members = schema.any_of.iter().filter_map(extract_schema_ref_name).collect();
    raw.enum_values = enum_values(schema);

    if primary_type(schema) == Some(SchemaType::Array) {
      raw.is_array_schema = true;
      raw.array_item_type = Some(self.items_type(name, "", schema));
      if let Some(Schema::Object(items)) = schema.items.as_deref()
        && let ObjectOrReference::Object(inline) = &**items
      {
        raw.inline_refs = nested_schema_refs(inline);
      }
    }

    if let Some(discriminator) = discriminator {
      raw.discriminator_property_name = Some(discriminator.property_name.clone());
      raw.discriminator_mapping = discriminator
        .mapping
        .iter()
        .flatten()
        .map(|(value, target)| (value.clone(), mapping_target_name(target)))
        .collect();
    }

    for (prop_name, prop_ref) in properties {
      let property = self.property(name, prop_name, prop_ref, required.contains(prop_name.as_str()));
      raw.own_properties.insert(prop_name.clone(), property);
    }

    raw
  }

  fn property(
    &mut self,
    owner: &str,
    prop_name: &str,
    prop_ref: &ObjectOrReference<ObjectSchema>,
    required: bool,
  ) -> RawProperty {
    let raw_type = self.property_type(owner, prop_name, prop_ref);
    let builder = RawProperty::builder().raw_type(raw_type).required(required);

    let ObjectOrReference::Object(schema) = prop_ref else {
      return builder.build();
    };

    builder
      .inline_refs(nested_schema_refs(schema))
      .maybe_default_value(schema.default.clone())
      .maybe_description(schema.description.clone())
      .deprecated(schema.deprecated.unwrap_or(false))
      .constraints(constraints(schema))
      .build()
  }

  fn property_type(&mut self, owner: &str, prop_name: &str, prop_ref: &ObjectOrReference<ObjectSchema>) -> RawType {
    match prop_ref {
      ObjectOrReference::Ref { ref_path, .. } => extract_schema_ref_name(prop_ref).map_or_else(
        || {
          tracing::debug!(owner, property = prop_name, %ref_path, "external or non-schema reference");
          RawPrimitiveType::Any.into()
        },
        RawType::Ref,
      ),
      ObjectOrReference::Object(schema) => self.inline_type(owner, prop_name, schema),
    }
  }

  fn inline_type(&mut self, owner: &str, prop_name: &str, schema: &ObjectSchema) -> RawType {
    if let Some(target) = single_composition_ref(schema) {
      return RawType::Ref(target);
    }

    match primary_type(schema) {
      Some(SchemaType::Array) => RawType::array_of(self.items_type(owner, prop_name, schema)),
      _ if !schema.enum_values.is_empty() || !schema.properties.is_empty() => {
        RawType::Ref(self.hoist(owner, prop_name, schema))
      }
      Some(schema_type) => {
        RawPrimitiveType::from_type_and_format(type_name(schema_type), schema.format.as_deref()).into()
      }
      None => RawPrimitiveType::Any.into(),
    }
  }

  fn items_type(&mut self, owner: &str, prop_name: &str, schema: &ObjectSchema) -> RawType {
    match schema.items.as_deref() {
      Some(Schema::Object(items)) => self.property_type(owner, &format!("{prop_name}Item"), items),
      Some(Schema::Boolean(_)) | None => RawPrimitiveType::Any.into(),
    }
  }

  /// Registers an inline schema under a synthetic name and returns that name.
  fn hoist(&mut self, owner: &str, prop_name: &str, schema: &ObjectSchema) -> String {
    let candidate = format!("{owner}{}", to_generated_type_name(prop_name));
    let name = ensure_unique(&candidate, &self.taken_names);
    self.taken_names.insert(name.clone());
    tracing::debug!(owner, property = prop_name, hoisted = %name, "hoisting inline schema");

    let raw = self.normalize(&name, schema);
    self.schemas.insert(name.clone(), raw);
    name
  }
}

/// The single non-null type of a schema, ignoring `null` in type arrays.
pub(super) fn primary_type(schema: &ObjectSchema) -> Option<SchemaType> {
  match schema.schema_type.as_ref()? {
    SchemaTypeSet::Single(schema_type) => Some(*schema_type),
    SchemaTypeSet::Multiple(types) => {
      let mut non_null = types.iter().filter(|schema_type| **schema_type != SchemaType::Null);
      match (non_null.next(), non_null.next()) {
        (Some(schema_type), None) => Some(*schema_type),
        _ => None,
      }
    }
  }
}

pub(super) fn type_name(schema_type: SchemaType) -> &'static str {
  match schema_type {
    SchemaType::String => "string",
    SchemaType::Integer => "integer",
    SchemaType::Number => "number",
    SchemaType::Boolean => "boolean",
    SchemaType::Array => "array",
    SchemaType::Object => "object",
    SchemaType::Null => "null",
  }
}

/// `allOf: [$ref]`, `oneOf: [$ref]` or `anyOf: [$ref]` wrappers collapse to the
/// ref. `type: null` members are ignored, so `anyOf: [$ref, {type: null}]` does too.
pub(super) fn single_composition_ref(schema: &ObjectSchema) -> Option<String> {
  if !schema.properties.is_empty() {
    return None;
  }
  [&schema.all_of, &schema.one_of, &schema.any_of]
    .into_iter()
    .find_map(|members| {
      let mut non_null = members.iter().filter(|member| !is_null_member(member));
      match (non_null.next(), non_null.next()) {
        (Some(only), None) => extract_schema_ref_name(only),
        _ => None,
      }
    })
}

fn is_null_member(member: &ObjectOrReference<ObjectSchema>) -> bool {
  matches!(
    member,
    ObjectOrReference::Object(schema) if schema.schema_type == Some(SchemaTypeSet::Single(SchemaType::Null))
  )
}

/// Every component schema named inside an inline schema: composition members,
/// properties, array items and additional properties. References are recorded,
/// not followed.
pub(super) fn nested_schema_refs(schema: &ObjectSchema) -> Vec<String> {
  let mut refs = BTreeSet::new();
  collect_nested_refs(schema, &mut refs);
  refs.into_iter().collect()
}

fn collect_nested_refs(schema: &ObjectSchema, refs: &mut BTreeSet<String>) {
  let nested = schema
    .items
    .as_deref()
    .into_iter()
    .chain(schema.additional_properties.as_ref())
    .filter_map(|nested| match nested {
      Schema::Object(inner) => Some(&**inner),
      Schema::Boolean(_) => None,
    });

  let members = schema
    .all_of
    .iter()
    .chain(&schema.one_of)
    .chain(&schema.any_of)
    .chain(schema.properties.values())
    .chain(nested);

  for member in members {
    match member {
      ObjectOrReference::Ref { .. } => refs.extend(extract_schema_ref_name(member)),
      ObjectOrReference::Object(inline) => collect_nested_refs(inline, refs),
    }
  }
}

fn enum_values(schema: &ObjectSchema) -> Vec<String> {
  schema
    .enum_values
    .iter()
    .filter(|value| !value.is_null())
    .map(|value| match value {
      serde_json::Value::String(text) => text.clone(),
      other => other.to_string(),
    })
    .collect()
}

fn constraints(schema: &ObjectSchema) -> Constraints {
  Constraints {
    min_length: schema.min_length,
    max_length: schema.max_length,
    minimum: schema.minimum.clone(),
    maximum: schema.maximum.clone(),
    min_items: schema.min_items,
    max_items: schema.max_items,
    pattern: schema.pattern.clone(),
  }
}
