use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::{
  generator::{
    model::{FieldAnnotation, Model, ModelAnnotation, ModelArena, Polymorphism, ValidationRule},
    raw::Constraints,
  },
  naming::identifiers::to_generated_field_name,
};

/// Derives discriminator metadata and target-neutral annotations.
///
/// Runs last. Both the polymorphism block and all annotations are rebuilt from
/// scratch, so running it twice yields the same models.
pub(crate) struct PolymorphismResolver;

impl PolymorphismResolver {
  pub(crate) fn resolve(arena: &mut ModelArena) {
    let view: &ModelArena = arena;
    let blocks: Vec<Option<Polymorphism>> = view.iter().map(|model| polymorphism_for(view, model)).collect();

    let mut child_values: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
    for (model, block) in view.iter().zip(&blocks) {
      let Some(block) = block else { continue };
      for (child, value) in &block.schema_name_to_discriminator_value {
        child_values
          .entry(child.clone())
          .or_default()
          .push((model.name().to_string(), value.clone()));
      }
    }

    for (model, block) in arena.iter_mut().zip(blocks) {
      let mut annotations = vec![];
      if let Some(block) = &block {
        annotations.push(ModelAnnotation::Tagged {
          property: block.discriminator_property_original_name.clone(),
        });
      } else if !model.raw.one_of_children.is_empty() {
        annotations.push(ModelAnnotation::Untagged);
      }

      let values = child_values.remove(model.name()).unwrap_or_default();
      model.used_as_discriminator_child = !values.is_empty();
      annotations.extend(
        values
          .into_iter()
          .map(|(parent, value)| ModelAnnotation::DiscriminatorValue { parent, value }),
      );

      model.annotations = annotations;
      model.polymorphism = block;

      for field in &mut model.fields {
        field.annotations = field_annotations(&field.original_name, &field.generated_name, field.deprecated, &field.constraints);
      }
    }
  }
}

/// Children that take part in the discriminated hierarchy of `model`.
///
/// `oneOf` members win when present; otherwise concrete `allOf` subtypes.
fn polymorphic_children<'m>(arena: &'m ModelArena, model: &'m Model) -> Vec<&'m str> {
  if !model.raw.one_of_children.is_empty() {
    return model
      .raw
      .one_of_children
      .iter()
      .map(String::as_str)
      .filter(|child| arena.contains(child))
      .collect();
  }

  model
    .all_of_children
    .iter()
    .map(String::as_str)
    .filter(|child| arena.get(child).is_some_and(|child| child.shape.is_class()))
    .collect()
}

fn polymorphism_for(arena: &ModelArena, model: &Model) -> Option<Polymorphism> {
  let property = model.raw.discriminator_property_name.as_deref()?;
  let children = polymorphic_children(arena, model);
  if children.is_empty() {
    return None;
  }

  let mut schema_to_value: IndexMap<&str, &str> = IndexMap::new();
  for (value, schema) in &model.raw.discriminator_mapping {
    schema_to_value.entry(schema.as_str()).or_insert(value.as_str());
  }

  let schema_name_to_discriminator_value = children
    .into_iter()
    .map(|child| {
      let value = schema_to_value.get(child).copied().unwrap_or(child);
      (child.to_string(), value.to_string())
    })
    .collect();

  Some(Polymorphism {
    discriminator_property_original_name: property.to_string(),
    discriminator_property_generated_name: to_generated_field_name(property),
    schema_name_to_discriminator_value,
  })
}

fn field_annotations(wire_name: &str, generated_name: &str, deprecated: bool, constraints: &Constraints) -> Vec<FieldAnnotation> {
  let mut annotations = vec![];

  if wire_name != generated_name {
    annotations.push(FieldAnnotation::Rename {
      wire_name: wire_name.to_string(),
    });
  }
  if deprecated {
    annotations.push(FieldAnnotation::Deprecated);
  }

  let min_length = constraints.min_length.or(constraints.min_items);
  let max_length = constraints.max_length.or(constraints.max_items);
  if min_length.is_some() || max_length.is_some() {
    annotations.push(FieldAnnotation::Validation(ValidationRule::Length {
      min: min_length,
      max: max_length,
    }));
  }
  if constraints.minimum.is_some() || constraints.maximum.is_some() {
    annotations.push(FieldAnnotation::Validation(ValidationRule::Range {
      min: constraints.minimum.clone(),
      max: constraints.maximum.clone(),
    }));
  }
  if let Some(regex) = &constraints.pattern {
    annotations.push(FieldAnnotation::Validation(ValidationRule::Pattern { regex: regex.clone() }));
  }

  annotations
}
