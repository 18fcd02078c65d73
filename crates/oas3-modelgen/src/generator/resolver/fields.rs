use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::{
  generator::{
    metrics::GenerationWarning,
    model::{Field, FieldType, Model, ModelArena, ModelShape, TrivialKind},
    raw::RawProperty,
    type_mapping::TypeMapper,
  },
  naming::identifiers::to_generated_field_name,
};

/// A property gathered from the `allOf` ancestor chain.
#[derive(Debug, Clone, Copy)]
struct InheritedProperty<'a> {
  property: &'a RawProperty,
  required: bool,
}

/// Flattens inherited and own properties into each model's field list.
///
/// Field order is ancestor fields first (depth-first, `allOf` order), then own
/// properties that do not override an ancestor. A property declared by several
/// ancestors keeps the first-seen type; its requiredness is the OR over every
/// declaration, own declaration included.
pub(crate) struct FieldResolver<'a> {
  mapper: TypeMapper<'a>,
}

impl<'a> FieldResolver<'a> {
  pub(crate) fn new(mapper: TypeMapper<'a>) -> Self {
    Self { mapper }
  }

  pub(crate) fn resolve(&self, arena: &mut ModelArena) -> Vec<GenerationWarning> {
    let (coerced, mut warnings) = Self::coerce_undecided(arena);
    self.flatten(arena, &coerced);
    warnings.extend(Self::report_name_collisions(arena));
    Self::propagate_parent_requiredness(arena);
    warnings
  }

  /// Models that never got a shape become empty data classes.
  fn coerce_undecided(arena: &mut ModelArena) -> (BTreeSet<String>, Vec<GenerationWarning>) {
    let mut coerced = BTreeSet::new();
    let mut warnings = vec![];

    for model in arena.iter_mut().filter(|model| model.shape == ModelShape::Undecided) {
      tracing::warn!(schema = model.name(), "no shape decided before field resolution");
      model.shape = ModelShape::data_class();
      coerced.insert(model.name().to_string());
      warnings.push(GenerationWarning::UndecidedShape {
        schema_name: model.name().to_string(),
      });
    }

    (coerced, warnings)
  }

  fn flatten(&self, arena: &mut ModelArena, coerced: &BTreeSet<String>) {
    let view: &ModelArena = arena;
    let resolved: Vec<Vec<Field>> = view
      .iter()
      .map(|model| {
        if coerced.contains(model.name()) {
          vec![]
        } else {
          self.fields_for(view, model)
        }
      })
      .collect();

    for (model, fields) in arena.iter_mut().zip(resolved) {
      model.fields = fields;
    }
  }

  fn fields_for(&self, arena: &ModelArena, model: &Model) -> Vec<Field> {
    if !model.shape.has_fields() {
      return vec![];
    }

    let inherited = collect_ancestor_properties(arena, model);
    let mut fields: Vec<Field> = inherited
      .iter()
      .map(|(name, ancestor)| self.build_field(name, ancestor.property, ancestor.required, true))
      .collect();

    for (name, property) in &model.raw.own_properties {
      let ancestor_required = inherited.get(name).map(|ancestor| ancestor.required);
      let required = ancestor_required.unwrap_or(false) || property.required;
      let field = self.build_field(name, property, required, ancestor_required.is_some());

      match fields.iter().position(|existing| existing.original_name == *name) {
        Some(idx) => fields[idx] = field,
        None => fields.push(field),
      }
    }

    if let Some((discriminator, own)) = effective_discriminator(arena, model)
      && !fields.iter().any(|field| field.original_name == discriminator)
    {
      fields.insert(0, discriminator_field(discriminator, !own));
    }

    fields
  }

  fn build_field(&self, name: &str, property: &RawProperty, required: bool, overridden: bool) -> Field {
    let docs = property
      .description
      .as_deref()
      .map(|text| text.lines().map(str::to_string).collect())
      .unwrap_or_default();

    Field::builder()
      .original_name(name)
      .generated_name(to_generated_field_name(name))
      .field_type(self.mapper.map(&property.raw_type, required))
      .required(required)
      .overridden(overridden)
      .maybe_default_value_code(property.default_value.as_ref().map(ToString::to_string))
      .docs(docs)
      .deprecated(property.deprecated)
      .constraints(property.constraints.clone())
      .build()
  }

  /// Overrides match on the wire name, so `first_name` and `firstName` both
  /// survive and map to the same generated name. Both fields are kept.
  fn report_name_collisions(arena: &ModelArena) -> Vec<GenerationWarning> {
    let mut warnings = vec![];
    for model in arena.iter() {
      let mut seen = BTreeSet::new();
      let mut reported = BTreeSet::new();
      for field in &model.fields {
        let name = field.generated_name.as_str();
        if !seen.insert(name) && reported.insert(name) {
          tracing::warn!(schema = model.name(), field = name, "several properties share a generated name");
          warnings.push(GenerationWarning::DuplicateFieldName {
            schema_name: model.name().to_string(),
            generated_name: name.to_string(),
          });
        }
      }
    }
    warnings
  }

  /// A parent's requiredness flows into same-named fields of the child.
  fn propagate_parent_requiredness(arena: &mut ModelArena) {
    let view: &ModelArena = arena;
    let updates: Vec<Vec<(usize, bool)>> = view
      .iter()
      .map(|model| {
        let Some(parent) = model.shape.extend().and_then(|name| view.get(name)) else {
          return vec![];
        };
        model
          .fields
          .iter()
          .enumerate()
          .filter_map(|(idx, field)| {
            parent
              .field(&field.generated_name)
              .map(|parent_field| (idx, parent_field.required || field.required))
          })
          .collect()
      })
      .collect();

    for (model, updates) in arena.iter_mut().zip(updates) {
      for (idx, required) in updates {
        model.fields[idx].set_required(required);
      }
    }
  }
}

fn collect_ancestor_properties<'m>(arena: &'m ModelArena, model: &Model) -> IndexMap<String, InheritedProperty<'m>> {
  let mut collected = IndexMap::new();
  let mut visited = BTreeSet::from([model.name().to_string()]);
  for parent in &model.raw.all_of_parents {
    collect_from(arena, parent, &mut visited, &mut collected);
  }
  collected
}

fn collect_from<'m>(
  arena: &'m ModelArena,
  name: &str,
  visited: &mut BTreeSet<String>,
  collected: &mut IndexMap<String, InheritedProperty<'m>>,
) {
  if !visited.insert(name.to_string()) {
    return;
  }
  let Some(ancestor) = arena.get(name) else {
    return;
  };

  for grandparent in &ancestor.raw.all_of_parents {
    collect_from(arena, grandparent, visited, collected);
  }

  for (prop_name, property) in &ancestor.raw.own_properties {
    match collected.get_mut(prop_name) {
      Some(existing) => existing.required |= property.required,
      None => {
        collected.insert(
          prop_name.clone(),
          InheritedProperty {
            property,
            required: property.required,
          },
        );
      }
    }
  }
}

/// Discriminator property in effect for `model`, and whether the model declares
/// it itself.
///
/// Lookup order: own declaration, then the `allOf` ancestors depth-first, then
/// the `oneOf` union the model belongs to.
fn effective_discriminator<'m>(arena: &'m ModelArena, model: &'m Model) -> Option<(&'m str, bool)> {
  if let Some(own) = model.raw.discriminator_property_name.as_deref() {
    return Some((own, true));
  }

  let mut visited = BTreeSet::from([model.name()]);
  let mut stack: Vec<&str> = model.raw.all_of_parents.iter().rev().map(String::as_str).collect();
  while let Some(name) = stack.pop() {
    if !visited.insert(name) {
      continue;
    }
    let Some(ancestor) = arena.get(name) else {
      continue;
    };
    if let Some(property) = ancestor.raw.discriminator_property_name.as_deref() {
      return Some((property, false));
    }
    stack.extend(ancestor.raw.all_of_parents.iter().rev().map(String::as_str));
  }

  model
    .parent_one_of
    .as_deref()
    .and_then(|union| arena.get(union))
    .and_then(|union| union.raw.discriminator_property_name.as_deref())
    .map(|property| (property, false))
}

fn discriminator_field(name: &str, overridden: bool) -> Field {
  Field::builder()
    .original_name(name)
    .generated_name(to_generated_field_name(name))
    .field_type(FieldType::trivial(TrivialKind::String, false))
    .required(true)
    .overridden(overridden)
    .build()
}
