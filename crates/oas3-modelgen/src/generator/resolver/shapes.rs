use std::collections::BTreeMap;

use crate::generator::{
  model::{FieldType, Model, ModelArena, ModelShape},
  type_mapping::TypeMapper,
};

/// Shape category of a parent as seen by the linkage pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentKind {
  Sealed,
  Class,
  Inert,
}

impl From<&ModelShape> for ParentKind {
  fn from(shape: &ModelShape) -> Self {
    match shape {
      ModelShape::SealedInterface { .. } => Self::Sealed,
      ModelShape::DataClass { .. } | ModelShape::OpenClass { .. } => Self::Class,
      ModelShape::Undecided | ModelShape::TypeAlias { .. } | ModelShape::EnumClass { .. } => Self::Inert,
    }
  }
}

/// Decides one [`ModelShape`] per model.
///
/// Pass one looks at each schema alone. Pass two needs every pass-one decision
/// and links class parents (`extend`, single inheritance, first class parent in
/// `allOf` order wins) and interfaces (`implements`, deduplicated, plus the
/// `oneOf` union the schema belongs to).
pub(crate) struct ShapeResolver<'a> {
  mapper: TypeMapper<'a>,
}

impl<'a> ShapeResolver<'a> {
  pub(crate) fn new(mapper: TypeMapper<'a>) -> Self {
    Self { mapper }
  }

  pub(crate) fn resolve(&self, arena: &mut ModelArena) {
    self.decide_local_shapes(arena);
    Self::link_parents(arena);
  }

  pub(crate) fn decide_local_shapes(&self, arena: &mut ModelArena) {
    for model in arena.iter_mut() {
      model.shape = self.local_shape(model);
    }
  }

  fn local_shape(&self, model: &Model) -> ModelShape {
    let raw = &model.raw;

    if raw.is_array_schema
      && let Some(item_type) = &raw.array_item_type
    {
      return ModelShape::TypeAlias {
        target: FieldType::list(self.mapper.map(item_type, true), false),
      };
    }

    if !raw.enum_values.is_empty() {
      return ModelShape::EnumClass {
        values: raw.enum_values.clone(),
      };
    }

    let has_children = !model.all_of_children.is_empty();
    let used_concretely = raw.used_in_paths || raw.used_as_property;

    if !raw.one_of_children.is_empty() || (has_children && !used_concretely) {
      ModelShape::sealed_interface()
    } else if !has_children {
      ModelShape::data_class()
    } else {
      ModelShape::open_class()
    }
  }

  pub(crate) fn link_parents(arena: &mut ModelArena) {
    let kinds: BTreeMap<String, ParentKind> = arena
      .iter()
      .map(|model| (model.name().to_string(), ParentKind::from(&model.shape)))
      .collect();
    let kind_of = |name: &str| kinds.get(name).copied().unwrap_or(ParentKind::Inert);

    for model in arena.iter_mut() {
      let mut extend: Option<String> = None;
      let mut interfaces: Vec<String> = vec![];

      for parent in &model.raw.all_of_parents {
        match kind_of(parent) {
          ParentKind::Sealed => push_unique(&mut interfaces, parent),
          ParentKind::Class if extend.is_none() => extend = Some(parent.clone()),
          ParentKind::Class => {
            tracing::debug!(
              schema = model.name(),
              kept = extend.as_deref(),
              ignored = %parent,
              "single inheritance: ignoring additional class parent"
            );
          }
          ParentKind::Inert => {}
        }
      }

      if let Some(union) = &model.parent_one_of {
        push_unique(&mut interfaces, union);
      }

      model.shape = match &model.shape {
        ModelShape::DataClass { .. } => ModelShape::DataClass {
          extend,
          implements: interfaces,
        },
        ModelShape::OpenClass { .. } => ModelShape::OpenClass {
          extend,
          implements: interfaces,
        },
        // An interface cannot extend a class; only sealed parents carry over.
        ModelShape::SealedInterface { .. } => ModelShape::SealedInterface { extends: interfaces },
        other @ (ModelShape::Undecided | ModelShape::TypeAlias { .. } | ModelShape::EnumClass { .. }) => other.clone(),
      };
    }
  }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
  if !names.iter().any(|existing| existing == name) {
    names.push(name.to_string());
  }
}
