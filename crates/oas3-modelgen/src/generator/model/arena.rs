use std::collections::BTreeMap;

use serde::Serialize;

use super::Model;
use crate::generator::raw::RawSchema;

/// Flat store of models keyed by original schema name.
///
/// All cross-model links (parents, children, refs) are names resolved through
/// [`ModelArena::get`], so construction order never matters and dangling names
/// simply miss.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModelArena {
  models: Vec<Model>,
  #[serde(skip)]
  index: BTreeMap<String, usize>,
}

impl ModelArena {
  #[must_use]
  pub fn new(schemas: Vec<RawSchema>, package_name: &str) -> Self {
    schemas
      .into_iter()
      .map(|schema| Model::new(schema, package_name))
      .collect()
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&Model> {
    self.index.get(name).map(|&idx| &self.models[idx])
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.index.contains_key(name)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Model> {
    self.models.iter()
  }

  pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Model> {
    self.models.iter_mut()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.models.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.models.is_empty()
  }
}

impl FromIterator<Model> for ModelArena {
  fn from_iter<I: IntoIterator<Item = Model>>(iter: I) -> Self {
    let mut arena = Self::default();
    for model in iter {
      match arena.index.get(model.name()) {
        Some(&idx) => arena.models[idx] = model,
        None => {
          arena.index.insert(model.name().to_string(), arena.models.len());
          arena.models.push(model);
        }
      }
    }
    arena
  }
}

impl<'a> IntoIterator for &'a ModelArena {
  type Item = &'a Model;
  type IntoIter = std::slice::Iter<'a, Model>;

  fn into_iter(self) -> Self::IntoIter {
    self.models.iter()
  }
}
