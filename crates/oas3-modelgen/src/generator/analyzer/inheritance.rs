use std::collections::BTreeMap;

use itertools::Itertools;

use crate::generator::{metrics::GenerationWarning, model::ModelArena};

/// Reverse edges of the composition graph.
///
/// `all_of_children[P]` lists every schema naming `P` in `allOf`, in arena
/// order. `one_of_parent[C]` is the union listing `C` in `oneOf`; a child is
/// assumed to belong to a single union and the last writer wins.
#[derive(Debug, Default)]
pub(crate) struct InheritanceGraph {
  all_of_children: BTreeMap<String, Vec<String>>,
  one_of_parent: BTreeMap<String, String>,
  warnings: Vec<GenerationWarning>,
}

impl InheritanceGraph {
  pub(crate) fn build(arena: &ModelArena) -> Self {
    let mut graph = Self::default();

    for model in arena {
      for parent in model.raw.all_of_parents.iter().unique() {
        if !arena.contains(parent) {
          graph.warn_unresolved(model.name(), parent);
          continue;
        }
        graph
          .all_of_children
          .entry(parent.clone())
          .or_default()
          .push(model.name().to_string());
      }

      for child in &model.raw.one_of_children {
        if !arena.contains(child) {
          graph.warn_unresolved(model.name(), child);
          continue;
        }
        let previous = graph.one_of_parent.insert(child.clone(), model.name().to_string());
        if let Some(previous) = previous.filter(|previous| previous != model.name()) {
          tracing::warn!(child = %child, chosen = %model.name(), discarded = %previous, "schema is listed by several oneOf unions");
          graph.warnings.push(GenerationWarning::AmbiguousOneOfParent {
            child: child.clone(),
            chosen: model.name().to_string(),
            discarded: previous,
          });
        }
      }
    }

    graph
  }

  fn warn_unresolved(&mut self, schema_name: &str, reference: &str) {
    tracing::debug!(schema = schema_name, reference, "skipping composition edge to unknown schema");
    self.warnings.push(GenerationWarning::UnresolvedReference {
      schema_name: schema_name.to_string(),
      reference: reference.to_string(),
    });
  }

  pub(crate) fn children_of(&self, parent: &str) -> &[String] {
    self.all_of_children.get(parent).map_or(&[], Vec::as_slice)
  }

  pub(crate) fn one_of_parent(&self, child: &str) -> Option<&str> {
    self.one_of_parent.get(child).map(String::as_str)
  }

  /// Writes the reverse edges onto the models, replacing any earlier values.
  pub(crate) fn apply(self, arena: &mut ModelArena) -> Vec<GenerationWarning> {
    for model in arena.iter_mut() {
      model.all_of_children = self.children_of(model.name()).to_vec();
      model.parent_one_of = self.one_of_parent(model.name()).map(str::to_string);
    }
    self.warnings
  }
}
