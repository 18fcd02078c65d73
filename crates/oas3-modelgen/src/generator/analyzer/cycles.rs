use std::collections::BTreeMap;

use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::generator::{
  model::{Model, ModelArena},
  raw::RawType,
};

/// Strongly connected schema groups, i.e. schemas that (transitively) contain
/// themselves.
///
/// Edges follow containment: properties (own and flattened), array items and
/// `oneOf` members. `allOf` links are left out because inherited properties
/// already show up as flattened fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CycleReport {
  cycles: Vec<Vec<String>>,
  component_of: BTreeMap<String, usize>,
}

impl CycleReport {
  pub(crate) fn detect(arena: &ModelArena) -> Self {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for model in arena {
      graph.add_node(model.name());
      for dep in contained_schemas(model).filter(|dep| arena.contains(dep)) {
        graph.add_edge(model.name(), dep, ());
      }
    }

    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| {
        let mut names: Vec<String> = scc.into_iter().map(String::from).collect();
        names.sort();
        names
      })
      .collect();
    cycles.sort();

    let component_of = cycles
      .iter()
      .enumerate()
      .flat_map(|(idx, cycle)| cycle.iter().map(move |name| (name.clone(), idx)))
      .collect();

    Self { cycles, component_of }
  }

  /// Whether `from` and `to` sit in the same cycle.
  pub(crate) fn same_cycle(&self, from: &str, to: &str) -> bool {
    match (self.component_of.get(from), self.component_of.get(to)) {
      (Some(a), Some(b)) => a == b,
      _ => false,
    }
  }

  pub(crate) fn cycles(&self) -> &[Vec<String>] {
    &self.cycles
  }
}

fn contained_schemas(model: &Model) -> impl Iterator<Item = &str> {
  model
    .raw
    .own_properties
    .values()
    .filter_map(|prop| prop.raw_type.referenced_schema())
    .chain(model.raw.array_item_type.iter().filter_map(RawType::referenced_schema))
    .chain(model.raw.one_of_children.iter().map(String::as_str))
    .chain(model.fields.iter().filter_map(|field| field.field_type.referenced_schema()))
}
