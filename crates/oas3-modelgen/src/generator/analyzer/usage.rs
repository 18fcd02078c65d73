use std::collections::{BTreeMap, BTreeSet};

use crate::generator::raw::{RawPath, RawProperty, RawSchema};

/// Schema names reachable from properties and from operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SchemaUsage {
  pub used_as_property: BTreeSet<String>,
  pub used_in_paths: BTreeSet<String>,
}

impl SchemaUsage {
  /// Stamps the usage flags onto the schemas. They are read-only afterwards.
  pub(crate) fn apply(&self, schemas: Vec<RawSchema>) -> Vec<RawSchema> {
    schemas
      .into_iter()
      .map(|mut schema| {
        schema.used_as_property = self.used_as_property.contains(&schema.original_name);
        schema.used_in_paths = self.used_in_paths.contains(&schema.original_name);
        schema
      })
      .collect()
  }
}

/// Walks the raw schema graph to find which schemas are used concretely.
///
/// Every property type, array item, and `allOf`/`oneOf`/`anyOf` branch is an
/// edge, including those nested in inline property and operation schemas.
/// Each root gets its own visited set, so cyclic schemas terminate and
/// independent walks never see each other's state. Names missing from the
/// schema set are not edges.
pub(crate) struct UsageAnalyzer<'a> {
  schemas: BTreeMap<&'a str, &'a RawSchema>,
}

impl<'a> UsageAnalyzer<'a> {
  pub(crate) fn new(schemas: &'a [RawSchema]) -> Self {
    Self {
      schemas: schemas
        .iter()
        .map(|schema| (schema.original_name.as_str(), schema))
        .collect(),
    }
  }

  pub(crate) fn analyze(&self, paths: &[RawPath]) -> SchemaUsage {
    let mut usage = SchemaUsage::default();

    for schema in self.schemas.values() {
      for root in schema.own_properties.values().flat_map(RawProperty::referenced_schemas) {
        usage.used_as_property.extend(self.reachable_from(root));
      }
    }

    for operation in paths.iter().flat_map(|path| &path.operations) {
      for root in operation.referenced_schemas() {
        usage.used_in_paths.extend(self.reachable_from(root));
      }
    }

    usage
  }

  /// All schema names reachable from `root`, `root` included when it exists.
  pub(crate) fn reachable_from(&self, root: &str) -> BTreeSet<String> {
    let mut visited = BTreeSet::new();
    self.visit(root, &mut visited);
    visited
  }

  fn visit(&self, name: &str, visited: &mut BTreeSet<String>) {
    let Some(schema) = self.schemas.get(name) else {
      return;
    };
    if !visited.insert(name.to_string()) {
      return;
    }
    for next in schema.outgoing_refs() {
      self.visit(next, visited);
    }
  }
}
