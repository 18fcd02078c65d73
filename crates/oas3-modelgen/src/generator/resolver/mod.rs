mod fields;
mod polymorphism;
mod shapes;

pub(crate) use fields::FieldResolver;
pub(crate) use polymorphism::PolymorphismResolver;
pub(crate) use shapes::ShapeResolver;

use super::{
  analyzer::{CycleReport, InheritanceGraph, UsageAnalyzer},
  config::MappingConfig,
  metrics::GenerationWarning,
  model::ModelArena,
  raw::{RawPath, RawSchema},
  type_mapping::TypeMapper,
};

/// Output of the model pipeline.
#[derive(Debug)]
pub(crate) struct ResolvedModels {
  pub arena: ModelArena,
  pub cycles: CycleReport,
  pub warnings: Vec<GenerationWarning>,
}

/// Runs the model passes in their fixed order: usage, inheritance, shapes,
/// fields, polymorphism. Each pass sees the complete output of the one before.
pub(crate) struct ModelResolver<'a> {
  config: &'a MappingConfig,
}

impl<'a> ModelResolver<'a> {
  pub(crate) fn new(config: &'a MappingConfig) -> Self {
    Self { config }
  }

  pub(crate) fn resolve(&self, schemas: Vec<RawSchema>, paths: &[RawPath]) -> ResolvedModels {
    let usage = UsageAnalyzer::new(&schemas).analyze(paths);
    tracing::debug!(
      as_property = usage.used_as_property.len(),
      in_paths = usage.used_in_paths.len(),
      "schema usage analyzed"
    );
    let schemas = usage.apply(schemas);

    let mut arena = ModelArena::new(schemas, &self.config.package_name);
    let mut warnings = InheritanceGraph::build(&arena).apply(&mut arena);

    let mapper = TypeMapper::new(self.config);
    ShapeResolver::new(mapper).resolve(&mut arena);
    warnings.extend(FieldResolver::new(mapper).resolve(&mut arena));
    PolymorphismResolver::resolve(&mut arena);

    let cycles = CycleReport::detect(&arena);
    for cycle in cycles.cycles() {
      tracing::debug!(schemas = ?cycle, "reference cycle");
    }

    ResolvedModels {
      arena,
      cycles,
      warnings,
    }
  }
}

#[cfg(test)]
mod tests;
