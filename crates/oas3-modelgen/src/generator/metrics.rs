use strum::Display;

use super::model::{ApiDescriptor, Model, ModelShape};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub models_resolved: usize,
  pub type_aliases: usize,
  pub enums: usize,
  pub sealed_interfaces: usize,
  pub data_classes: usize,
  pub open_classes: usize,
  pub polymorphic_parents: usize,
  pub apis_resolved: usize,
  pub operations_resolved: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_model(&mut self, model: &Model) {
    self.models_resolved += 1;
    match model.shape {
      ModelShape::TypeAlias { .. } => self.type_aliases += 1,
      ModelShape::EnumClass { .. } => self.enums += 1,
      ModelShape::SealedInterface { .. } => self.sealed_interfaces += 1,
      ModelShape::DataClass { .. } | ModelShape::Undecided => self.data_classes += 1,
      ModelShape::OpenClass { .. } => self.open_classes += 1,
    }
    if model.polymorphism.is_some() {
      self.polymorphic_parents += 1;
    }
  }

  pub fn record_models<'a>(&mut self, models: impl IntoIterator<Item = &'a Model>) {
    for model in models {
      self.record_model(model);
    }
  }

  pub fn record_apis(&mut self, apis: &[ApiDescriptor]) {
    self.apis_resolved += apis.len();
    self.operations_resolved += apis.iter().map(|api| api.operations.len()).sum::<usize>();
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    self.cycles_detected += cycles.len();
    self.cycle_details.extend(cycles);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

/// Non-fatal findings. Resolution always completes; these only explain where it
/// fell back.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Schema '{schema_name}' references unknown schema '{reference}'")]
  UnresolvedReference { schema_name: String, reference: String },
  #[strum(to_string = "Schema '{child}' appears in several oneOf unions; '{chosen}' wins over '{discarded}'")]
  AmbiguousOneOfParent {
    child: String,
    chosen: String,
    discarded: String,
  },
  #[strum(to_string = "Schema '{schema_name}' reached field resolution without a shape; emitted as an empty class")]
  UndecidedShape { schema_name: String },
  #[strum(to_string = "Schema '{schema_name}' has several properties named '{generated_name}'")]
  DuplicateFieldName { schema_name: String, generated_name: String },
  #[strum(to_string = "[{operation}] {message}")]
  OperationSpecific { operation: String, message: String },
}

impl GenerationWarning {
  /// Warnings that lose information in the output, shown even without `--verbose`.
  pub fn is_degraded_output(&self) -> bool {
    matches!(self, Self::UndecidedShape { .. } | Self::AmbiguousOneOfParent { .. })
  }
}
