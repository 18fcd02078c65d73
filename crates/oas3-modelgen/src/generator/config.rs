use serde::Serialize;

pub(crate) const DEFAULT_PACKAGE_NAME: &str = "models";

/// Options consumed by the resolution pipeline.
///
/// The numeric flags only steer primitive kind selection in
/// [`TypeMapper`](super::type_mapping::TypeMapper); shape and field resolution
/// ignore them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, bon::Builder)]
pub struct MappingConfig {
  #[builder(default)]
  pub integer_maps_to_wide_int: bool,
  #[builder(default)]
  pub float_maps_to_arbitrary_precision: bool,
  #[builder(default)]
  pub double_maps_to_arbitrary_precision: bool,
  #[builder(into, default = DEFAULT_PACKAGE_NAME.to_string())]
  pub package_name: String,
}

impl Default for MappingConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

/// Fatal configuration problems. Nothing else in the crate aborts a run.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("invalid visibility '{0}': expected one of public, crate, file")]
  InvalidVisibility(String),
  #[error("invalid output format '{0}': expected one of rust, json")]
  InvalidFormat(String),
  #[error("output path (-o) is required")]
  MissingOutput,
}
