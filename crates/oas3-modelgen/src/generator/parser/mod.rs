mod paths;
mod schemas;

use oas3::Spec;

use self::{paths::PathCollector, schemas::SchemaCollector};
use super::raw::{RawPath, RawSchema};

/// Reads the pipeline input out of a parsed spec. Never fails: content it
/// cannot interpret is skipped or typed as `Any`.
pub(crate) struct SpecParser<'a> {
  spec: &'a Spec,
}

impl<'a> SpecParser<'a> {
  pub(crate) fn new(spec: &'a Spec) -> Self {
    Self { spec }
  }

  /// Component schemas plus hoisted inline schemas, sorted by name.
  pub(crate) fn parse_schemas(&self) -> Vec<RawSchema> {
    SchemaCollector::new(self.spec).collect()
  }

  pub(crate) fn parse_paths(&self) -> Vec<RawPath> {
    PathCollector::new(self.spec).collect()
  }
}
