//! Entry point for the resolution pipeline.
//!
//! [`Orchestrator`] owns a parsed spec and runs parser, model passes and API
//! resolution in order, then hands the result to the Rust emitter or to serde.
//!
//! ```no_run
//! # fn example() -> anyhow::Result<()> {
//! let spec = oas3::from_json(std::fs::read_to_string("openapi.json")?)?;
//! let orchestrator = Orchestrator::new(spec, MappingConfig::default(), Visibility::Public);
//! let output = orchestrator.generate_with_header("openapi.json")?;
//! std::fs::write("models.rs", output.code)?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;

use anyhow::Context;
use serde::Serialize;

use super::{
  analyzer::CycleReport,
  apis::ApiResolver,
  codegen::{self, RenderContext, Visibility},
  config::MappingConfig,
  metrics::{GenerationStats, GenerationWarning},
  model::{ApiDescriptor, ApiOperation, ModelArena},
  parser::SpecParser,
  resolver::{ModelResolver, ResolvedModels},
  type_mapping::TypeMapper,
};

pub struct Orchestrator {
  spec: oas3::Spec,
  config: MappingConfig,
  visibility: Visibility,
}

/// Info block of the spec, used for the generated file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMetadata {
  pub title: String,
  pub version: String,
  pub description: Option<String>,
}

/// Models and API descriptors after every pass has run.
#[derive(Debug, Serialize)]
pub struct ResolvedSpec {
  pub models: ModelArena,
  pub apis: Vec<ApiDescriptor>,
  #[serde(skip)]
  pub stats: GenerationStats,
  #[serde(skip)]
  pub(crate) cycles: CycleReport,
}

#[derive(Debug)]
pub struct GeneratedOutput {
  pub code: String,
  pub stats: GenerationStats,
}

impl Orchestrator {
  pub fn new(spec: oas3::Spec, config: MappingConfig, visibility: Visibility) -> Self {
    Self {
      spec,
      config,
      visibility,
    }
  }

  pub fn metadata(&self) -> CodeMetadata {
    CodeMetadata {
      title: self.spec.info.title.clone(),
      version: self.spec.info.version.clone(),
      description: self.spec.info.description.clone(),
    }
  }

  /// Runs parser, usage, inheritance, shapes, fields, polymorphism and API
  /// resolution. Never fails; anything it cannot interpret ends up in
  /// [`GenerationStats::warnings`].
  pub fn resolve(&self) -> ResolvedSpec {
    let parser = SpecParser::new(&self.spec);
    let schemas = parser.parse_schemas();
    let paths = parser.parse_paths();
    tracing::debug!(schemas = schemas.len(), groups = paths.len(), "spec parsed");

    let ResolvedModels {
      arena,
      cycles,
      warnings,
    } = ModelResolver::new(&self.config).resolve(schemas, &paths);
    let apis = ApiResolver::new(TypeMapper::new(&self.config)).resolve(&paths);
    tracing::debug!(models = arena.len(), apis = apis.len(), "resolution finished");

    let mut stats = GenerationStats::default();
    stats.record_models(&arena);
    stats.record_apis(&apis);
    stats.record_cycles(cycles.cycles().to_vec());
    stats.record_warnings(warnings);
    stats.record_warnings(unknown_operation_refs(&arena, &apis));

    ResolvedSpec {
      models: arena,
      apis,
      stats,
      cycles,
    }
  }

  /// Rust source for the resolved spec, without a file header.
  pub fn generate(&self) -> anyhow::Result<GeneratedOutput> {
    let resolved = self.resolve();
    let ctx = RenderContext::new(&resolved.models, &resolved.cycles, self.visibility);
    let tokens = codegen::generate(ctx, &resolved.apis);
    let syntax_tree = syn::parse2(tokens).context("emitted tokens do not form a valid Rust file")?;

    Ok(GeneratedOutput {
      code: prettyplease::unparse(&syntax_tree),
      stats: resolved.stats,
    })
  }

  pub fn generate_with_header(&self, source_path: &str) -> anyhow::Result<GeneratedOutput> {
    let GeneratedOutput { code, stats } = self.generate()?;
    let metadata = self.metadata();

    let description = metadata
      .description
      .as_deref()
      .map_or_else(|| String::from("No description provided"), |text| text.replace('\n', "\n//! "));

    let code = format!(
      r"//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! {}
//! Source: {}
//! Version: {}
//! Generated by `oas3-modelgen`
//!
//! {}
#![allow(clippy::large_enum_variant)]

{}",
      metadata.title, source_path, metadata.version, description, code
    );

    Ok(GeneratedOutput { code, stats })
  }

  /// Pretty JSON of the resolved models and API descriptors.
  pub fn to_json(&self) -> anyhow::Result<String> {
    self.resolve().to_json()
  }
}

impl ResolvedSpec {
  pub fn to_json(&self) -> anyhow::Result<String> {
    serde_json::to_string_pretty(self).context("failed to serialize resolved spec")
  }
}

/// Operations pointing at schemas that never made it into the arena.
fn unknown_operation_refs(arena: &ModelArena, apis: &[ApiDescriptor]) -> Vec<GenerationWarning> {
  apis
    .iter()
    .flat_map(|api| &api.operations)
    .flat_map(|operation| {
      let missing: BTreeSet<&str> = referenced_schemas(operation)
        .filter(|schema| !arena.contains(schema))
        .collect();
      missing.into_iter().map(move |schema| GenerationWarning::OperationSpecific {
        operation: format!("{} {}", operation.method, operation.path),
        message: format!("references unknown schema '{schema}'"),
      })
    })
    .collect()
}

fn referenced_schemas(operation: &ApiOperation) -> impl Iterator<Item = &str> {
  operation
    .params
    .iter()
    .map(|param| &param.field_type)
    .chain(operation.body.iter().map(|body| &body.field_type))
    .chain(
      operation
        .success_response
        .iter()
        .filter_map(|response| response.field_type.as_ref()),
    )
    .filter_map(|field_type| field_type.referenced_schema())
}
