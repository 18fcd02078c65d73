use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::{
    codegen::Visibility,
    config::MappingConfig,
    orchestrator::{Orchestrator, ResolvedSpec},
  },
  ui::{Colors, colors::table_color, term_width},
  utils::spec::load_spec,
};

async fn resolve(input: &Path) -> anyhow::Result<ResolvedSpec> {
  let spec = load_spec(input).await?;
  Ok(Orchestrator::new(spec, MappingConfig::default(), Visibility::Public).resolve())
}

fn table(headers: &[&str], colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in headers {
    row.add_cell(Cell::new(header).fg(table_color(colors.label())));
  }
  table.set_header(row);
  table
}

/// One row per model: schema name, shape, parents and field count.
fn schema_rows(resolved: &ResolvedSpec) -> Vec<[String; 4]> {
  resolved
    .models
    .iter()
    .map(|model| {
      let parents: Vec<&str> = model
        .shape
        .extend()
        .into_iter()
        .chain(model.shape.interfaces().iter().map(String::as_str))
        .collect();
      [
        model.name().to_string(),
        model.shape.kind_name().to_string(),
        parents.join(", "),
        model.fields.len().to_string(),
      ]
    })
    .collect()
}

/// One row per operation, sorted by generated name.
fn operation_rows(resolved: &ResolvedSpec) -> Vec<[String; 4]> {
  let mut rows: Vec<[String; 4]> = resolved
    .apis
    .iter()
    .flat_map(|api| {
      api.operations.iter().map(|operation| {
        [
          operation.generated_name.clone(),
          operation.method.clone(),
          operation.path.clone(),
          api.generated_name.clone(),
        ]
      })
    })
    .collect();
  rows.sort();
  rows
}

pub async fn list_schemas(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let resolved = resolve(input).await?;
  let mut table = table(&["SCHEMA", "SHAPE", "PARENTS", "FIELDS"], colors);

  for [schema, shape, parents, fields] in schema_rows(&resolved) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(schema)
        .fg(table_color(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(shape).fg(table_color(colors.accent())));
    row.add_cell(Cell::new(parents).fg(table_color(colors.primary())));
    row.add_cell(
      Cell::new(fields)
        .fg(table_color(colors.primary()))
        .set_alignment(CellAlignment::Right),
    );
    table.add_row(row);
  }

  println!("{table}");
  Ok(())
}

pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let resolved = resolve(input).await?;
  let mut table = table(&["OPERATION", "METHOD", "PATH", "API"], colors);

  for [operation, method, path, api] in operation_rows(&resolved) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(operation)
        .fg(table_color(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(method)
        .fg(table_color(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(path).fg(table_color(colors.primary())));
    row.add_cell(Cell::new(api).fg(table_color(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");
  Ok(())
}
