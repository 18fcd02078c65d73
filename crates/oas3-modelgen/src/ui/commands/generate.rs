use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    codegen::Visibility,
    config::{ConfigError, MappingConfig},
    metrics::GenerationStats,
    orchestrator::Orchestrator,
  },
  ui::{Colors, GenerateCommand},
  utils::spec::load_spec,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  Rust,
  Json,
}

impl OutputFormat {
  pub fn parse(s: &str) -> Result<Self, ConfigError> {
    match s {
      "rust" => Ok(Self::Rust),
      "json" => Ok(Self::Json),
      other => Err(ConfigError::InvalidFormat(other.to_string())),
    }
  }
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub format: OutputFormat,
  pub visibility: Visibility,
  pub mapping: MappingConfig,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> Result<Self, ConfigError> {
    let GenerateCommand {
      input,
      output,
      format,
      visibility,
      wide_integers,
      decimal_floats,
      decimal_doubles,
      package,
      verbose,
      quiet,
    } = command;

    let output = output.ok_or(ConfigError::MissingOutput)?;
    let format = OutputFormat::parse(&format)?;
    let visibility = Visibility::parse(&visibility).ok_or(ConfigError::InvalidVisibility(visibility))?;
    let mapping = MappingConfig::builder()
      .integer_maps_to_wide_int(wide_integers)
      .float_maps_to_arbitrary_precision(decimal_floats)
      .double_maps_to_arbitrary_precision(decimal_doubles)
      .package_name(package)
      .build();

    Ok(Self {
      input,
      output,
      format,
      visibility,
      mapping,
      verbose,
      quiet,
    })
  }

  async fn write_output(&self, content: String) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, content).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_resolving(&self) {
    let message = match self.config.format {
      OutputFormat::Rust => "Resolving models and rendering Rust...",
      OutputFormat::Json => "Resolving models...",
    };
    self.info(&message.with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    self.stat("Models resolved:", stats.models_resolved.to_string());
    self.stat(
      "",
      format!("{} data classes, {} open classes", stats.data_classes, stats.open_classes),
    );
    self.stat(
      "",
      format!(
        "{} sealed interfaces, {} polymorphic",
        stats.sealed_interfaces, stats.polymorphic_parents
      ),
    );
    self.stat("", format!("{} enums, {} type aliases", stats.enums, stats.type_aliases));
    self.stat(
      "APIs resolved:",
      format!("{} ({} operations)", stats.apis_resolved, stats.operations_resolved),
    );
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }
    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());
    if self.config.verbose && !self.config.quiet {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.primary())
        );
      }
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    let shown: Vec<_> = stats
      .warnings
      .iter()
      .filter(|warning| warning.is_degraded_output() || self.config.verbose)
      .collect();
    if shown.is_empty() {
      return;
    }

    println!();
    for warning in shown {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully resolved specification".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let spec = load_spec(&config.input).await?;

  logger.log_resolving();
  let orchestrator = Orchestrator::new(spec, config.mapping.clone(), config.visibility);
  let (content, stats) = match config.format {
    OutputFormat::Rust => {
      let output = orchestrator.generate_with_header(&config.input.display().to_string())?;
      (output.code, output.stats)
    }
    OutputFormat::Json => {
      let resolved = orchestrator.resolve();
      (resolved.to_json()?, resolved.stats)
    }
  };

  logger.print_statistics(&stats);
  logger.log_writing();
  config.write_output(content).await?;
  logger.log_success();
  Ok(())
}
