use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-modelgen")]
#[command(author, version, about = "Resolves OpenAPI v3 schemas into models and API descriptors")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

impl Cli {
  pub fn verbose(&self) -> bool {
    matches!(&self.command, Commands::Generate(command) if command.verbose)
  }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Resolve an OpenAPI specification and write Rust models or JSON
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Path to the OpenAPI specification (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Path where the output will be written
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Output format: rust or json
  #[arg(long, value_name = "FORMAT", default_value = "rust")]
  pub format: String,

  /// Visibility level for generated types: public, crate or file
  #[arg(long, value_name = "VISIBILITY", default_value = "public")]
  pub visibility: String,

  /// Map integers without a format to 64-bit
  #[arg(long, default_value_t = false)]
  pub wide_integers: bool,

  /// Map `format: float` to arbitrary precision decimals
  #[arg(long, default_value_t = false)]
  pub decimal_floats: bool,

  /// Map `format: double` and bare numbers to arbitrary precision decimals
  #[arg(long, default_value_t = false)]
  pub decimal_doubles: bool,

  /// Package (namespace) recorded on every model
  #[arg(long, value_name = "NAME", default_value = "models")]
  pub package: String,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every component schema with its resolved shape
  Schemas {
    /// Path to the OpenAPI specification (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
  /// List all operations defined in the OpenAPI specification
  Operations {
    /// Path to the OpenAPI specification (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
