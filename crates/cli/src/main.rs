//! stackdash: service metrics dashboards from deployment stacks.

mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// Generate service metrics dashboards from deployment stacks
#[derive(Parser)]
#[command(name = "stackdash")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List the resources discovered in a construct tree or template
  Discover {
    /// Construct tree (JSON) or CloudFormation template
    input: PathBuf,

    /// Dashboard configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    output_format: OutputFormat,
  },

  /// Assemble a dashboard and write its body as JSON
  Generate {
    /// Construct tree (JSON) or CloudFormation template
    input: PathBuf,

    /// Dashboard configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the dashboard body
    #[arg(short, long, default_value = "dashboard.json")]
    out: PathBuf,

    /// Dashboard name, overriding the configured one
    #[arg(long)]
    name: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    output_format: OutputFormat,
  },
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match cli.command {
    Commands::Discover {
      input,
      config,
      output_format,
    } => cmd::cmd_discover(&input, config.as_deref(), cli.verbose, output_format),
    Commands::Generate {
      input,
      config,
      out,
      name,
      output_format,
    } => cmd::cmd_generate(&input, config.as_deref(), &out, name, output_format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
