mod core;
mod gotest;
mod release;
mod runner;
mod shell;
mod steps;
mod sweep;
#[cfg(test)]
mod testing;
mod ui;

use crate::core::config::RunbookConfig;
use crate::core::error::{RunbookError, RunbookResult, print_error};
use crate::shell::SystemShell;
use crate::steps::StepSequence;
use crate::ui::Console;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Walk through a confluent-kafka-go release, one resumable step at a time
#[derive(Parser)]
#[command(name = "release-runbook")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Repository to release (commands run relative to it)
  #[arg(short = 'C', long = "repo", default_value = ".")]
  repo: PathBuf,

  /// Configuration file (default: release.toml, .release.toml or .config/release.toml in the repository)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Log what the runbook is doing to stderr
  #[arg(short, long)]
  verbose: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// stderr only; stdout belongs to the operator conversation
fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

fn run(cli: Cli) -> RunbookResult<()> {
  let config = RunbookConfig::load(&cli.repo, cli.config.as_deref())?;

  let shell = SystemShell::new(&cli.repo);
  let mut console = Console::stdio();
  let steps = StepSequence::standard();

  runner::run_session(&mut console, &shell, &config, &cli.repo, &steps)
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn handle_error(err: RunbookError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
