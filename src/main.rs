use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ostad::Professor;
use ostad::classifier::{IntentDataset, TfIdfClassifier};
use ostad::conversation::Chat;
use ostad::repl::{run_chat, run_math};
use ostad::responses::{Composer, ResponseBank};
use ostad::session::Session;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Response templates (JSON object of category -> templates)
  #[arg(
    long,
    global = true,
    env = "OSTAD_RESPONSES",
    default_value = "data/responses.json"
  )]
  responses: PathBuf,

  /// Intent dataset for the chat mode
  #[arg(
    long,
    global = true,
    env = "OSTAD_INTENTS",
    default_value = "data/intents.json"
  )]
  intents: PathBuf,

  /// Seed for template choice
  #[arg(long, global = true)]
  seed: Option<u64>,

  /// Log filter, e.g. `debug` or `ostad=trace` (defaults to RUST_LOG, then
  /// `warn`)
  #[arg(long, global = true)]
  log_level: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Interactive math session
  Math,
  /// Interactive conversation with math hand-off
  Chat,
  /// Answer a single math request
  Eval {
    /// The request, e.g. "مشتق x**3 + 2*x رو بگیر"
    text: String,
  },
}

fn init_tracing(level: Option<&str>) {
  let filter = match level {
    Some(level) => EnvFilter::new(level),
    None => EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| EnvFilter::new("warn")),
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.log_level.as_deref());

  let bank = ResponseBank::load_or_fallback(&cli.responses)
    .context("loading response templates")?;
  let composer = match cli.seed {
    Some(seed) => Composer::with_seed(bank, seed),
    None => Composer::new(bank),
  };
  let mut professor = Professor::new(composer);

  match cli.command {
    Commands::Math => {
      run_math(&mut professor, io::stdin().lock(), io::stdout())?
    }
    Commands::Chat => {
      let dataset = IntentDataset::load(&cli.intents)
        .context("loading intent dataset")?;
      let classifier = TfIdfClassifier::train(&dataset);
      let mut chat = Chat::new(classifier, dataset, professor);
      run_chat(&mut chat, io::stdin().lock(), io::stdout())?;
    }
    Commands::Eval { text } => {
      println!("{}", professor.math_reply(&text, &Session::new()));
    }
  }
  Ok(())
}
