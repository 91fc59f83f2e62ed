//! `tagger` command-line entrypoint.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

use tagger::classify::{self, AnnotateOptions, DEFAULT_PROMPT, OpenAiProvider};
use tagger::config::{Config, DotEnv};
use tagger::{FeedbackStore, recorder};

const DEFAULT_ENV_FILE: &str = ".env";

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Annotate signups with an ethnicity label, backed by a verified feedback cache
#[derive(Parser)]
#[command(name = "tagger", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// `.env` file to read (default `./.env`, optional); real environment variables win
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a CSV of signups with an ethnicity column
    Mark(MarkArgs),

    /// Record verified labels into the feedback store
    Record(RecordArgs),
}

#[derive(Args)]
struct MarkArgs {
    /// CSV containing signups; the name is the first column
    input: PathBuf,

    /// Where to write the annotated CSV (defaults to <input>_with_ethnicity.csv)
    output: Option<PathBuf>,

    /// Custom prompt instructions for the model
    #[arg(long)]
    prompt_file: Option<PathBuf>,

    /// Only process the first N signups
    #[arg(long)]
    limit: Option<usize>,

    /// The CSV has no header row
    #[arg(long)]
    no_header: bool,

    /// Override the model
    #[arg(long)]
    model: Option<String>,

    /// CSV of verified name → ethnicity mappings
    #[arg(long)]
    feedback_store: Option<PathBuf>,

    /// How many feedback examples to include in the prompt
    #[arg(long)]
    fewshot_count: Option<usize>,

    /// Always call the model even if the feedback store has a label
    #[arg(long)]
    force_api: bool,
}

#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("source").required(true).args(["name", "from_csv"])
))]
struct RecordArgs {
    /// Feedback CSV to append to
    #[arg(long)]
    store: Option<PathBuf>,

    /// Single name to record
    #[arg(long, requires = "ethnicity")]
    name: Option<String>,

    /// Ethnicity label for --name
    #[arg(long)]
    ethnicity: Option<String>,

    /// Optional notes for --name
    #[arg(long, default_value = "")]
    notes: String,

    /// CSV with name,ethnicity[,notes] columns
    #[arg(long)]
    from_csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let dotenv = match &cli.env_file {
        Some(path) => DotEnv::load_required(path)?,
        None => DotEnv::load(Path::new(DEFAULT_ENV_FILE))?,
    };
    let config = Config::from_env_with(&dotenv)?;

    match cli.command {
        Commands::Mark(args) => mark(config, args).await,
        Commands::Record(args) => record(config, args),
    }
}

async fn mark(mut config: Config, args: MarkArgs) -> anyhow::Result<()> {
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(path) = args.feedback_store {
        config.feedback_store = path;
    }
    if let Some(count) = args.fewshot_count {
        config.fewshot_count = count;
    }
    config.validate()?;

    let provider = OpenAiProvider::from_config(&config)?;
    let prompt = load_prompt(args.prompt_file.as_deref())?;

    if !args.input.exists() {
        bail!("Input CSV not found: {}", args.input.display());
    }
    let rows = classify::read_rows(&args.input)
        .with_context(|| format!("Failed to read CSV {}", args.input.display()))?;
    let output = classify::derive_output_path(&args.input, args.output.as_deref());

    let store = FeedbackStore::load(&config.feedback_store)?;
    tracing::info!(
        store = %store.path().display(),
        entries = store.len(),
        model = %config.model,
        "Feedback store loaded"
    );

    let options = AnnotateOptions {
        prompt,
        limit: args.limit,
        has_header: !args.no_header,
        fewshot_count: config.fewshot_count,
        force_api: args.force_api,
    };
    let annotated = classify::annotate_rows(rows, &store, &provider, &options)
        .await
        .context("Failed to classify names")?;

    classify::write_rows(&output, &annotated.rows)?;
    println!("Wrote annotated CSV to {}", output.display());
    Ok(())
}

fn record(config: Config, args: RecordArgs) -> anyhow::Result<()> {
    let path = args.store.unwrap_or(config.feedback_store);
    let mut store = FeedbackStore::load(&path)?;

    if let Some(source) = args.from_csv {
        let report = recorder::import_into(&mut store, &source)
            .with_context(|| format!("Failed to import CSV {}", source.display()))?;
        println!(
            "Imported {} feedback rows into {}",
            report.imported,
            store.path().display()
        );
        return Ok(());
    }

    let (Some(name), Some(ethnicity)) = (args.name, args.ethnicity) else {
        bail!("--ethnicity is required when using --name.");
    };
    recorder::record_one(&mut store, &name, &ethnicity, &args.notes)?;
    println!("Recorded feedback for {} -> {}", name.trim(), ethnicity.trim());
    Ok(())
}

fn load_prompt(path: Option<&Path>) -> anyhow::Result<String> {
    let Some(path) = path else {
        return Ok(DEFAULT_PROMPT.to_string());
    };
    if !path.exists() {
        bail!("Prompt file not found: {}", path.display());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read prompt file {}", path.display()))?;
    Ok(text.trim().to_string())
}
