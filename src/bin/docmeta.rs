use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docmeta::config::Config;
use docmeta::utils::preview;
use docmeta::Pipeline;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docmeta")]
#[command(about = "Automated metadata generator for PDF, DOCX, TXT and image documents")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to settings.toml (overrides config discovery)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the text of a document and print a preview
    #[command(name = "extract")]
    Extract {
        /// Document to extract
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Number of characters to preview (overrides config)
        #[arg(long)]
        chars: Option<usize>,
    },
    /// Generate metadata for a document and print it as JSON
    #[command(name = "generate")]
    Generate {
        /// Document to describe
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Author to record
        #[arg(long)]
        author: Option<String>,
        /// Number of keywords (overrides config)
        #[arg(long)]
        top_n: Option<usize>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docmeta=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error processing file: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    match cli.command {
        Commands::Extract { file, chars } => {
            let pipeline = load_pipeline(&config).await?;
            let (file_name, bytes) = read_upload(&file).await?;
            let text = pipeline.extract_upload(&file_name, bytes).await?;

            let chars = chars.unwrap_or(config.preview.chars);
            println!("{}", preview(&text, chars));
        }
        Commands::Generate {
            file,
            author,
            top_n,
        } => {
            if let Some(top_n) = top_n {
                config.keywords.top_n = top_n;
            }
            let pipeline = load_pipeline(&config).await?;
            let (file_name, bytes) = read_upload(&file).await?;
            let text = pipeline.extract_upload(&file_name, bytes).await?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
            spinner.set_message("Generating metadata...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let result = pipeline
                .generate_metadata(&text, &file_name, author.as_deref())
                .await;
            spinner.finish_and_clear();

            let record = result?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}

async fn load_pipeline(config: &Config) -> Result<Pipeline> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Loading models...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = Pipeline::load(config).await;
    spinner.finish_and_clear();
    Ok(result?)
}

/// Read a file as an upload: its bare file name plus its bytes
async fn read_upload(path: &Path) -> Result<(String, Vec<u8>)> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file: {}", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((file_name, bytes))
}
