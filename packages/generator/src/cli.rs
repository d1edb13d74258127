//! Command-line interface for the generator.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::HuggingFaceClient;
use crate::config::{GeneratorConfig, DEFAULT_CARD_COUNT};
use crate::error::{GeneratorError, Result};
use crate::export::{export, ExportFormat};
use crate::extract::{choose_input, extract_file};
use crate::generate::generate_flashcards;
use crate::sanitize::sanitize_response;
use crate::types::{Flashcard, GenerationRequest, Subject};

/// Flashcards - Turn study notes into question/answer flashcards.
#[derive(Parser)]
#[command(name = "flashcards")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate flashcards from a .txt/.pdf file or pasted text.
    ///
    /// Reads the API token from HF_API_TOKEN.
    Generate {
        /// Source file (.txt or .pdf)
        file: Option<PathBuf>,

        /// Text to use instead of a file (wins when not blank)
        #[arg(short, long)]
        text: Option<String>,

        /// Number of flashcards to generate (5-25)
        #[arg(short = 'n', long, default_value_t = DEFAULT_CARD_COUNT)]
        count: u32,

        /// Subject hint (General, Biology, History, Computer Science, Physics)
        #[arg(short, long, default_value = "General", value_parser = parse_subject)]
        subject: Subject,

        /// Output format (csv, quizlet, json)
        #[arg(short, long, default_value = "csv", value_parser = parse_format)]
        format: ExportFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Inference endpoint URL (overrides FLASHCARDS_API_URL)
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Print the repaired form of raw model output (file or stdin).
    Sanitize {
        /// File with raw model output (default: stdin)
        file: Option<PathBuf>,
    },

    /// Convert a saved JSON deck to another format.
    Export {
        /// JSON file with a list of {question, answer} objects
        deck: PathBuf,

        /// Output format (csv, quizlet, json)
        #[arg(short, long, default_value = "quizlet", value_parser = parse_format)]
        format: ExportFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_subject(value: &str) -> std::result::Result<Subject, String> {
    Subject::parse(value).map_err(|e| e.to_string())
}

fn parse_format(value: &str) -> std::result::Result<ExportFormat, String> {
    ExportFormat::parse(value)
        .ok_or_else(|| format!("unknown format '{value}', expected csv, quizlet or json"))
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            file,
            text,
            count,
            subject,
            format,
            output,
            api_url,
        } => {
            generate_command(
                file.as_deref(),
                text.as_deref(),
                count,
                subject,
                format,
                output.as_deref(),
                api_url,
            )
            .await
        }
        Commands::Sanitize { file } => sanitize_command(file.as_deref()),
        Commands::Export {
            deck,
            format,
            output,
        } => export_command(&deck, format, output.as_deref()),
    }
}

/// Execute the generate command.
async fn generate_command(
    file: Option<&Path>,
    text: Option<&str>,
    count: u32,
    subject: Subject,
    format: ExportFormat,
    output: Option<&Path>,
    api_url: Option<String>,
) -> Result<()> {
    // Pasted text wins, so only read the file when it is needed
    let pasted = text.unwrap_or_default();
    let file_text = match file {
        Some(path) if pasted.trim().is_empty() => Some(extract_file(path)?),
        _ => None,
    };
    let input = choose_input(pasted, file_text.as_deref()).ok_or(GeneratorError::EmptyInput)?;

    let mut config = GeneratorConfig::from_env()?;
    if let Some(url) = api_url {
        config.api_url = url;
    }
    let client = HuggingFaceClient::new(&config)?;

    let request = GenerationRequest::new(input)
        .with_card_count(count)
        .with_subject(subject);

    eprintln!(
        "{} {} {} flashcards",
        style("Generating").bold(),
        style(count).cyan(),
        style(subject).green()
    );

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Waiting for the model (this can take a while when it is loading)...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let generation = match generate_flashcards(&client, &config, &request).await {
        Ok(generation) => generation,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    eprintln!("  Cards: {}", style(generation.cards.len()).green());
    if !generation.warnings.is_empty() {
        eprintln!(
            "  Skipped: {}",
            style(generation.warnings.len()).yellow().bold()
        );
        for warning in &generation.warnings {
            eprintln!("    {}", style(warning).yellow());
        }
    }

    write_output(&export(&generation.cards, format)?, output)
}

/// Execute the sanitize command.
fn sanitize_command(file: Option<&Path>) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    println!("{}", sanitize_response(&raw));
    Ok(())
}

/// Execute the export command.
fn export_command(deck: &Path, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let content = std::fs::read_to_string(deck)?;
    let cards: Vec<Flashcard> = serde_json::from_str(&content)?;
    write_output(&export(&cards, format)?, output)
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            eprintln!(
                "{} {}",
                style("Saved to:").green().bold(),
                path.display()
            );
        }
        None => println!("{content}"),
    }
    Ok(())
}
