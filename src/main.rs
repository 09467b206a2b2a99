use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use page_sieve::config::{Config, DEFAULT_PAGE_PREFIX, DEFAULT_SPLIT_OUTPUT};
use page_sieve::{batch, pdf};

#[derive(Parser)]
#[command(name = "page_sieve", version, about = "Split PDFs into page text and flag pages without real content")]
struct Cli {
    /// TOML file overriding keyword lists and thresholds
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from each page of a PDF into separate text files
    Split {
        input: PathBuf,
        /// Output directory (defaults to the input file's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Split a PDF into one PDF per page
    SplitPdf {
        input: PathBuf,
        #[arg(short, long, default_value = DEFAULT_SPLIT_OUTPUT)]
        output: PathBuf,
        #[arg(short, long, default_value = DEFAULT_PAGE_PREFIX)]
        prefix: String,
    },
    /// Show information about a PDF file
    Info { input: PathBuf },
    /// Classify every .txt file in a directory and write .no-content markers
    Analyze {
        dir: PathBuf,
        /// Classify without writing markers
        #[arg(long)]
        dry_run: bool,
        /// Also write the summary as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Classify a single text file and print the verdict
    Classify {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Split + analyze in one pipeline
    Run {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Split { input, output } => {
            let files = pdf::extract_pages_to_text(&input, output.as_deref())?;
            println!("Text extraction completed successfully! ({} pages)", files.len());
            Ok(())
        }
        Commands::SplitPdf { input, output, prefix } => {
            let files = pdf::split_to_pages(&input, &output, &prefix)?;
            println!("PDF splitting completed successfully! ({} pages)", files.len());
            Ok(())
        }
        Commands::Info { input } => {
            let info = pdf::info(&input)?;
            println!("File: {}", info.file_name);
            println!("Pages: {}", info.page_count);
            println!("Size: {:.2} MB", info.size_mb());
            Ok(())
        }
        Commands::Analyze { dir, dry_run, report } => {
            let dir = absolute(&dir);
            println!("Analyzing content in: {}", dir.display());
            if dry_run {
                println!("Dry run: no marker files will be written.\n");
            } else {
                println!("This will create .no-content marker files for empty, TOC, or non-content files.\n");
            }
            let summary = batch::analyze_directory(&dir, &config, dry_run)?;
            summary.print();
            if let Some(path) = report {
                let json = serde_json::to_string_pretty(&summary)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write report {}", path.display()))?;
                println!("Report written to {}", path.display());
            }
            Ok(())
        }
        Commands::Classify { file, json } => {
            let verdict = batch::classify_file(&file, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                println!("Reason:     {}", verdict.reason);
                println!("Content:    {}", if verdict.is_non_content { "no" } else { "yes" });
                println!("Characters: {}", verdict.character_count);
                println!("Words:      {}", verdict.word_count);
            }
            Ok(())
        }
        Commands::Run { input, output } => {
            // Phase 1: Split
            let t_split = Instant::now();
            let files = pdf::extract_pages_to_text(&input, output.as_deref())?;
            println!(
                "Extracted {} pages in {:.1}s",
                files.len(),
                t_split.elapsed().as_secs_f64()
            );
            if files.is_empty() {
                println!("Nothing to analyze (PDF has no pages).");
                return Ok(());
            }

            // Phase 2: Analyze only the pages just written
            let summary = batch::analyze_files(&files, &config, false)?;
            summary.print();
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
