//! summairize CLI
//!
//! Main entry point for the summairize command-line tool.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use summairize::{
    insert_summary, ConfigLoader, ConsoleNotifier, FileFilter, Notifier, SummaryResult,
    SummaryService,
};

#[derive(Parser)]
#[command(name = "summairize")]
#[command(about = "summairize - summarize notes with a local language model", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Project config file (default: ./.summairize/summairize.toml)
    #[arg(short, long, global = true, env = "SUMMAIRIZE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a note
    Summarize {
        /// Markdown file to summarize
        file: PathBuf,
        /// Write the summary into the note instead of printing it
        #[arg(short, long)]
        write: bool,
        /// Ignore template and daily-note exclusion rules
        #[arg(short, long)]
        force: bool,
    },

    /// Check provider availability
    Status {
        /// Output format: text (default), json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List installed local models
    Models,

    /// Download a local model
    Pull {
        /// Model name, e.g. gemma3:4b
        model: String,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut loader = ConfigLoader::new()?;
    if let Some(path) = cli.config {
        loader = loader.with_project_path(path);
    }
    let config = loader.load().await?;

    tooling::logging::init_logging(&config.logging.level)?;
    config.validate()?;

    let notifier = ConsoleNotifier::new();

    match cli.command {
        Commands::Summarize { file, write, force } => {
            if !force {
                let filter = FileFilter::new(config.filter.clone())?;
                if let Some(reason) = filter.exclusion_reason(&file) {
                    notifier.file_excluded(&reason.to_string());
                    return Ok(ExitCode::SUCCESS);
                }
            }

            let content = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let service = SummaryService::from_config(config)?;
            match service.generate_summary(&content).await {
                SummaryResult::Success { summary } => {
                    let word_count = summary.split_whitespace().count();
                    if write {
                        tokio::fs::write(&file, insert_summary(&content, &summary))
                            .await
                            .with_context(|| format!("Failed to write {}", file.display()))?;
                    } else {
                        println!("{}", summary);
                    }
                    notifier.summary_success(Some(word_count));
                    Ok(ExitCode::SUCCESS)
                }
                SummaryResult::Failure { reason, .. } => {
                    notifier.summary_error(&reason);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Status { format } => {
            let configured = config.provider;
            let service = SummaryService::from_config(config)?;
            let status = service.provider_status().await;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("Configured provider: {}", configured);
                println!();
                for (name, available) in &status {
                    let state = if *available {
                        "✓ available".green()
                    } else {
                        "✗ unavailable".red()
                    };
                    println!("{:<12} {}", name, state);
                }
                if !status.contains_key(configured.as_str()) {
                    notifier.provider_unavailable(configured.as_str());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Models => {
            let service = SummaryService::from_config(config)?;
            let models = service.list_models().await;
            if models.is_empty() {
                notifier.warning("No local models found. Pull one with: summairize pull <MODEL>");
            }
            for model in models {
                println!("{}", model);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Pull { model } => {
            let service = SummaryService::from_config(config)?;
            notifier.info(&format!("Pulling {} (this can take a while)...", model));
            service.pull_model(&model).await?;
            notifier.success(&format!("Model '{}' is ready", model));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
