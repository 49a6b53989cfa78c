use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use tidings::classify::quantum::QuantumClassifier;
use tidings::config::Config;
use tidings::pipeline::categorize::scrape_and_categorize;
use tidings::preprocess::Preprocessor;
use tidings::scrape::client::HeadlineClient;

/// Tidings: sort news headlines into topics with quantum NLP.
///
/// Scrapes headlines from a news page, cleans them, and classifies each one
/// with a simulated quantum circuit. Runs a local web UI by default.
#[derive(Parser)]
#[command(name = "tidings", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web UI (the default when no command is given)
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8501")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Scrape the source page and list its headlines
    Scrape,

    /// Scrape and categorize headlines, printing a results table
    Categorize {
        /// Also write the results as CSV to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tidings=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        #[cfg(feature = "web")]
        None => tidings::web::run_server(config, 8501, "127.0.0.1").await?,

        #[cfg(not(feature = "web"))]
        None => {
            anyhow::bail!(
                "This build has no web UI. Use `tidings scrape` or `tidings categorize`,\n\
                 or rebuild with: cargo build --features web"
            );
        }

        #[cfg(feature = "web")]
        Some(Commands::Serve { port, bind }) => {
            tidings::web::run_server(config, port, &bind).await?;
        }

        Some(Commands::Scrape) => {
            let client = HeadlineClient::new(&config.source_url, &config.heading_selector)?;
            println!("Scraping {}...", config.source_url);
            let titles = client.fetch_titles().await?;
            tidings::output::terminal::display_titles(&titles);
        }

        Some(Commands::Categorize { output }) => {
            config.require_weights()?;
            let client = HeadlineClient::new(&config.source_url, &config.heading_selector)?;
            let classifier =
                QuantumClassifier::from_config(&config, Arc::new(Preprocessor::english()))?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner} {msg} ({elapsed})")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(format!("Scraping {} and running circuits", config.source_url));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let result = scrape_and_categorize(&client, &classifier).await;
            spinner.finish_and_clear();
            let table = result?;

            tidings::output::terminal::display_results(&table);

            if let Some(path) = output {
                table.write_csv(&path)?;
                info!(path = %path.display(), rows = table.len(), "Wrote CSV");
                println!("{} {}", "Saved CSV to".bold(), path.display());
            }
        }
    }

    Ok(())
}
