//! `wxdoc`: ask about the weather or about a PDF.
//!
//! Usage:
//!   wxdoc ask "What's the weather in Pune?"
//!   wxdoc ask "Summarize chapter 2" --pdf report.pdf
//!   wxdoc chat --pdf report.pdf
//!   wxdoc keys

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use wxdoc_cli::{AppConfig, Session, build_router, init_telemetry, repl};

#[derive(Parser)]
#[command(name = "wxdoc", version, about = "Weather and PDF question answering")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a single question
    Ask {
        /// The question
        query: String,
        /// PDF to answer document questions from
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Start an interactive session
    Chat {
        /// PDF to make the active document
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Show whether the API keys are configured
    Keys,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command {
        Command::Keys => println!("{}", config.keys_report()),
        Command::Ask { query, pdf } => {
            let mut session = Session::new(build_router(&config)?);
            if let Some(pdf) = pdf {
                eprintln!("{}", session.upload(pdf).await);
            }
            println!("{}", session.ask(&query).await);
        }
        Command::Chat { pdf } => {
            let mut session = Session::new(build_router(&config)?);
            if let Some(pdf) = pdf {
                println!("{}", session.upload(pdf).await);
            }
            repl::run(&mut session, &config).await?;
        }
    }

    Ok(())
}
