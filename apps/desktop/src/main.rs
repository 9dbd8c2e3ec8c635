use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::{domain::AvailabilityResult, protocol::SessionStep};
use tracing_subscriber::EnvFilter;
use widget_core::{
    load_settings,
    session::{apply_step, StepReport},
    AvailabilityRules, MemoryDocument, ReservationPage,
};

mod commands;
mod interactive;

#[derive(Parser, Debug)]
#[command(name = "reservations", about = "Restaurant reservation widget simulator")]
struct Cli {
    /// Settings file; defaults to ./reservations.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one availability request.
    Check {
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long, default_value = "")]
        time: String,
        #[arg(long, default_value = "")]
        guests: String,
        #[arg(long)]
        json: bool,
    },
    /// Replay a JSON list of session steps against a simulated page.
    Replay {
        script: PathBuf,
        /// Load the landing page (no dialog) instead of the reservations page.
        #[arg(long)]
        landing: bool,
        #[arg(long)]
        json: bool,
    },
    /// Drive a simulated page from stdin; deferred closes fire in real time.
    Interactive {
        #[arg(long)]
        landing: bool,
    },
}

#[derive(Serialize)]
struct CheckReport<'a> {
    date: &'a str,
    time: &'a str,
    guests: &'a str,
    result: &'a AvailabilityResult,
    message: &'a str,
}

fn load_page(
    landing: bool,
    settings: widget_core::WidgetSettings,
) -> ReservationPage<MemoryDocument> {
    let document = if landing {
        MemoryDocument::landing_page()
    } else {
        MemoryDocument::reservations_page()
    };
    ReservationPage::load(document, settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;

    match cli.command {
        Command::Check {
            date,
            time,
            guests,
            json,
        } => {
            let rules = AvailabilityRules::from(&settings);
            let result = rules.evaluate_form(&time, &date, &guests);
            let message = commands::result_message(&result);
            if json {
                let report = CheckReport {
                    date: &date,
                    time: &time,
                    guests: &guests,
                    result: &result,
                    message,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{message}");
            }
        }
        Command::Replay {
            script,
            landing,
            json,
        } => {
            let raw = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script '{}'", script.display()))?;
            let steps: Vec<SessionStep> = serde_json::from_str(&raw)
                .with_context(|| format!("invalid session script '{}'", script.display()))?;

            let mut page = load_page(landing, settings);
            for step in &steps {
                let report = apply_step(&mut page, step)
                    .with_context(|| format!("step failed: {step:?}"))?;
                if let StepReport::Snapshot(snapshot) = report {
                    if json {
                        println!("{}", serde_json::to_string(&snapshot)?);
                    } else {
                        println!("{}", commands::describe(&snapshot));
                    }
                }
            }
            let last = page.snapshot();
            if json {
                println!("{}", serde_json::to_string(&last)?);
            } else {
                println!("final: {}", commands::describe(&last));
            }
        }
        Command::Interactive { landing } => {
            let page = load_page(landing, settings);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            interactive::run(page, stdin, &mut std::io::stdout()).await?;
        }
    }

    Ok(())
}
