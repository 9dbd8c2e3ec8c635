use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod controller;
mod ui;

use controller::navigation::Route;
use ui::ReservationGuiApp;

#[derive(Parser, Debug)]
struct Args {
    /// Settings file; defaults to ./reservations.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start on the landing page instead of the reservations page.
    #[arg(long)]
    landing: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();
    let settings =
        widget_core::load_settings(args.config.as_deref()).context("failed to load settings")?;
    let route = if args.landing {
        Route::Landing
    } else {
        Route::Reservations
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Reservas")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([520.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Reservas",
        options,
        Box::new(move |_cc| Ok(Box::new(ReservationGuiApp::new(settings, route)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop shell: {err}"))
}
