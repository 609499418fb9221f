mod app;
mod state;
mod ui;

use std::path::PathBuf;

use app::BubbleScopeApp;
use bubblescope::config::ChartConfig;
use clap::Parser;
use eframe::egui;

/// Interactive quality-vs-price bubble chart.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV file to open at startup.
    path: Option<PathBuf>,

    /// Chart settings (TOML). Defaults to the user config file when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let (config, config_error) = match ChartConfig::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("{e}");
            (ChartConfig::default(), Some(format!("Error: {e}")))
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 1000.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Quality vs Price",
        options,
        Box::new(move |_cc| {
            let mut app = BubbleScopeApp::new(config);
            app.state.status_message = config_error;
            if let Some(path) = args.path {
                ui::panels::open_path(&mut app.state, &path);
            }
            Ok(Box::new(app))
        }),
    )
}
