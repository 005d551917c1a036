mod app;
mod config;
mod error;
mod lifecycle;
mod upload;

use app::ReferentialConsole;
use config::ConsoleConfig;
use eframe::CreationContext;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("referential_console=info")),
        )
        .init();

    let config = match ConsoleConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "cannot start console");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "Format Referential Console",
        options,
        Box::new(move |cc: &CreationContext| Box::new(ReferentialConsole::new(cc, config))),
    ) {
        error!(error = %e, "console window failed");
        std::process::exit(1);
    }
}
