mod app;
mod capability;
mod card;
mod cli;
mod config;
mod controls;
mod distance;
mod form;
mod model;
mod popup;
mod tui;
mod validate;

use std::fs::OpenOptions;
use std::process;
use std::sync::Mutex;

use clap::Parser;

use app::DeliveryBoard;
use cli::Cli;
use config::{Config, DeliverySeed};

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Failed to open log file {}: {e}", path.display());
                process::exit(1);
            }
        };
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let records = config.deliveries.iter().map(DeliverySeed::to_record).collect();
    let labels_path = cli.labels.or_else(Config::default_labels_path);
    let mut board = DeliveryBoard::new(records, labels_path);

    if let Err(e) = tui::run(&mut board) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
