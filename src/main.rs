//! Demo host for the card number field
//!
//! Runs the control inside a small eframe window.

use std::path::PathBuf;

use anyhow::Context;
use eframe::egui;

use card_number_field::app::CardEntryApp;
use card_number_field::config::{self, CardFieldConfig};

fn print_help() {
    println!("card-number-field - segmented card number entry demo");
    println!();
    println!("Usage: card-number-field [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <path> or -c <path>      Load field configuration from a JSON file");
    println!("  --number <digits> or -n <digits>  Pre-fill the field as if the card was scanned");
    println!("  --help or -h                      Show this help message");
    println!();
    println!("Environment:");
    println!("  {}    Default config file location", config::CONFIG_ENV_VAR);
    println!("  RUST_LOG                    Log filter, e.g. card_number_field=debug");
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut initial_number: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let value = args.get(i + 1).context("--config requires a path")?;
                config_path = Some(PathBuf::from(value));
                i += 1; // consume value
            }
            "--number" | "-n" => {
                let value = args.get(i + 1).context("--number requires a value")?;
                initial_number = Some(value.clone());
                i += 1; // consume value
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => log::warn!("Ignoring unknown argument '{other}'"),
        }
        i += 1;
    }

    let field_config = match config_path {
        Some(path) => CardFieldConfig::load_from(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => config::load_config(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([420.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Card Number Field",
        options,
        Box::new(move |cc| {
            let app = CardEntryApp::new(cc, field_config, initial_number)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run card number field demo: {e}"))
}
