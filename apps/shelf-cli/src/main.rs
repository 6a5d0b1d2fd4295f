//! # Shelf
//!
//! Interactive store menu.
//!
//! ## Usage
//! ```bash
//! # Demo catalog (or ~/.config/shelf/shelf.toml if present)
//! cargo run -p shelf-cli
//!
//! # Custom catalog
//! cargo run -p shelf-cli -- --config ./store.toml
//!
//! # Receipts as JSON
//! cargo run -p shelf-cli -- --json
//!
//! # Dump the effective configuration as a starting point
//! cargo run -p shelf-cli -- --print-config > store.toml
//! ```

use std::env;
use std::io;
use std::path::PathBuf;

use shelf_cli::{build_store, init_tracing, AppConfig, Menu, USAGE};
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut json = false;
    let mut print_config = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    return Err("--config needs a path".into());
                }
            }
            "--json" => json = true,
            "--print-config" => print_config = true,
            "--help" | "-h" => {
                print!("{}", USAGE);
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let config = AppConfig::load(config_path)?;

    if print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let mut store = build_store(&config)?;
    info!(store = %config.store.name, "Starting menu");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut store, config.store.name.as_str(), stdin.lock(), stdout.lock())
        .with_json(json)
        .run()?;

    Ok(())
}
