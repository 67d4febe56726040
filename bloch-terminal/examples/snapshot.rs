/// Example: Print one frame of the Bloch sphere using a TOML config
///
/// Usage: cargo run --example snapshot -- [path/to/config.toml] [time-ms]
use bloch_core::{BlochResult, VisualiserConfig};
use bloch_terminal::render_snapshot;
use std::env;
use std::path::Path;

fn main() -> BlochResult<()> {
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => VisualiserConfig::load_from_path(Path::new(path))?,
        None => {
            eprintln!("No config file provided, using the default view...");
            VisualiserConfig::default()
        }
    };

    let time_ms = args
        .get(2)
        .and_then(|t| t.parse::<f64>().ok())
        .unwrap_or(0.0);

    print!("{}", render_snapshot(&config, 100, 50, time_ms)?);
    Ok(())
}
