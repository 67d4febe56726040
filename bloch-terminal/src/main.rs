/// Bloch Terminal - animated Bloch sphere in the terminal
///
/// Controls:
///   - Q/ESC/Ctrl-C: Quit
use bloch_core::{BlochResult, VisualiserConfig};
use bloch_terminal::{render_snapshot, TerminalApp};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "bloch=warn";

#[derive(Parser, Debug)]
#[command(name = "bloch-terminal", version, about = "Animated Bloch sphere in the terminal")]
struct Args {
    /// TOML config file overriding the default view.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a single frame to stdout and exit.
    #[arg(long)]
    once: bool,

    /// Animation time (ms) of the frame printed by --once.
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Grid size (columns x rows) for --once; defaults to the terminal size.
    #[arg(long, value_parser = parse_size)]
    size: Option<(usize, usize)>,

    /// Log level override (e.g. debug, bloch=trace).
    #[arg(long)]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_size(s: &str) -> Result<(usize, usize), String> {
    let (cols, rows) = s
        .split_once('x')
        .ok_or_else(|| format!("expected COLSxROWS, got '{s}'"))?;
    let cols = cols.trim().parse::<usize>().map_err(|e| e.to_string())?;
    let rows = rows.trim().parse::<usize>().map_err(|e| e.to_string())?;
    if cols == 0 || rows == 0 {
        return Err("size must be non-zero".into());
    }
    Ok((cols, rows))
}

fn init_logging(args: &Args) -> BlochResult<()> {
    let directive = args.log_level.as_deref().unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let filter = EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .unwrap_or_else(|_| DEFAULT_LOG_DIRECTIVE.parse().expect("valid default directive")),
    );

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match &args.log_file {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn run(args: Args) -> BlochResult<()> {
    init_logging(&args)?;
    tracing::info!("bloch-terminal v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => VisualiserConfig::load_from_path(path)?,
        None => VisualiserConfig::default(),
    };

    if args.once {
        let (cols, rows) = match args.size {
            Some(size) => size,
            None => {
                let (w, h) = crossterm::terminal::size()?;
                (w as usize, h.saturating_sub(1).max(1) as usize)
            }
        };
        print!("{}", render_snapshot(&config, cols, rows, args.time_ms)?);
        return Ok(());
    }

    let mut app = TerminalApp::new(&config)?;
    app.run()
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("bloch-terminal: {e}");
        std::process::exit(1);
    }
}
