use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use linkview::config::{Config, OutputFormat};
use linkview::report::{inspect, render};

/// Classify links and print their canonical, feed and embed URLs.
#[derive(Parser)]
#[command(name = "linkview", version, about)]
struct Cli {
    /// Links to classify. Read from stdin, one per line, when none are given.
    urls: Vec<String>,

    /// Output format (overrides LINKVIEW_FORMAT)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Classify links exactly as given, without unwrapping redirects
    #[arg(long)]
    no_sanitize: bool,

    /// Drop tracking query parameters before classifying
    #[arg(long)]
    strip_tracking: bool,
}

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // No subscriber yet, so this one goes straight to stderr
    if let Err(e) = init_tracing() {
        eprintln!("Fatal error: {e:#}");
        std::process::exit(1);
    }

    if let Err(e) = run() {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.no_sanitize {
        config.sanitize = false;
    }
    if cli.strip_tracking {
        config.strip_tracking = true;
    }

    let inputs = if cli.urls.is_empty() {
        read_stdin_lines().context("Failed to read links from stdin")?
    } else {
        cli.urls
    };

    info!(count = inputs.len(), format = %config.format, "Classifying links");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut handled = 0usize;
    for input in &inputs {
        let report = inspect(input, &config);
        if report.handled {
            handled += 1;
        }
        let rendered = render(&report, config.format).context("Failed to render report")?;
        writeln!(out, "{rendered}").context("Failed to write to stdout")?;
    }

    info!(total = inputs.len(), handled, "Done");

    Ok(())
}

fn read_stdin_lines() -> io::Result<Vec<String>> {
    io::stdin()
        .lock()
        .lines()
        .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .collect()
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,linkview=info"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}
