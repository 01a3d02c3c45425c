mod cli;
mod commands;

use clap::Parser;
use fingerprint_qc::config::Config;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn init_logging(config: &Config) {
    let log_level =
        std::env::var("FINGERPRINT_QC_LOG").unwrap_or_else(|_| config.log_level.clone());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();
}

fn main() {
    let args = cli::Args::parse();

    // The config may set the log level, so it is read before the subscriber
    // exists and any problem with it is logged afterwards.
    let config_path = args
        .config
        .as_deref()
        .map(PathBuf::from)
        .or_else(Config::default_path);
    let (config, config_error) = match config_path.as_deref().map(Config::read_from) {
        Some(Ok(Some(config))) => (config, None),
        Some(Err(e)) => (Config::default(), Some(e)),
        _ => (Config::default(), None),
    };
    init_logging(&config);
    if let (Some(e), Some(path)) = (config_error, &config_path) {
        warn!("ignoring config {}: {}", path.display(), e);
    }
    let format = args.format.unwrap_or(config.report_format);

    let result = match args.command {
        cli::Commands::Verify { fingerprint_file } => {
            commands::verify::run(fingerprint_file, format)
        }
        cli::Commands::Compare { a_file, b_file } => {
            commands::compare::run(a_file, b_file, format)
        }
        cli::Commands::Audit {
            original,
            added,
            removed,
            current,
        } => commands::audit::run(original, added, removed, current, format),
        cli::Commands::MetaAudit { dump, accession } => {
            commands::meta_audit::run(dump, accession, &config, format)
        }
        cli::Commands::Rehash {
            fingerprint_file,
            output_file,
        } => commands::rehash::run(fingerprint_file, output_file),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
