use clap::Parser;
use log::{error, info};
use scanscrub_core::cli::{CheckCli, OutputFormat};
use scanscrub_core::{ScrubError, TagRegistry, VerificationReport, Verifier};
use std::process;

fn main() {
    let cli = CheckCli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let registry = match TagRegistry::load(cli.identifiers.as_deref()) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to load identifiers: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!("Verifying {}", cli.path.display());

    match Verifier::new(&registry).verify(&cli.path) {
        Ok(report) => output_report(&report, cli.format),
        Err(e @ ScrubError::PolicyViolation { .. }) => {
            // Same line format as the passing files
            println!("{}", e);
            process::exit(1);
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn output_report(report: &VerificationReport, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                let _ = report;
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
