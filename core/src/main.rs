use clap::Parser;
use log::{error, info};
use scanscrub_core::cli::Cli;
use scanscrub_core::{run_target, ConversionStatus, ScrubError, Scrubber, TagRegistry, Verifier};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    if !cli.path.exists() {
        eprintln!("Error: The target directory doesn't exist: {}", cli.path.display());
        process::exit(1);
    }

    let registry = match TagRegistry::load(cli.identifiers.as_deref()) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to load identifiers: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    info!("Redacting {} identifying field name(s)", registry.len());

    let mut scrubber =
        Scrubber::new(&registry, cli.scrub_options()).with_converter(cli.converter());
    let verifier = Verifier::new(&registry);

    match run_target(&mut scrubber, &verifier, &cli.path) {
        Ok(summary) => {
            for batch in &summary.batches {
                println!(
                    "{}: {} file(s) anonymized and verified",
                    batch.directory.display(),
                    batch.files.len()
                );
                if let ConversionStatus::Failed(reason) = &batch.conversion {
                    println!("  NIfTI conversion failed: {}", reason);
                }
            }
        }
        Err(ScrubError::Declined) => {
            info!("Nothing was modified");
            println!("Aborted: no file was modified");
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
