//! Equalizer CLI - equalizes an image file and optionally diffs the result.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use common::log_setup::setup_logging;
use common::ScopeTimer;
use equalizer::{compare_files, read_image, save_image, Equalizer, Region};

mod args;

use args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.log_level(), cli.log_dir.as_deref()) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(diff) => {
            if let Some(diff) = diff {
                println!("Max pixel difference: {diff}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns the max pixel difference against the reference, if one was given.
fn run(cli: &Cli) -> anyhow::Result<Option<f64>> {
    let _overall = ScopeTimer::new("Overall time");

    let config = cli.resolve_config()?;
    let equalizer = Equalizer::new(config).context("Failed to start the equalizer")?;

    let mut image = read_image(&cli.input)
        .with_context(|| format!("Failed to read input '{}'", cli.input.display()))?;
    let region = cli.roi.unwrap_or_else(|| Region::full(&image));

    tracing::info!(
        input = %cli.input.display(),
        width = image.width(),
        height = image.height(),
        %region,
        threads = equalizer.thread_count(),
        "equalizing"
    );

    {
        let _timer = ScopeTimer::new("Histogram equalization time");
        equalizer
            .equalize(&mut image, region)
            .with_context(|| format!("Failed to equalize region {region}"))?;
    }

    save_image(&image, &cli.output)
        .with_context(|| format!("Failed to write output '{}'", cli.output.display()))?;

    let Some(reference) = &cli.reference else {
        return Ok(None);
    };
    let diff = compare_files(&cli.output, reference).with_context(|| {
        format!(
            "Failed to compare '{}' with '{}'",
            cli.output.display(),
            reference.display()
        )
    })?;
    Ok(Some(diff))
}
