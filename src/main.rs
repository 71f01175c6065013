//! Platter CLI
//!
//! Reads a menu table and prints the cheapest restaurant serving every requested item:
//!
//! ```text
//! platter menu.csv burger tofu_log
//! 2 11.5
//! ```

use std::{
    io::{self, Write},
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::debug;

use platter::{
    config::{Config, OutputFormat},
    menus::MenuRepository,
    observability,
    receipt,
    recommender::{RecommendError, Recommender},
};

#[expect(clippy::print_stderr, reason = "fatal errors are reported to the user")]
fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(error) => error.exit(),
    };

    if let Err(error) = observability::init_logging(&config.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let repository = MenuRepository::from_path(&config.table)
        .with_context(|| format!("failed to load menus from {}", config.table.display()))?;

    let recommender =
        Recommender::new(config.solver.solver()).with_parallelism(config.solver.parallel);

    let start = Instant::now();

    let recommendation = match recommender.recommend(&repository, &config.items) {
        Ok(recommendation) => recommendation,
        Err(RecommendError::EmptyRequest) => None,
        Err(error) => return Err(error.into()),
    };

    let elapsed = start.elapsed();

    debug!(elapsed = %elapsed.human(Truncate::Nano), "recommendation computed");

    let menu = recommendation
        .as_ref()
        .and_then(|recommendation| repository.get(recommendation.restaurant_id));

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match config.output.output {
        OutputFormat::Text => {
            writeln!(handle, "{}", receipt::render_line(recommendation.as_ref()))?;

            if config.output.explain {
                if let (Some(recommendation), Some(menu)) = (&recommendation, menu) {
                    writeln!(handle)?;
                    receipt::write_breakdown(&mut handle, recommendation, menu)?;
                }
            }
        }
        OutputFormat::Json => {
            receipt::write_json(&mut handle, recommendation.as_ref().zip(menu))?;
        }
    }

    Ok(())
}
