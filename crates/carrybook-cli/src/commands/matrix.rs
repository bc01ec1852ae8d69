//! Matrix command implementation.
//!
//! Prints the implied forward rate for every (FROM, TO) contract pair.
//! Dark cells print as `-`.

use anyhow::Result;
use carrybook_ext_file::load_forward_matrix;
use carrybook_portfolio::types::EngineConfig;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, StripArgs};
use crate::output::{print_grid, print_warning};

/// Arguments for the matrix command.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub strip: StripArgs,
}

/// Execute the matrix command.
pub fn execute(args: MatrixArgs, _config: EngineConfig, format: OutputFormat) -> Result<()> {
    let as_of = parse_date(&args.strip.as_of)?;
    let matrix = load_forward_matrix(
        &args.strip.futures,
        args.strip.to_futures.as_deref(),
        as_of,
    )?;

    let header: Vec<String> = std::iter::once("FROM \\ TO".to_string())
        .chain(matrix.tickers().map(str::to_string))
        .collect();
    let body: Vec<Vec<String>> = matrix
        .contracts()
        .iter()
        .filter_map(|from| {
            let row = matrix.row(&from.ticker)?;
            Some(
                std::iter::once(from.ticker.clone())
                    .chain(row.iter().map(ToString::to_string))
                    .collect(),
            )
        })
        .collect();

    print_grid(header, body, &matrix, format)?;

    let computed = matrix.len() * matrix.len() - matrix.dark_count();
    tracing::info!(
        "{} contracts, {computed} computed cells, {} dark",
        matrix.len(),
        matrix.dark_count()
    );
    if computed == 0 && !matrix.is_empty() {
        print_warning("no forward rate could be computed from these prices");
    }

    Ok(())
}
