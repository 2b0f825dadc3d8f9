// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mhs_search::engine::CancellationToken;
use mhs_search::preprocess::ColumnOrder;
use mhs_search::report::save_report;
use mhs_search::solver::{Solver, SolverOptions};

#[derive(Parser, Debug)]
#[command(name = "mhs", about = "Enumerate the minimal hitting sets of a boolean matrix")]
#[command(version)]
struct Cli {
    /// Matrix file: one row per line, space-separated 0/1, `;;;` comments.
    input: PathBuf,

    /// Where to write the result (default: <INPUT>.mhs).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep all-zero columns.
    #[arg(long)]
    keep_zeros: bool,

    /// Keep duplicate columns.
    #[arg(long)]
    keep_duplicates: bool,

    /// Column permutation applied before search.
    #[arg(long, value_enum, default_value_t = OrderArg::Identity)]
    column_order: OrderArg,

    /// Shuffle rows before search.
    #[arg(long)]
    permute_rows: bool,

    /// Search time budget in seconds.
    #[arg(long)]
    time_limit: Option<f64>,

    /// Stop as soon as two solutions are found.
    #[arg(long)]
    stop_after_second: bool,

    /// Seed for random permutations.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OrderArg {
    Identity,
    Random,
    Descending,
    Ascending,
}

impl From<OrderArg> for ColumnOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Identity => ColumnOrder::Identity,
            OrderArg::Random => ColumnOrder::Random,
            OrderArg::Descending => ColumnOrder::Descending,
            OrderArg::Ascending => ColumnOrder::Ascending,
        }
    }
}

impl Cli {
    fn options(&self) -> anyhow::Result<SolverOptions> {
        let mut options = SolverOptions::default()
            .with_delete_zeros(!self.keep_zeros)
            .with_delete_duplicates(!self.keep_duplicates)
            .with_column_order(self.column_order.into())
            .with_permute_rows(self.permute_rows)
            .with_stop_after_second_solution(self.stop_after_second);
        if let Some(secs) = self.time_limit {
            let limit = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("invalid time limit {secs}"))?;
            options = options.with_time_limit(limit);
        }
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        Ok(options)
    }

    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let mut name = self.input.clone().into_os_string();
            name.push(".mhs");
            PathBuf::from(name)
        })
    }
}

/// Raise `token` on the first Ctrl-C so the search stops and the partial
/// report is still written.
fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("interrupt received, stopping search");
                token.cancel();
            }
            Err(e) => tracing::error!("failed to listen for interrupt: {}", e),
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let token = CancellationToken::new();
    let options = cli.options()?.with_cancellation(token.clone());
    let solver = Solver::from_file(&cli.input, options)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    cancel_on_interrupt(token);
    let result = tokio::task::spawn_blocking(move || solver.solve())
        .await
        .context("search task panicked")?;

    let output = cli.output_path();
    save_report(&output, &result).with_context(|| format!("writing {}", output.display()))?;
    if result.stopped() {
        tracing::warn!(termination = ?result.termination, "result is partial");
    }
    Ok(())
}
