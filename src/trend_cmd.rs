use anyhow::{Context, Result};
use hytrend_io::{ResultWriter, read_parameter_table};
use hytrend_params::ParameterTable;
use hytrend_trend::estimate_trends;
use tracing::info;

use crate::cli::{ExtractArgs, TrendArgs};
use crate::config::HytrendConfig;
use crate::convert;
use crate::extract_cmd;

/// Entry point for `hytrend trend`.
pub fn run(args: TrendArgs) -> Result<()> {
    let _span = tracing::info_span!("trend").entered();
    let mut cfg = HytrendConfig::load(&args.config)?;
    if let Some(dir) = &args.output_dir {
        cfg.io.output_dir = dir.clone();
    }
    if !args.columns.is_empty() {
        cfg.trend.columns = Some(args.columns.clone());
    }

    let writer = ResultWriter::new(convert::build_writer_config(&cfg.io))
        .context("failed to prepare output directory")?;
    let input = args.input.clone().unwrap_or_else(|| {
        let variable = convert::variable_name(&cfg.extract);
        cfg.io.output_dir.join(format!("{variable}_params_all_basins.csv"))
    });
    info!(path = %input.display(), "reading parameter table");
    let table = read_parameter_table(&input)
        .with_context(|| format!("failed to read parameter table: {}", input.display()))?;

    trends(&cfg, &table, &writer)
}

/// Entry point for `hytrend run`: extraction followed by trend estimation
/// on the in-memory table.
pub fn run_pipeline(args: ExtractArgs) -> Result<()> {
    let _span = tracing::info_span!("run").entered();
    let cfg = extract_cmd::load_config(&args)?;
    let writer = ResultWriter::new(convert::build_writer_config(&cfg.io))
        .context("failed to prepare output directory")?;
    let table = extract_cmd::extract(&cfg, &writer)?;
    trends(&cfg, &table, &writer)
}

fn trends(cfg: &HytrendConfig, table: &ParameterTable, writer: &ResultWriter) -> Result<()> {
    let trend_cfg = convert::build_trend_config(&cfg.trend)?;
    let columns = convert::trend_columns(&cfg.trend, cfg.extract.family);
    info!(
        n_columns = columns.len(),
        n_basins = table.basins().len(),
        alpha = trend_cfg.significance_level(),
        "estimating trends"
    );

    let rows = estimate_trends(table, &columns, &trend_cfg).context("trend estimation failed")?;
    let n_significant = rows.iter().filter(|r| r.significant).count();
    let paths = writer.write_trends(&rows)?;
    info!(
        n_rows = rows.len(),
        n_significant,
        n_files = paths.len(),
        "wrote trend results"
    );
    Ok(())
}
