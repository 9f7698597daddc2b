use anyhow::{Context, Result};
use hytrend_calendar::{DateWindow, StartMonth};
use hytrend_io::{ResultWriter, SeriesLoader};
use hytrend_params::{ExtractConfig, ParameterRecord, ParameterTable, extract_basin};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::cli::ExtractArgs;
use crate::config::HytrendConfig;
use crate::convert;

/// Loads the config named by `args` and applies the CLI overrides.
pub fn load_config(args: &ExtractArgs) -> Result<HytrendConfig> {
    let mut cfg = HytrendConfig::load(&args.config)?;
    if let Some(dir) = &args.output_dir {
        cfg.io.output_dir = dir.clone();
    }
    if !args.basins.is_empty() {
        cfg.extract.basins = args.basins.clone();
    }
    Ok(cfg)
}

/// Entry point for `hytrend extract`.
pub fn run(args: ExtractArgs) -> Result<()> {
    let _span = tracing::info_span!("extract").entered();
    let cfg = load_config(&args)?;
    let writer = ResultWriter::new(convert::build_writer_config(&cfg.io))
        .context("failed to prepare output directory")?;
    let table = extract(&cfg, &writer)?;
    info!(n_rows = table.len(), "extraction complete");
    Ok(())
}

/// Extracts parameters for every configured basin and writes the
/// per-basin and combined tables.
pub fn extract(cfg: &HytrendConfig, writer: &ResultWriter) -> Result<ParameterTable> {
    let extract_cfg = convert::build_extract_config(&cfg.extract)?;
    let start = extract_cfg.validate()?;
    let window = convert::build_window(&cfg.period, cfg.extract.start_month)?;
    let variable = convert::variable_name(&cfg.extract);
    let loader = convert::build_loader(&cfg.io)?;

    let basins = if cfg.extract.basins.is_empty() {
        loader.basin_ids()
    } else {
        cfg.extract.basins.clone()
    };
    info!(
        family = %extract_cfg.family(),
        variable = %variable,
        n_basins = basins.len(),
        "extracting parameters"
    );

    let per_basin: Vec<Option<Vec<ParameterRecord>>> = basins
        .par_iter()
        .map(|basin| {
            process_basin(
                &loader,
                basin,
                &variable,
                window.as_ref(),
                &extract_cfg,
                writer,
                start,
            )
        })
        .collect::<Result<_>>()?;

    let records: Vec<ParameterRecord> = per_basin.into_iter().flatten().flatten().collect();
    if records.is_empty() {
        warn!(variable = %variable, "no parameter rows extracted");
    }
    let table = ParameterTable::from_records(extract_cfg.family(), &records)?;

    let basin_files = writer.write_basin_parameters(&table)?;
    let all_path = writer.write_all_parameters(&table, &variable)?;
    info!(
        n_basin_files = basin_files.len(),
        path = %all_path.display(),
        "wrote parameter tables"
    );
    Ok(table)
}

/// Returns `None` for basins with no series in any source.
fn process_basin(
    loader: &SeriesLoader,
    basin: &str,
    variable: &str,
    window: Option<&DateWindow>,
    config: &ExtractConfig,
    writer: &ResultWriter,
    start: StartMonth,
) -> Result<Option<Vec<ParameterRecord>>> {
    let Some(points) = loader
        .get_series(basin, variable, window)
        .with_context(|| format!("failed to load {variable} series for basin {basin}"))?
    else {
        return Ok(None);
    };
    if points.is_empty() {
        warn!(basin_id = basin, "series is empty after windowing, skipping");
        return Ok(None);
    }

    writer.write_annotated_series(variable, basin, &points, start)?;
    let records = extract_basin(basin, &points, config)
        .with_context(|| format!("parameter extraction failed for basin {basin}"))?;
    Ok(Some(records))
}
