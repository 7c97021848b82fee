//! CLI commands

pub mod preview;
pub mod show;
pub mod split;
pub mod template;
pub mod values;

use helmview_core::{LoadedChart, Values, parse_set_values};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::Path;

/// Merge chart defaults, -f files, and --set overrides in priority order
pub fn merged_values(
    chart: &LoadedChart,
    values_files: &[std::path::PathBuf],
    set_values: &[String],
) -> Result<Values> {
    let mut values = chart
        .default_values()
        .into_diagnostic()
        .wrap_err("Failed to load default values.yaml")?;

    for values_file in values_files {
        let file_values = Values::from_file(values_file)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to load values file: {}", values_file.display()))?;
        values.merge(&file_values);
    }

    if !set_values.is_empty() {
        let set_vals = parse_set_values(set_values)
            .into_diagnostic()
            .wrap_err("Failed to parse --set values")?;
        values.merge(&set_vals);
    }

    Ok(values)
}

/// Load a chart with diagnostic context
pub fn load_chart(path: &Path) -> Result<LoadedChart> {
    LoadedChart::load(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to load chart from {}", path.display()))
}
