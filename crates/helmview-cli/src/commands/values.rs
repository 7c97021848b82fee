//! Values command - dotted-path access to values.yaml

use console::style;
use helmview_core::Values;
use helmview_core::values::coerce_scalar;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::Path;

use crate::exit_codes;

pub fn get(chart_path: &Path, path: &str) -> Result<()> {
    let chart = super::load_chart(chart_path)?;
    let values = chart
        .default_values()
        .into_diagnostic()
        .wrap_err("Failed to load values.yaml")?;

    match values.get(path) {
        Some(value) => {
            let yaml = serde_yaml::to_string(value)
                .into_diagnostic()
                .wrap_err("Failed to serialize value")?;
            print!("{}", yaml);
            Ok(())
        }
        None => {
            eprintln!(
                "{} no value at path '{}'",
                style("✗").red(),
                path
            );
            std::process::exit(exit_codes::ERROR);
        }
    }
}

pub fn set(chart_path: &Path, path: &str, value: &str) -> Result<()> {
    let chart = super::load_chart(chart_path)?;

    let mut values = if chart.values_path.exists() {
        Values::from_file(&chart.values_path)
            .into_diagnostic()
            .wrap_err("Failed to load values.yaml")?
    } else {
        Values::new()
    };

    let typed = coerce_scalar(value);
    values
        .set(path, typed.clone())
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to set '{}'", path))?;

    values
        .save_to_file(&chart.values_path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write {}", chart.values_path.display()))?;

    println!(
        "{} {} = {}",
        style("set").green(),
        style(path).cyan(),
        typed
    );

    Ok(())
}
