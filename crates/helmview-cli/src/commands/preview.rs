//! Preview command - render the ConfigMap preview template
//!
//! This is the editor's live preview path: the constrained directive
//! grammar rendered against the chart's merged values. Rendering itself
//! never fails; unresolvable lookups fall through to the else branch.

use console::style;
use helmview_engine::Template;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde_json::json;
use std::fs;
use std::path::Path;

pub fn run(
    template_path: &Path,
    chart_path: &Path,
    values_files: &[std::path::PathBuf],
    set_values: &[String],
    debug: bool,
) -> Result<()> {
    let chart = super::load_chart(chart_path)?;
    let values = super::merged_values(&chart, values_files, set_values)?;

    let source = fs::read_to_string(template_path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read template {}", template_path.display()))?;

    let template = Template::parse(&source);

    if debug {
        eprintln!(
            "{} Parsed {} top-level directive(s)",
            style("DEBUG").dim(),
            template.directives().len()
        );
    }

    let context = json!({ "Values": values.into_inner() });
    print!("{}", template.render(&context));

    Ok(())
}
