//! Template command - render a chart with helm and split the output

use console::style;
use helmview_core::KeyValueStore;
use helmview_engine::split_rendered_output;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::helm::TemplateInvocation;
use crate::settings;

pub fn run(
    name: &str,
    chart_path: &Path,
    values_files: &[std::path::PathBuf],
    set_values: &[String],
    namespace: Option<&str>,
    output_dir: Option<&Path>,
    show_only: Option<&str>,
    debug: bool,
) -> Result<()> {
    let chart = super::load_chart(chart_path)?;

    if debug {
        eprintln!(
            "{} Loaded chart: {} v{}",
            style("DEBUG").dim(),
            chart.metadata.name,
            chart.metadata.version
        );
    }

    let values = super::merged_values(&chart, values_files, set_values)?;

    // Namespace falls back to the last one used, then "default"
    let mut store = settings::open();
    let namespace = namespace
        .map(str::to_string)
        .or_else(|| store.get(settings::LAST_NAMESPACE))
        .unwrap_or_else(|| "default".to_string());

    // helm reads values from a file, so hand it the merged document via a
    // temp file that lives until the process exits
    let mut values_tmp = tempfile::NamedTempFile::new()
        .into_diagnostic()
        .wrap_err("Failed to create temporary values file")?;
    let yaml = values
        .to_yaml_string()
        .into_diagnostic()
        .wrap_err("Failed to serialize merged values")?;
    values_tmp
        .write_all(yaml.as_bytes())
        .into_diagnostic()
        .wrap_err("Failed to write temporary values file")?;

    let invocation = TemplateInvocation::new(name, chart_path, &namespace)
        .values_file(values_tmp.path());

    if debug {
        eprintln!(
            "{} Running helm template (namespace: {})",
            style("DEBUG").dim(),
            namespace
        );
    }

    let stdout = invocation
        .run()
        .into_diagnostic()
        .wrap_err("helm template failed")?;

    // Remember this invocation for next time; losing a setting is not
    // worth failing the render over
    for (key, value) in [
        (settings::LAST_RELEASE, name),
        (settings::LAST_NAMESPACE, namespace.as_str()),
    ] {
        if let Err(e) = store.set(key, value) {
            if debug {
                eprintln!("{} Failed to save setting {}: {}", style("DEBUG").dim(), key, e);
            }
        }
    }

    let bundle = split_rendered_output(&stdout);

    if bundle.is_empty() && !stdout.trim().is_empty() {
        eprintln!(
            "{} helm produced output but no '# Source:' markers were found; \
             the output format may have changed",
            style("warning:").yellow().bold()
        );
    }

    if let Some(output_path) = output_dir {
        write_bundle(&bundle, output_path, show_only)?;
    } else {
        print_bundle(&bundle, show_only);
    }

    Ok(())
}

fn write_bundle(
    bundle: &helmview_engine::RenderedBundle,
    output_path: &Path,
    show_only: Option<&str>,
) -> Result<()> {
    fs::create_dir_all(output_path)
        .into_diagnostic()
        .wrap_err_with(|| {
            format!("Failed to create output directory: {}", output_path.display())
        })?;

    for (source_path, content) in bundle.iter() {
        if let Some(filter) = show_only {
            if !source_path.contains(filter) {
                continue;
            }
        }

        let file_path = output_path.join(source_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).into_diagnostic()?;
        }

        fs::write(&file_path, content)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write {}", file_path.display()))?;

        println!("{} {}", style("wrote").green(), file_path.display());
    }

    Ok(())
}

fn print_bundle(bundle: &helmview_engine::RenderedBundle, show_only: Option<&str>) {
    let mut first = true;

    for (source_path, content) in bundle.iter() {
        if let Some(filter) = show_only {
            if !source_path.contains(filter) {
                continue;
            }
        }

        if !first {
            println!("{}", style("---").dim());
        }
        first = false;

        println!("{}", content);
    }
}
