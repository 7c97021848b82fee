//! Show command - chart metadata and artifact paths

use console::style;
use miette::Result;
use std::path::Path;

pub fn run(chart_path: &Path) -> Result<()> {
    let chart = super::load_chart(chart_path)?;
    let meta = &chart.metadata;

    println!(
        "{} {}",
        style(&meta.name).cyan().bold(),
        style(format!("v{}", meta.version)).dim()
    );

    if let Some(description) = &meta.description {
        println!("  {}", description);
    }
    if let Some(app_version) = &meta.app_version {
        println!("  App version: {}", app_version);
    }
    if let Some(kube_version) = &meta.kube_version {
        println!("  Kube version: {}", kube_version);
    }
    if !meta.keywords.is_empty() {
        println!("  Keywords: {}", meta.keywords.join(", "));
    }
    for maintainer in &meta.maintainers {
        match &maintainer.email {
            Some(email) => println!("  Maintainer: {} <{}>", maintainer.name, email),
            None => println!("  Maintainer: {}", maintainer.name),
        }
    }

    println!();
    print_artifact("values.yaml", chart.values_path.exists());
    print_artifact("values.schema.json", chart.schema_path.is_some());
    print_artifact("templates/", chart.templates_dir.is_some());

    Ok(())
}

fn print_artifact(name: &str, present: bool) {
    if present {
        println!("  {} {}", style("✓").green(), name);
    } else {
        println!("  {} {}", style("-").dim(), style(name).dim());
    }
}
