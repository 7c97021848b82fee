//! Split command - partition an already-rendered manifest stream

use console::style;
use helmview_engine::split_rendered_output;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::io::Read;
use std::path::Path;

pub fn run(file: Option<&Path>, output_dir: Option<&Path>, list: bool) -> Result<()> {
    let input = read_input(file)?;
    let bundle = split_rendered_output(&input);

    if bundle.is_empty() && !input.trim().is_empty() {
        eprintln!(
            "{} no '# Source:' markers found in input",
            style("warning:").yellow().bold()
        );
    }

    if list {
        for source_path in bundle.source_paths() {
            println!("{}", source_path);
        }
        return Ok(());
    }

    if let Some(output_path) = output_dir {
        fs::create_dir_all(output_path)
            .into_diagnostic()
            .wrap_err_with(|| {
                format!("Failed to create output directory: {}", output_path.display())
            })?;

        for (source_path, content) in bundle.iter() {
            let file_path = output_path.join(source_path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).into_diagnostic()?;
            }
            fs::write(&file_path, content)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write {}", file_path.display()))?;
            println!("{} {}", style("wrote").green(), file_path.display());
        }
        return Ok(());
    }

    let mut first = true;
    for (_, content) in bundle.iter() {
        if !first {
            println!("{}", style("---").dim());
        }
        first = false;
        println!("{}", content);
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .into_diagnostic()
                .wrap_err("Failed to read stdin")?;
            Ok(input)
        }
    }
}
