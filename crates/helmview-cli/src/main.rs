//! Helmview CLI - edit and preview Helm chart configuration from the terminal

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;

mod commands;
mod exit_codes;
mod helm;
mod settings;

#[derive(Parser)]
#[command(name = "helmview")]
#[command(author = "Helmview Contributors")]
#[command(version)]
#[command(about = "Edit and preview Helm chart configuration artifacts", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a chart with helm and split the output into per-source files
    Template {
        /// Release name
        name: String,

        /// Chart path
        chart: PathBuf,

        /// Values file(s) to merge
        #[arg(short = 'f', long = "values")]
        values: Vec<PathBuf>,

        /// Set values on command line (key=value)
        #[arg(long = "set")]
        set: Vec<String>,

        /// Target namespace (defaults to the last one used)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Output directory (if not set, outputs to stdout)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Show only sources whose path contains this substring
        #[arg(short = 's', long)]
        show_only: Option<String>,
    },

    /// Split an already-rendered manifest stream into per-source files
    Split {
        /// Input file ("-" or omitted reads stdin)
        file: Option<PathBuf>,

        /// Output directory (if not set, outputs to stdout)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print only the source paths
        #[arg(long)]
        list: bool,
    },

    /// Render a ConfigMap preview template against chart values
    Preview {
        /// Template file using the lookup/splitLines directive grammar
        template: PathBuf,

        /// Chart path
        chart: PathBuf,

        /// Values file(s) to merge
        #[arg(short = 'f', long = "values")]
        values: Vec<PathBuf>,

        /// Set values on command line (key=value)
        #[arg(long = "set")]
        set: Vec<String>,
    },

    /// Read or update values.yaml by dotted path
    Values {
        #[command(subcommand)]
        action: ValuesAction,
    },

    /// Show chart metadata and artifact paths
    Show {
        /// Chart path
        #[arg(default_value = ".")]
        chart: PathBuf,
    },
}

#[derive(Subcommand)]
enum ValuesAction {
    /// Print the value at a dotted path
    Get {
        /// Chart path
        chart: PathBuf,

        /// Dotted path (e.g. image.tag)
        path: String,
    },

    /// Set the value at a dotted path and write values.yaml back
    Set {
        /// Chart path
        chart: PathBuf,

        /// Dotted path (e.g. image.tag)
        path: String,

        /// New value (booleans, numbers, and JSON parse as typed values)
        value: String,
    },
}

fn main() -> Result<()> {
    miette::set_panic_hook();

    let cli = Cli::parse();

    if cli.debug {
        // SAFETY: We're the only thread at this point (start of main)
        unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
    }

    match cli.command {
        Commands::Template {
            name,
            chart,
            values,
            set,
            namespace,
            output_dir,
            show_only,
        } => commands::template::run(
            &name,
            &chart,
            &values,
            &set,
            namespace.as_deref(),
            output_dir.as_deref(),
            show_only.as_deref(),
            cli.debug,
        ),

        Commands::Split {
            file,
            output_dir,
            list,
        } => commands::split::run(file.as_deref(), output_dir.as_deref(), list),

        Commands::Preview {
            template,
            chart,
            values,
            set,
        } => commands::preview::run(&template, &chart, &values, &set, cli.debug),

        Commands::Values { action } => match action {
            ValuesAction::Get { chart, path } => commands::values::get(&chart, &path),
            ValuesAction::Set { chart, path, value } => {
                commands::values::set(&chart, &path, &value)
            }
        },

        Commands::Show { chart } => commands::show::run(&chart),
    }
}
