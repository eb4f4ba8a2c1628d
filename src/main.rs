use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use sprint::evaluation::ReportFormat;
use sprint::ui::cli::args::{Cli, Command, SchemaArgs};
use sprint::ui::types::build::build_evaluator;
use sprint::ui::types::choices::schema::{render_field_specs, specs_for_kind};
use sprint::ui::types::choices::{LoaderChoice, LoaderKind, TaskChoice, UIChoice};
use sprint::utils::logging::{self, Verbosity};
use sprint::DecisionTree;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.quiet, cli.verbose));

    match cli.command {
        Command::Schema(args) => print_schema(args),
        Command::Run(args) => {
            let task = args.into_task_choice()?;
            run(task)
        }
    }
}

fn run(task: TaskChoice) -> Result<()> {
    let TaskChoice::TrainTest(params) = task;

    let mut evaluator = build_evaluator(&params)?;
    let report = evaluator.run().context("train/test run failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if params.print_tree
        && let Some(tree) = evaluator.tree()
    {
        writeln!(out, "=========== Decision Tree ==========")?;
        write!(out, "{tree}")?;
        writeln!(out)?;
    }
    report
        .write_to(&mut out, ReportFormat::Text)
        .context("failed to print report")?;

    if let Some(path) = params.report_file.as_deref()
        && !path.as_os_str().is_empty()
    {
        report
            .export(path, params.report_format)
            .with_context(|| format!("failed to export report to {}", path.display()))?;
        info!(path = %path.display(), format = %params.report_format, "wrote report");
    }

    if let Some(path) = params.tree_file.as_deref()
        && !path.as_os_str().is_empty()
        && let Some(tree) = evaluator.tree()
    {
        write_tree(tree, path)
            .with_context(|| format!("failed to write tree to {}", path.display()))?;
        info!(path = %path.display(), "wrote tree");
    }

    Ok(())
}

fn write_tree(tree: &DecisionTree, path: &Path) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut w, tree)?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

fn print_schema(args: SchemaArgs) -> Result<()> {
    let text = match args.loader {
        Some(raw) => {
            let kind: LoaderKind = raw.trim().to_lowercase().parse().with_context(|| {
                format!(
                    "unknown loader '{raw}' (expected one of: {})",
                    LoaderChoice::kind_names().join(", ")
                )
            })?;
            let tag: &'static str = kind.into();
            let specs = specs_for_kind(&LoaderChoice::schema(), tag)?;
            render_field_specs(&specs)
        }
        None => serde_json::to_string_pretty(&TaskChoice::schema())? + "\n",
    };
    print!("{text}");
    Ok(())
}
