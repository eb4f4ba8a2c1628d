use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueHint};
use serde_json::{Map, Value};

use crate::evaluation::ReportFormat;
use crate::ui::types::choices::{LoaderChoice, TaskChoice, TaskKind, TrainTestParams, UIChoice};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Grow SPRINT decision trees and evaluate them on tabular data"
)]
pub struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a dataset, grow a tree and print its confusion matrix
    Run(RunArgs),
    /// Print the JSON schema of task files, or the parameters of a loader
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// List the parameters of this loader instead (e.g. csv, arff)
    #[arg(long, value_name = "LOADER")]
    pub loader: Option<String>,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Task file (JSON `TaskChoice`); flags below override its values
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Task to execute
    #[arg(long, default_value = "train-test", value_name = "TASK")]
    pub task: String,

    /// Dataset loader (arff, csv); required without --config
    #[arg(long, value_name = "LOADER")]
    pub loader: Option<String>,

    /// Stop splitting below this weighted Gini impurity
    #[arg(long, value_name = "GINI")]
    pub threshold: Option<f64>,

    /// Share of rows held out for testing (0 = test on training rows)
    #[arg(long, value_name = "FRACTION")]
    pub test_fraction: Option<f64>,

    /// Shuffle seed for the holdout split
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Dump the grown tree to stdout
    #[arg(long)]
    pub print_tree: bool,

    /// File to write the evaluation report to
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub report_file: Option<PathBuf>,

    /// Format for the report file (text, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub report_format: Option<String>,

    /// File to write the grown tree to, as JSON
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub tree_file: Option<PathBuf>,

    /// Override loader parameters (key=value, nested keys with dots)
    #[arg(long = "loader-param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub loader_params: Vec<KeyValue>,
}

#[derive(Clone, Debug)]
pub struct KeyValue {
    key: String,
    value: Value,
}

impl RunArgs {
    pub fn into_task_choice(self) -> Result<TaskChoice> {
        let task_kind = parse_kind::<TaskKind>(&self.task)
            .with_context(|| format!("invalid task '{}'", self.task))?;

        let base = match &self.config {
            Some(path) => Some(read_task_file(path)?),
            None => None,
        };

        match task_kind {
            TaskKind::TrainTest => self.into_train_test_choice(base),
        }
    }

    fn into_train_test_choice(self, base: Option<TaskChoice>) -> Result<TaskChoice> {
        let mut params = match (base, self.loader.as_deref()) {
            (Some(TaskChoice::TrainTest(mut p)), None) => {
                p.loader = override_choice(&p.loader, &self.loader_params)
                    .context("invalid loader parameters")?;
                p
            }
            (base, Some(name)) => {
                let loader = build_choice::<LoaderChoice>(name, &self.loader_params)
                    .with_context(|| format!("invalid loader '{name}'"))?;
                match base {
                    Some(TaskChoice::TrainTest(mut p)) => {
                        p.loader = loader;
                        p
                    }
                    None => TrainTestParams::with_loader(loader),
                }
            }
            (None, None) => bail!("--loader is required unless --config is given"),
        };

        if let Some(t) = self.threshold {
            params.impurity_threshold = t;
        }
        if let Some(f) = self.test_fraction {
            params.test_fraction = f;
        }
        if let Some(s) = self.seed {
            params.seed = s;
        }
        if self.print_tree {
            params.print_tree = true;
        }
        if self.report_file.is_some() {
            params.report_file = self.report_file;
        }
        if let Some(fmt) = self.report_format {
            params.report_format = ReportFormat::from_str(fmt.trim())
                .map_err(|_| anyhow!("unknown format '{fmt}'"))
                .with_context(|| format!("invalid report format '{fmt}'"))?;
        }
        if self.tree_file.is_some() {
            params.tree_file = self.tree_file;
        }

        Ok(TaskChoice::TrainTest(params))
    }
}

fn read_task_file(path: &Path) -> Result<TaskChoice> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read task file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse task file {}", path.display()))
}

fn build_choice<C>(kind_input: &str, overrides: &[KeyValue]) -> Result<C>
where
    C: UIChoice,
    <C::Kind as FromStr>::Err: std::fmt::Display,
{
    let kind = parse_kind::<C::Kind>(kind_input)?;
    let mut params = C::default_params(kind);
    apply_overrides(&mut params, overrides)?;
    C::from_parts(kind, params)
}

/// Applies `overrides` to the params of an already-built choice.
fn override_choice<C: UIChoice>(choice: &C, overrides: &[KeyValue]) -> Result<C> {
    let mut tagged = serde_json::to_value(choice)?;
    let params = tagged
        .get_mut("params")
        .ok_or_else(|| anyhow!("choice has no params"))?;
    apply_overrides(params, overrides)?;
    Ok(serde_json::from_value(tagged)?)
}

fn parse_kind<T>(raw: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    for cand in candidate_spellings(raw) {
        if let Ok(parsed) = cand.parse::<T>() {
            return Ok(parsed);
        }
    }
    Err(anyhow!("could not parse value '{raw}'"))
}

fn candidate_spellings(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut out = vec![
        trimmed.to_string(),
        trimmed.to_lowercase(),
        kebab_from_token(trimmed),
        trimmed.replace('_', "-").to_lowercase(),
    ];
    out.sort();
    out.dedup();
    out
}

/// `TrainTest` and `train_test` both become `train-test`.
fn kebab_from_token(token: &str) -> String {
    let mut buf = String::new();
    let mut prev_lower = false;
    for ch in token.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                buf.push('-');
            }
            buf.extend(ch.to_lowercase());
            prev_lower = false;
        } else if ch == '_' {
            buf.push('-');
            prev_lower = false;
        } else {
            buf.push(ch);
            prev_lower = ch.is_lowercase();
        }
    }
    buf
}

fn apply_overrides(target: &mut Value, overrides: &[KeyValue]) -> Result<()> {
    for kv in overrides {
        set_path(target, &kv.key, kv.value.clone())
            .with_context(|| format!("failed to set '{}'", kv.key))?;
    }
    Ok(())
}

fn set_path(target: &mut Value, path: &str, new_value: Value) -> Result<()> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        bail!("empty key is not allowed");
    };

    let mut current = target;
    for seg in parents {
        current = object_mut(current)?
            .entry((*seg).to_string())
            .or_insert(Value::Null);
    }
    object_mut(current)?.insert((*last).to_string(), new_value);
    Ok(())
}

fn object_mut(value: &mut Value) -> Result<&mut Map<String, Value>> {
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("cannot set nested field on non-object value: {other:?}"),
    }
}

fn parse_key_value(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected KEY=VALUE".to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("key cannot be empty".to_string());
    }

    Ok(KeyValue {
        key: key.to_string(),
        value: parse_literal(value.trim()),
    })
}

/// JSON when it parses, a plain string otherwise.
fn parse_literal(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
