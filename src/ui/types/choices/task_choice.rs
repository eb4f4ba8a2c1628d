use crate::classifiers::sprint::DEFAULT_IMPURITY_THRESHOLD;
use crate::evaluation::ReportFormat;
use crate::ui::types::choices::{LoaderChoice, UIChoice};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::PathBuf;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

const DEFAULT_SEED: u64 = 42;

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_impurity_threshold() -> f64 {
    DEFAULT_IMPURITY_THRESHOLD
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TrainTestParams {
    #[schemars(skip)]
    pub loader: LoaderChoice,

    #[serde(default = "default_impurity_threshold")]
    #[schemars(
        title = "Impurity Threshold",
        description = "Stop splitting once the best split's weighted Gini falls below this",
        range(min = 0.0),
        default = "default_impurity_threshold"
    )]
    pub impurity_threshold: f64,

    #[serde(default)]
    #[schemars(
        title = "Test Fraction",
        description = "Share of rows held out for testing (0 = test on the training rows)",
        range(min = 0.0, max = 1.0)
    )]
    pub test_fraction: f64,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "Shuffle seed for the holdout split", default = "default_seed")]
    pub seed: u64,

    #[serde(default)]
    #[schemars(title = "Print Tree", description = "Dump the grown tree to stdout")]
    pub print_tree: bool,

    #[serde(default)]
    #[schemars(
        with = "String",
        title = "Report file",
        description = "If set, write the evaluation report to this file",
        extend("format"="path","x-file"=true,"x-must-exist"=false)
    )]
    pub report_file: Option<PathBuf>,

    #[serde(default)]
    #[schemars(title = "Report format", description = "text / json / csv / tsv (default: text)")]
    pub report_format: ReportFormat,

    #[serde(default)]
    #[schemars(
        with = "String",
        title = "Tree file",
        description = "If set, write the grown tree as JSON to this file",
        extend("format"="path","x-file"=true,"x-must-exist"=false)
    )]
    pub tree_file: Option<PathBuf>,
}

impl TrainTestParams {
    pub fn with_loader(loader: LoaderChoice) -> Self {
        Self {
            loader,
            impurity_threshold: DEFAULT_IMPURITY_THRESHOLD,
            test_fraction: 0.0,
            seed: DEFAULT_SEED,
            print_tree: false,
            report_file: None,
            report_format: ReportFormat::default(),
            tree_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Train / Test",
        detailed_message = "Grow a SPRINT tree, then tally a confusion matrix on held-out rows."
    ))]
    TrainTest(TrainTestParams),
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    /// The loader is chosen separately and is not part of these defaults.
    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            TaskKind::TrainTest => json!({
                "impurity_threshold": DEFAULT_IMPURITY_THRESHOLD,
                "test_fraction": 0.0,
                "seed": DEFAULT_SEED,
                "print_tree": false,
                "report_file": null,
                "report_format": "text",
                "tree_file": null
            }),
        }
    }
}
