use crate::core::attributes::AttributeKind;
use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_delimiter() -> char {
    ','
}

fn abalone_attribute_kinds() -> Vec<AttributeKind> {
    let mut kinds = vec![AttributeKind::Categorical];
    kinds.extend([AttributeKind::Numeric; 7]);
    kinds
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct ArffParameters {
    #[schemars(
        with = "String",
        title = "ARFF Path",
        description = "Path to .arff file",
        extend(
            "format" = "path",
            "x-file" = true,
            "x-must-exist" = true,
            "x-extensions" = ["arff"]
        )
    )]
    pub path: PathBuf,

    #[serde(default)]
    #[schemars(
        title = "Class Index",
        description = "Zero-based index of the nominal class attribute (None = last attribute in file)"
    )]
    pub class_index: Option<usize>,
}

/// Defaults describe the UCI abalone file: sex, seven measurements, then
/// the ring count binned at 9 and 15.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CsvParameters {
    #[schemars(
        with = "String",
        title = "CSV Path",
        description = "Path to a delimited text file",
        extend(
            "format" = "path",
            "x-file" = true,
            "x-must-exist" = true,
            "x-extensions" = ["csv", "tsv", "data", "txt"]
        )
    )]
    pub path: PathBuf,

    #[serde(default = "default_delimiter")]
    #[schemars(title = "Delimiter", description = "Field separator")]
    pub delimiter: char,

    #[serde(default)]
    #[schemars(title = "Header", description = "First line holds column names?")]
    pub has_header: bool,

    #[serde(default)]
    #[schemars(
        title = "Label Column",
        description = "Zero-based column holding the class or binned target (None = last column)"
    )]
    pub label_column: Option<usize>,

    #[serde(default)]
    #[schemars(
        title = "Classes",
        description = "Number of classes; required when no label bins are given",
        range(min = 1)
    )]
    pub n_classes: Option<usize>,

    #[serde(default = "abalone_attribute_kinds")]
    #[schemars(
        title = "Attribute Kinds",
        description = "numeric / categorical for each non-label column, in file order"
    )]
    pub attribute_kinds: Vec<AttributeKind>,

    #[serde(default)]
    #[schemars(
        title = "Label Bins",
        description = "Ascending cut points turning a numeric target into classes"
    )]
    pub label_bins: Option<Vec<f64>>,
}

impl Default for CsvParameters {
    fn default() -> Self {
        Self {
            path: PathBuf::from("abalone.data"),
            delimiter: default_delimiter(),
            has_header: false,
            label_column: None,
            n_classes: None,
            attribute_kinds: abalone_attribute_kinds(),
            label_bins: Some(vec![9.0, 15.0]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(LoaderKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum LoaderChoice {
    #[strum_discriminants(strum(
        message = "ARFF File",
        detailed_message = "Schema and class domain read from the ARFF header."
    ))]
    Arff(ArffParameters),

    #[strum_discriminants(strum(
        message = "CSV File",
        detailed_message = "Delimited text with a configured schema and optional label binning."
    ))]
    Csv(CsvParameters),
}

impl UIChoice for LoaderChoice {
    type Kind = LoaderKind;

    fn schema() -> Schema {
        schema_for!(LoaderChoice)
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            LoaderKind::Arff => serde_json::to_value(ArffParameters::default()),
            LoaderKind::Csv => serde_json::to_value(CsvParameters::default()),
        }
        .unwrap_or_default()
    }
}
