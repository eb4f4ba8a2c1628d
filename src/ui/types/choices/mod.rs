mod loader_choice;
pub mod schema;
mod task_choice;

pub use loader_choice::{ArffParameters, CsvParameters, LoaderChoice, LoaderKind};
pub use task_choice::{TaskChoice, TaskKind, TrainTestParams};

use schemars::Schema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt::Display;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// A `{type, params}` tagged enum whose variants can be picked by name and
/// filled from JSON parameters.
pub trait UIChoice: Sized + Serialize + DeserializeOwned {
    type Kind: Copy + Display + FromStr + IntoEnumIterator + Into<&'static str>;

    fn schema() -> Schema;

    fn default_params(kind: Self::Kind) -> Value;

    fn from_parts(kind: Self::Kind, params: Value) -> anyhow::Result<Self> {
        let tag: &'static str = kind.into();
        Ok(serde_json::from_value(json!({ "type": tag, "params": params }))?)
    }

    fn kind_names() -> Vec<String> {
        Self::Kind::iter().map(|k| k.to_string()).collect()
    }
}
