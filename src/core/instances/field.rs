use crate::core::attributes::AttributeKind;
use crate::error::{Result, SprintError};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Numeric(f64),
    Categorical(String),
}

impl Field {
    pub fn parse(raw: &str, kind: AttributeKind, row: usize, column: usize) -> Result<Field> {
        let raw = raw.trim();
        match kind {
            AttributeKind::Numeric => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Field::Numeric(v)),
                _ => Err(SprintError::UnparsableField {
                    row,
                    column,
                    value: raw.to_string(),
                }),
            },
            AttributeKind::Categorical => Ok(Field::Categorical(raw.to_string())),
        }
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            Field::Numeric(_) => AttributeKind::Numeric,
            Field::Categorical(_) => AttributeKind::Categorical,
        }
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Field::Numeric(v) => Some(*v),
            Field::Categorical(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            Field::Categorical(s) => Some(s),
            Field::Numeric(_) => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Numeric(v) => write!(f, "{v}"),
            Field::Categorical(s) => f.write_str(s),
        }
    }
}
