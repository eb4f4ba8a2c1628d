//! Fixtures shared by the unit tests. Compiled for `cfg(test)` or with the
//! `test-support` feature.

mod dummies {
    pub mod unroutable_classifier;
}
mod stubs {
    pub mod oracle_classifier;
}

pub use dummies::unroutable_classifier::UnroutableClassifier;
pub use stubs::oracle_classifier::OracleClassifier;

use crate::core::attribute_schema::AttributeSchema;
use crate::core::attributes::AttributeKind;
use crate::core::instances::{Dataset, Field, Row};

/// Twelve abalone records as the original data file lays them out: sex,
/// seven measurements, then the ring count.
pub const ABALONE_SAMPLE: &str = "\
M,0.455,0.365,0.095,0.514,0.2245,0.101,0.15,15
M,0.35,0.265,0.09,0.2255,0.0995,0.0485,0.07,7
F,0.53,0.42,0.135,0.677,0.2565,0.1415,0.21,9
M,0.44,0.365,0.125,0.516,0.2155,0.114,0.155,10
I,0.33,0.255,0.08,0.205,0.0895,0.0395,0.055,7
I,0.425,0.3,0.095,0.3515,0.141,0.0775,0.12,8
F,0.53,0.415,0.15,0.7775,0.237,0.1415,0.33,20
F,0.545,0.425,0.125,0.768,0.294,0.1495,0.26,16
M,0.475,0.37,0.125,0.5095,0.2165,0.1125,0.165,9
F,0.55,0.44,0.15,0.8945,0.3145,0.151,0.32,19
F,0.525,0.38,0.14,0.6065,0.194,0.1475,0.21,14
M,0.43,0.35,0.11,0.406,0.1675,0.081,0.135,10
";

pub fn numeric_rows(points: &[(usize, f64)]) -> Vec<Row> {
    points
        .iter()
        .map(|&(label, v)| Row::new(label, vec![Field::Numeric(v)]))
        .collect()
}

pub fn categorical_rows(points: &[(usize, &str)]) -> Vec<Row> {
    points
        .iter()
        .map(|&(label, v)| Row::new(label, vec![Field::Categorical(v.to_string())]))
        .collect()
}

pub fn numeric_dataset(points: &[(usize, f64)], n_classes: usize) -> (Dataset, AttributeSchema) {
    (
        Dataset::new(numeric_rows(points)),
        AttributeSchema::from_kinds(n_classes, &[AttributeKind::Numeric]),
    )
}

pub fn categorical_dataset(
    points: &[(usize, &str)],
    n_classes: usize,
) -> (Dataset, AttributeSchema) {
    (
        Dataset::new(categorical_rows(points)),
        AttributeSchema::from_kinds(n_classes, &[AttributeKind::Categorical]),
    )
}

/// `ABALONE_SAMPLE` with rings binned into three classes (`< 9`, `< 15`,
/// the rest) and moved to column 0.
pub fn abalone_like() -> (Dataset, AttributeSchema) {
    let mut kinds = vec![AttributeKind::Categorical];
    kinds.extend([AttributeKind::Numeric; 7]);
    let schema = AttributeSchema::from_kinds(3, &kinds);

    let text_rows: Vec<Vec<String>> = ABALONE_SAMPLE
        .lines()
        .map(|line| {
            let mut cells: Vec<String> = line.split(',').map(str::to_string).collect();
            let rings: u32 = cells.pop().and_then(|r| r.parse().ok()).unwrap_or_default();
            let class = if rings < 9 {
                0
            } else if rings < 15 {
                1
            } else {
                2
            };
            cells.insert(0, class.to_string());
            cells
        })
        .collect();

    let dataset = Dataset::from_text_rows(&text_rows, &schema)
        .expect("abalone sample resolves against its schema");
    (dataset, schema)
}
