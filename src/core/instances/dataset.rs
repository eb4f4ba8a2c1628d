use crate::core::attribute_schema::AttributeSchema;
use crate::core::instances::{Field, Row};
use crate::error::{Result, SprintError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Dataset {
        Dataset { rows }
    }

    /// Column 0 of every row must be an integer label in `[0, n_classes)`.
    pub fn from_text_rows<S: AsRef<str>>(
        text_rows: &[Vec<S>],
        schema: &AttributeSchema,
    ) -> Result<Dataset> {
        let mut rows = Vec::with_capacity(text_rows.len());
        for (r, cells) in text_rows.iter().enumerate() {
            schema.validate_width(cells.len())?;
            let Some((label_cell, attribute_cells)) = cells.split_first() else {
                return Err(SprintError::InvalidSchema(format!(
                    "row {r} has no class column"
                )));
            };
            let label = parse_label(label_cell.as_ref(), r, schema.n_classes())?;

            let mut fields = Vec::with_capacity(attribute_cells.len());
            for (i, raw) in attribute_cells.iter().enumerate() {
                let column = i + 1;
                let kind = schema.kind_of(column).ok_or_else(|| {
                    SprintError::InvalidSchema(format!("no attribute kind declared for column {column}"))
                })?;
                fields.push(Field::parse(raw.as_ref(), kind, r, column)?);
            }
            rows.push(Row::new(label, fields));
        }
        Ok(Dataset { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn width(&self) -> Option<usize> {
        self.rows.first().map(Row::width)
    }

    pub fn validate(&self, schema: &AttributeSchema) -> Result<()> {
        let Some(width) = self.width() else {
            return Ok(());
        };
        schema.validate_width(width)?;

        for (r, row) in self.rows.iter().enumerate() {
            if row.width() != width {
                return Err(SprintError::InvalidSchema(format!(
                    "row {r} has {} columns, expected {width}",
                    row.width()
                )));
            }
            if row.label() >= schema.n_classes() {
                return Err(SprintError::InvalidLabel {
                    row: r,
                    label: row.label().to_string(),
                    n_classes: schema.n_classes(),
                });
            }
            for (i, field) in row.fields().iter().enumerate() {
                let column = i + 1;
                let declared = schema.kind_of(column);
                if declared != Some(field.kind()) {
                    return Err(SprintError::InvalidSchema(format!(
                        "row {r}, column {column} holds a {} field but the schema declares {}",
                        field.kind(),
                        declared.map_or("nothing".to_string(), |k| k.to_string())
                    )));
                }
            }
        }
        Ok(())
    }

    /// Seeded shuffle, then `fraction` of the rows go to the test side.
    pub fn split_holdout(self, fraction: f64, seed: u64) -> (Dataset, Dataset) {
        let mut rows = self.rows;
        let mut rng = StdRng::seed_from_u64(seed);
        rows.shuffle(&mut rng);

        let n_test = ((rows.len() as f64) * fraction.clamp(0.0, 1.0)).round() as usize;
        let n_test = n_test.min(rows.len().saturating_sub(1));
        let train = rows.split_off(n_test);
        (Dataset::new(train), Dataset::new(rows))
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Dataset::new(rows)
    }
}

fn parse_label(raw: &str, row: usize, n_classes: usize) -> Result<usize> {
    let raw = raw.trim();
    match raw.parse::<usize>() {
        Ok(label) if label < n_classes => Ok(label),
        _ => Err(SprintError::InvalidLabel {
            row,
            label: raw.to_string(),
            n_classes,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::AttributeKind;

    fn schema() -> AttributeSchema {
        AttributeSchema::from_kinds(3, &[AttributeKind::Categorical, AttributeKind::Numeric])
    }

    #[test]
    fn from_text_rows_resolves_each_column_once() {
        let text = vec![vec!["0", "M", "0.455"], vec!["2", "F", "0.53"]];
        let ds = Dataset::from_text_rows(&text, &schema()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[1].label(), 2);
        assert_eq!(ds.rows()[1].value(1), Some(&Field::Categorical("F".into())));
        assert_eq!(ds.rows()[0].numeric(2), Some(0.455));
        assert!(ds.validate(&schema()).is_ok());
    }

    #[test]
    fn from_text_rows_fails_on_unparsable_numeric() {
        let text = vec![vec!["0", "M", "0.455"], vec!["1", "F", "tall"]];
        let err = Dataset::from_text_rows(&text, &schema()).unwrap_err();
        assert_eq!(
            err,
            SprintError::UnparsableField {
                row: 1,
                column: 2,
                value: "tall".into()
            }
        );
    }

    #[test]
    fn from_text_rows_rejects_out_of_range_label() {
        let text = vec![vec!["3", "M", "0.455"]];
        let err = Dataset::from_text_rows(&text, &schema()).unwrap_err();
        assert!(matches!(err, SprintError::InvalidLabel { row: 0, n_classes: 3, .. }));
    }

    #[test]
    fn from_text_rows_rejects_width_mismatch() {
        let text = vec![vec!["0", "M"]];
        let err = Dataset::from_text_rows(&text, &schema()).unwrap_err();
        assert!(matches!(err, SprintError::InvalidSchema(_)));
    }

    #[test]
    fn validate_rejects_field_of_wrong_kind() {
        let ds = Dataset::new(vec![Row::new(
            0,
            vec![Field::Numeric(1.0), Field::Numeric(2.0)],
        )]);
        assert!(matches!(ds.validate(&schema()), Err(SprintError::InvalidSchema(_))));
    }

    #[test]
    fn validate_rejects_ragged_rows() {
        let ds = Dataset::new(vec![
            Row::new(0, vec![Field::Categorical("M".into()), Field::Numeric(2.0)]),
            Row::new(0, vec![Field::Categorical("M".into())]),
        ]);
        assert!(matches!(ds.validate(&schema()), Err(SprintError::InvalidSchema(_))));
    }

    #[test]
    fn text_labels_become_class_indices() {
        let text = vec![
            vec!["0", "M", "1"],
            vec!["2", "F", "1"],
            vec!["2", "I", "1"],
        ];
        let ds = Dataset::from_text_rows(&text, &schema()).unwrap();
        let labels: Vec<usize> = ds.rows().iter().map(Row::label).collect();
        assert_eq!(labels, vec![0, 2, 2]);
    }

    #[test]
    fn split_holdout_is_seeded_and_keeps_every_row() {
        let rows: Vec<Row> = (0..20)
            .map(|i| Row::new(i % 2, vec![Field::Numeric(i as f64)]))
            .collect();
        let ds = Dataset::new(rows);

        let (train_a, test_a) = ds.clone().split_holdout(0.25, 7);
        let (train_b, test_b) = ds.split_holdout(0.25, 7);
        assert_eq!(test_a.len(), 5);
        assert_eq!(train_a.len(), 15);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);

        let mut seen: Vec<f64> = train_a
            .rows()
            .iter()
            .chain(test_a.rows())
            .filter_map(|r| r.numeric(1))
            .collect();
        seen.sort_by(f64::total_cmp);
        assert_eq!(seen, (0..20).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn split_holdout_always_leaves_a_training_row() {
        let ds = Dataset::new(vec![
            Row::new(0, vec![Field::Numeric(1.0)]),
            Row::new(1, vec![Field::Numeric(2.0)]),
        ]);
        let (train, test) = ds.split_holdout(1.0, 1);
        assert_eq!(train.len(), 1);
        assert_eq!(test.len(), 1);
    }
}
