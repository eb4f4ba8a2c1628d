use crate::core::instances::Field;
use serde::{Deserialize, Serialize};

/// The class label sits at column 0; `fields[i]` is column `i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    label: usize,
    fields: Vec<Field>,
}

impl Row {
    pub fn new(label: usize, fields: Vec<Field>) -> Row {
        Row { label, fields }
    }

    pub fn label(&self) -> usize {
        self.label
    }

    pub fn width(&self) -> usize {
        self.fields.len() + 1
    }

    pub fn value(&self, column: usize) -> Option<&Field> {
        column.checked_sub(1).and_then(|i| self.fields.get(i))
    }

    pub fn numeric(&self, column: usize) -> Option<f64> {
        self.value(column).and_then(Field::as_numeric)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_addresses_attribute_columns_from_one() {
        let row = Row::new(
            2,
            vec![Field::Categorical("M".into()), Field::Numeric(0.35)],
        );
        assert_eq!(row.label(), 2);
        assert_eq!(row.width(), 3);
        assert_eq!(row.value(0), None);
        assert_eq!(row.value(1), Some(&Field::Categorical("M".into())));
        assert_eq!(row.numeric(2), Some(0.35));
        assert_eq!(row.value(3), None);
    }
}
