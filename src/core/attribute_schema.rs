use crate::core::attributes::{Attribute, AttributeKind};
use crate::error::{Result, SprintError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Column 0 is always the class label and never appears in `columns`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSchema {
    relation_name: String,
    n_classes: usize,
    class_names: Vec<String>,
    columns: BTreeMap<usize, Attribute>,
}

impl AttributeSchema {
    pub fn new(
        relation_name: String,
        n_classes: usize,
        columns: BTreeMap<usize, Attribute>,
    ) -> AttributeSchema {
        AttributeSchema {
            relation_name,
            n_classes,
            class_names: (0..n_classes).map(|c| c.to_string()).collect(),
            columns,
        }
    }

    pub fn from_kinds(n_classes: usize, kinds: &[AttributeKind]) -> AttributeSchema {
        let columns = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| (i + 1, Attribute::new(format!("col{}", i + 1), *kind)))
            .collect();
        AttributeSchema::new("unnamed_relation".to_string(), n_classes, columns)
    }

    pub fn with_class_names(mut self, class_names: Vec<String>) -> AttributeSchema {
        self.class_names = class_names;
        self
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn class_name(&self, label: usize) -> Option<&str> {
        self.class_names.get(label).map(String::as_str)
    }

    pub fn attribute(&self, column: usize) -> Option<&Attribute> {
        self.columns.get(&column)
    }

    pub fn kind_of(&self, column: usize) -> Option<AttributeKind> {
        self.columns.get(&column).map(Attribute::kind)
    }

    pub fn columns(&self) -> impl Iterator<Item = (usize, &Attribute)> {
        self.columns.iter().map(|(c, a)| (*c, a))
    }

    pub fn number_of_attributes(&self) -> usize {
        self.columns.len()
    }

    pub fn validate_width(&self, width: usize) -> Result<()> {
        if self.n_classes == 0 {
            return Err(SprintError::InvalidSchema(
                "n_classes must be at least 1".to_string(),
            ));
        }
        if self.columns.contains_key(&0) {
            return Err(SprintError::InvalidSchema(
                "column 0 holds the class label and cannot be a split column".to_string(),
            ));
        }
        for column in 1..width {
            if !self.columns.contains_key(&column) {
                return Err(SprintError::InvalidSchema(format!(
                    "no attribute kind declared for column {column}"
                )));
            }
        }
        if let Some((&column, _)) = self.columns.range(width.max(1)..).next() {
            return Err(SprintError::InvalidSchema(format!(
                "column {column} is declared but rows are only {width} fields wide"
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for AttributeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSchema")
            .field("relation_name", &self.relation_name)
            .field("n_classes", &self.n_classes)
            .field("n_attributes", &self.columns.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_kinds_numbers_columns_from_one() {
        let schema = AttributeSchema::from_kinds(
            3,
            &[AttributeKind::Categorical, AttributeKind::Numeric],
        );
        assert_eq!(schema.kind_of(0), None);
        assert_eq!(schema.kind_of(1), Some(AttributeKind::Categorical));
        assert_eq!(schema.kind_of(2), Some(AttributeKind::Numeric));
        assert_eq!(schema.attribute(2).unwrap().name(), "col2");
        assert_eq!(schema.n_classes(), 3);
        assert_eq!(schema.class_name(2), Some("2"));
        assert_eq!(schema.class_name(3), None);
    }

    #[test]
    fn validate_width_accepts_matching_layout() {
        let schema = AttributeSchema::from_kinds(2, &[AttributeKind::Numeric; 3]);
        assert!(schema.validate_width(4).is_ok());
    }

    #[test]
    fn validate_width_rejects_class_column_entry() {
        let mut columns = BTreeMap::new();
        columns.insert(0, Attribute::numeric("class"));
        columns.insert(1, Attribute::numeric("x"));
        let schema = AttributeSchema::new("r".into(), 2, columns);
        assert!(matches!(
            schema.validate_width(2),
            Err(SprintError::InvalidSchema(_))
        ));
    }

    #[test]
    fn validate_width_rejects_missing_column() {
        let mut columns = BTreeMap::new();
        columns.insert(2, Attribute::numeric("y"));
        let schema = AttributeSchema::new("r".into(), 2, columns);
        assert!(matches!(
            schema.validate_width(3),
            Err(SprintError::InvalidSchema(_))
        ));
    }

    #[test]
    fn validate_width_rejects_columns_past_row_end() {
        let schema = AttributeSchema::from_kinds(2, &[AttributeKind::Numeric; 2]);
        assert!(matches!(
            schema.validate_width(2),
            Err(SprintError::InvalidSchema(_))
        ));
    }

    #[test]
    fn validate_width_rejects_zero_classes() {
        let schema = AttributeSchema::from_kinds(0, &[AttributeKind::Numeric]);
        assert!(matches!(
            schema.validate_width(2),
            Err(SprintError::InvalidSchema(_))
        ));
    }
}
