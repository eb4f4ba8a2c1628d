use crate::classifiers::sprint::instance_conditional_test::{Branch, InstanceConditionalTest};
use crate::core::attributes::AttributeKind;
use crate::core::instances::{Field, Row};
use serde::{Deserialize, Serialize};

/// `value == category` goes left, everything else right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominalAttributeBinaryTest {
    column: usize,
    category: String,
}

impl NominalAttributeBinaryTest {
    pub fn new(column: usize, category: String) -> Self {
        Self { column, category }
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl InstanceConditionalTest for NominalAttributeBinaryTest {
    fn branch_for_row(&self, row: &Row) -> Option<Branch> {
        let value = row.value(self.column).and_then(Field::as_category)?;
        if value == self.category {
            Some(Branch::Left)
        } else {
            Some(Branch::Right)
        }
    }

    fn column(&self) -> usize {
        self.column
    }

    fn kind(&self) -> AttributeKind {
        AttributeKind::Categorical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(v: &str) -> Row {
        Row::new(1, vec![Field::Numeric(0.0), Field::Categorical(v.into())])
    }

    #[test]
    fn test_branch_for_row_returns_left_on_equal_category() {
        let test = NominalAttributeBinaryTest::new(2, "M".into());
        assert_eq!(test.branch_for_row(&row("M")), Some(Branch::Left));
    }

    #[test]
    fn test_branch_for_row_returns_right_on_other_category() {
        let test = NominalAttributeBinaryTest::new(2, "M".into());
        assert_eq!(test.branch_for_row(&row("F")), Some(Branch::Right));
    }

    #[test]
    fn test_branch_for_row_is_case_sensitive() {
        let test = NominalAttributeBinaryTest::new(2, "M".into());
        assert_eq!(test.branch_for_row(&row("m")), Some(Branch::Right));
    }

    #[test]
    fn test_branch_for_row_returns_none_for_numeric_field() {
        let test = NominalAttributeBinaryTest::new(1, "0".into());
        assert_eq!(test.branch_for_row(&row("M")), None);
    }
}
