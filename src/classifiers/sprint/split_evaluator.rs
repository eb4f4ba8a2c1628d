use crate::classifiers::sprint::split_criteria::{GiniSplitCriterion, SplitCriterion};
use crate::core::instances::{Field, Row};

#[derive(Debug, Clone)]
pub struct SplitEvaluator<C: SplitCriterion = GiniSplitCriterion> {
    criterion: C,
    n_classes: usize,
}

impl SplitEvaluator<GiniSplitCriterion> {
    pub fn gini(n_classes: usize) -> Self {
        Self::new(GiniSplitCriterion::new(), n_classes)
    }
}

impl<C: SplitCriterion> SplitEvaluator<C> {
    pub fn new(criterion: C, n_classes: usize) -> Self {
        Self {
            criterion,
            n_classes,
        }
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Numeric columns expect `rows` sorted by `column`.
    pub fn impurity(&self, rows: &[Row], anchor_row: usize, column: usize) -> f64 {
        let mut matching = vec![0usize; self.n_classes];
        let mut non_matching = vec![0usize; self.n_classes];
        let anchor = rows.get(anchor_row).and_then(|r| r.value(column));

        for (i, row) in rows.iter().enumerate() {
            let is_match = match anchor {
                Some(Field::Numeric(_)) => i <= anchor_row,
                Some(Field::Categorical(category)) => {
                    row.value(column).and_then(Field::as_category) == Some(category.as_str())
                }
                None => false,
            };
            let side = if is_match {
                &mut matching
            } else {
                &mut non_matching
            };
            if let Some(count) = side.get_mut(row.label()) {
                *count += 1;
            }
        }

        self.weighted(&matching, &non_matching)
    }

    pub fn weighted(&self, match_counts: &[usize], non_match_counts: &[usize]) -> f64 {
        self.criterion
            .impurity_of_split(match_counts, non_match_counts)
    }
}
