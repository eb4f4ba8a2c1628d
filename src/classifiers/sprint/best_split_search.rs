use crate::classifiers::sprint::split_candidate::{SplitCandidate, SplitPoint, sorted_order};
use crate::classifiers::sprint::split_criteria::SplitCriterion;
use crate::classifiers::sprint::split_evaluator::SplitEvaluator;
use crate::core::attributes::AttributeKind;
use crate::core::instances::{Field, Row};
use std::collections::HashMap;
use tracing::trace;

/// Lowest-impurity binary split of a partition. Only a strictly lower
/// impurity replaces the current best.
pub struct BestSplitSearch<'a, C: SplitCriterion> {
    evaluator: &'a SplitEvaluator<C>,
}

impl<'a, C: SplitCriterion> BestSplitSearch<'a, C> {
    pub fn new(evaluator: &'a SplitEvaluator<C>) -> Self {
        Self { evaluator }
    }

    pub fn find_best_split(&self, rows: &[Row]) -> Option<SplitCandidate> {
        if rows.len() < 2 {
            return None;
        }
        let width = rows[0].width();
        let mut best: Option<SplitCandidate> = None;

        for column in 1..width {
            let Some(kind) = rows[0].value(column).map(Field::kind) else {
                continue;
            };
            let column_best = match kind {
                AttributeKind::Numeric => self.best_numeric_split(rows, column),
                AttributeKind::Categorical => self.best_categorical_split(rows, column),
            };
            if let Some(candidate) = column_best {
                trace!(%candidate, "best split for column");
                if best
                    .as_ref()
                    .is_none_or(|b| candidate.impurity < b.impurity)
                {
                    best = Some(candidate);
                }
            }
        }

        best
    }

    fn best_numeric_split(&self, rows: &[Row], column: usize) -> Option<SplitCandidate> {
        let n_classes = self.evaluator.n_classes();
        let order = sorted_order(rows, column);
        let values: Vec<f64> = order
            .iter()
            .map(|&i| rows[i].numeric(column).unwrap_or(f64::NAN))
            .collect();

        let mut left = vec![0usize; n_classes];
        let mut right = vec![0usize; n_classes];
        for row in rows {
            if let Some(c) = right.get_mut(row.label()) {
                *c += 1;
            }
        }

        let mut best: Option<SplitCandidate> = None;
        for (position, &index) in order.iter().enumerate() {
            let label = rows[index].label();
            if label < n_classes {
                left[label] += 1;
                right[label] -= 1;
            }

            let impurity = self.evaluator.weighted(&left, &right);
            if best.as_ref().is_none_or(|b| impurity < b.impurity) {
                let threshold = match values.get(position + 1) {
                    Some(&next) => midpoint(values[position], next),
                    None => values[position],
                };
                best = Some(SplitCandidate {
                    column,
                    impurity,
                    point: SplitPoint::Numeric {
                        threshold,
                        pivot: position,
                    },
                });
            }
        }
        best
    }

    // rows sharing a category share a score; the first one wins
    fn best_categorical_split(&self, rows: &[Row], column: usize) -> Option<SplitCandidate> {
        let n_classes = self.evaluator.n_classes();
        let mut totals = vec![0usize; n_classes];
        let mut per_category: HashMap<&str, Vec<usize>> = HashMap::new();
        for row in rows {
            let Some(category) = row.value(column).and_then(Field::as_category) else {
                continue;
            };
            let counts = per_category
                .entry(category)
                .or_insert_with(|| vec![0usize; n_classes]);
            if row.label() < n_classes {
                counts[row.label()] += 1;
                totals[row.label()] += 1;
            }
        }

        let mut best: Option<SplitCandidate> = None;
        for row in rows {
            let Some(category) = row.value(column).and_then(Field::as_category) else {
                continue;
            };
            let Some(matching) = per_category.get(category) else {
                continue;
            };
            let non_matching: Vec<usize> = totals
                .iter()
                .zip(matching)
                .map(|(t, m)| t - m)
                .collect();

            let impurity = self.evaluator.weighted(matching, &non_matching);
            if best.as_ref().is_none_or(|b| impurity < b.impurity) {
                best = Some(SplitCandidate {
                    column,
                    impurity,
                    point: SplitPoint::Categorical {
                        category: category.to_string(),
                    },
                });
            }
        }
        best
    }
}

fn midpoint(low: f64, high: f64) -> f64 {
    let sum = low + high;
    if sum.is_finite() {
        sum / 2.0
    } else {
        low / 2.0 + high / 2.0
    }
}
