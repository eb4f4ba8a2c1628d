use crate::core::instances::Row;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SplitPoint {
    /// Rows at sorted positions `..=pivot` go left.
    Numeric { threshold: f64, pivot: usize },
    Categorical { category: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitCandidate {
    pub column: usize,
    pub impurity: f64,
    pub point: SplitPoint,
}

impl SplitCandidate {
    pub fn partition(&self, rows: Vec<Row>) -> (Vec<Row>, Vec<Row>) {
        match &self.point {
            SplitPoint::Numeric { pivot, .. } => {
                let order = sorted_order(&rows, self.column);
                let mut slots: Vec<Option<Row>> = rows.into_iter().map(Some).collect();
                let mut left = Vec::with_capacity(pivot + 1);
                let mut right = Vec::with_capacity(order.len().saturating_sub(pivot + 1));
                for (position, index) in order.into_iter().enumerate() {
                    if let Some(row) = slots[index].take() {
                        if position <= *pivot {
                            left.push(row);
                        } else {
                            right.push(row);
                        }
                    }
                }
                (left, right)
            }
            SplitPoint::Categorical { category } => rows.into_iter().partition(|row| {
                row.value(self.column).and_then(|f| f.as_category()) == Some(category.as_str())
            }),
        }
    }
}

impl fmt::Display for SplitCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.point {
            SplitPoint::Numeric { threshold, pivot } => write!(
                f,
                "col {} <= {} (pivot {}, gini {:.6})",
                self.column, threshold, pivot, self.impurity
            ),
            SplitPoint::Categorical { category } => write!(
                f,
                "col {} == {} (gini {:.6})",
                self.column, category, self.impurity
            ),
        }
    }
}

/// Stable: equal values keep their incoming order.
pub(crate) fn sorted_order(rows: &[Row], column: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        let va = rows[a].numeric(column).unwrap_or(f64::NAN);
        let vb = rows[b].numeric(column).unwrap_or(f64::NAN);
        va.total_cmp(&vb)
    });
    order
}
