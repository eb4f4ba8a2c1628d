use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    n_classes: usize,
    /// Row-major `KxK` counts (`actual * K + predicted`).
    counts: Vec<u64>,
}

impl ConfusionMatrix {
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            counts: vec![0; n_classes * n_classes],
        }
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Records one row. Out-of-range classes are ignored.
    pub fn add(&mut self, actual: usize, predicted: usize) {
        if actual >= self.n_classes || predicted >= self.n_classes {
            return;
        }
        let idx = actual * self.n_classes + predicted;
        self.counts[idx] = self.counts[idx].saturating_add(1);
    }

    pub fn get(&self, actual: usize, predicted: usize) -> u64 {
        if actual >= self.n_classes || predicted >= self.n_classes {
            return 0;
        }
        self.counts[actual * self.n_classes + predicted]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn correct(&self) -> u64 {
        (0..self.n_classes).map(|k| self.get(k, k)).sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.correct() as f64 / total as f64
        }
    }

    pub fn error(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (total - self.correct()) as f64 / total as f64
        }
    }

    /// `TP / (TP + FP)` for `class`, `0.0` when nothing was predicted as it.
    pub fn precision(&self, class: usize) -> f64 {
        let tp = self.get(class, class);
        let predicted: u64 = (0..self.n_classes).map(|a| self.get(a, class)).sum();
        if predicted == 0 {
            0.0
        } else {
            tp as f64 / predicted as f64
        }
    }

    /// `TP / (TP + FN)` for `class`, `0.0` when the class never occurs.
    pub fn recall(&self, class: usize) -> f64 {
        let tp = self.get(class, class);
        let support = self.support(class);
        if support == 0 {
            0.0
        } else {
            tp as f64 / support as f64
        }
    }

    pub fn support(&self, class: usize) -> u64 {
        self.row(class).iter().sum()
    }

    pub fn row(&self, actual: usize) -> &[u64] {
        if actual >= self.n_classes {
            return &[];
        }
        let start = actual * self.n_classes;
        &self.counts[start..start + self.n_classes]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        (0..self.n_classes).map(|k| self.row(k))
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(u64::to_string).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfusionMatrix {
        // actual 0: 3 right, 1 as class 1; actual 1: 2 right; actual 2: 1 as class 0
        let mut cm = ConfusionMatrix::new(3);
        for _ in 0..3 {
            cm.add(0, 0);
        }
        cm.add(0, 1);
        cm.add(1, 1);
        cm.add(1, 1);
        cm.add(2, 0);
        cm
    }

    #[test]
    fn totals_and_accuracy() {
        let cm = sample();
        assert_eq!(cm.total(), 7);
        assert_eq!(cm.correct(), 5);
        assert!((cm.accuracy() - 5.0 / 7.0).abs() < 1e-12);
        assert!((cm.accuracy() + cm.error() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn precision_and_recall_per_class() {
        let cm = sample();
        assert!((cm.precision(0) - 0.75).abs() < 1e-12);
        assert!((cm.recall(0) - 0.75).abs() < 1e-12);
        assert!((cm.precision(1) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(cm.recall(1), 1.0);
        assert_eq!(cm.precision(2), 0.0);
        assert_eq!(cm.recall(2), 0.0);
        assert_eq!(cm.support(2), 1);
    }

    #[test]
    fn out_of_range_cells_are_ignored() {
        let mut cm = ConfusionMatrix::new(2);
        cm.add(2, 0);
        cm.add(0, 5);
        assert_eq!(cm.total(), 0);
        assert_eq!(cm.get(9, 9), 0);
        assert_eq!(cm.accuracy(), 0.0);
        assert_eq!(cm.error(), 0.0);
        assert!(cm.row(4).is_empty());
    }

    #[test]
    fn display_is_a_space_separated_grid() {
        assert_eq!(sample().to_string(), "3 1 0\n0 2 0\n1 0 0\n");
    }

    #[test]
    fn rows_follow_class_order() {
        let cm = sample();
        let rows: Vec<&[u64]> = cm.rows().collect();
        assert_eq!(rows, vec![&[3, 1, 0][..], &[0, 2, 0][..], &[1, 0, 0][..]]);
    }
}
