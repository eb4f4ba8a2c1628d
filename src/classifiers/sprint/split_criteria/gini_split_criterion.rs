use crate::classifiers::sprint::split_criteria::SplitCriterion;

/// Gini impurity, `1 - Σ p_k²` over class proportions.
#[derive(Debug, Clone, Copy, Default)]
pub struct GiniSplitCriterion;

impl GiniSplitCriterion {
    pub fn new() -> Self {
        Self
    }
}

impl SplitCriterion for GiniSplitCriterion {
    fn impurity_of_distribution(&self, class_counts: &[usize]) -> f64 {
        let total: usize = class_counts.iter().sum();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        let mut gini = 1.0;
        for &count in class_counts {
            let rel_freq = count as f64 / total;
            gini -= rel_freq * rel_freq;
        }
        gini
    }
}
