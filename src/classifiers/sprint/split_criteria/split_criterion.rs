pub trait SplitCriterion {
    fn impurity_of_distribution(&self, class_counts: &[usize]) -> f64;

    fn impurity_of_split(&self, match_counts: &[usize], non_match_counts: &[usize]) -> f64 {
        let match_total: usize = match_counts.iter().sum();
        let non_match_total: usize = non_match_counts.iter().sum();
        let total = match_total + non_match_total;
        if total == 0 {
            return 0.0;
        }

        let mut impurity = 0.0;
        for (counts, side_total) in [(match_counts, match_total), (non_match_counts, non_match_total)] {
            if side_total > 0 {
                impurity += self.impurity_of_distribution(counts) * (side_total as f64 / total as f64);
            }
        }
        impurity
    }
}
