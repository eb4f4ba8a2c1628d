pub mod best_split_search;
pub mod decision_tree;
pub mod instance_conditional_test;
pub mod nodes;
pub mod split_candidate;
pub mod split_criteria;
pub mod split_evaluator;
mod sprint_tree;

pub use best_split_search::BestSplitSearch;
pub use decision_tree::DecisionTree;
pub use split_candidate::{SplitCandidate, SplitPoint};
pub use split_evaluator::SplitEvaluator;
pub use sprint_tree::{DEFAULT_IMPURITY_THRESHOLD, SprintTreeBuilder, build_tree};
