//! SPRINT decision-tree induction over in-memory tables with mixed numeric
//! and categorical attributes.
//!
//! `build_tree` grows a binary tree by repeatedly picking the split with the
//! lowest weighted Gini impurity; `classify` runs rows through a tree and
//! tallies a confusion matrix.

pub mod classifiers;
pub mod core;
pub mod error;
pub mod evaluation;
pub mod loaders;
pub mod tasks;
pub mod ui;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use crate::classifiers::Classifier;
pub use crate::classifiers::sprint::{DecisionTree, build_tree};
pub use crate::core::AttributeSchema;
pub use crate::core::attributes::AttributeKind;
pub use crate::core::instances::{Dataset, Field, Row};
pub use crate::error::{Result, SprintError};
pub use crate::evaluation::{ConfusionMatrix, classify};
