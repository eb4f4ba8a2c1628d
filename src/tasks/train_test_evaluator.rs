use crate::classifiers::sprint::{DecisionTree, SprintTreeBuilder};
use crate::error::SprintError;
use crate::evaluation::{EvaluationReport, classify};
use crate::loaders::{DatasetLoader, LoadedDataset};
use cpu_time::ThreadTime;
use std::io;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to load dataset: {0}")]
    Load(#[from] io::Error),
    #[error(transparent)]
    Sprint(#[from] SprintError),
    #[error("invalid task parameter: {0}")]
    InvalidParameter(String),
}

/// With `test_fraction == 0` the tree is evaluated on its own training rows.
pub struct TrainTestEvaluator {
    loader: Box<dyn DatasetLoader>,
    impurity_threshold: f64,
    test_fraction: f64,
    seed: u64,
    tree: Option<DecisionTree>,
}

impl TrainTestEvaluator {
    pub fn new(
        loader: Box<dyn DatasetLoader>,
        impurity_threshold: f64,
        test_fraction: f64,
        seed: u64,
    ) -> Result<Self, TaskError> {
        if !(0.0..1.0).contains(&test_fraction) {
            return Err(TaskError::InvalidParameter(format!(
                "test_fraction must be in [0, 1), got {test_fraction}"
            )));
        }
        if !impurity_threshold.is_finite() || impurity_threshold < 0.0 {
            return Err(SprintError::InvalidThreshold(impurity_threshold).into());
        }
        Ok(Self {
            loader,
            impurity_threshold,
            test_fraction,
            seed,
            tree: None,
        })
    }

    /// The tree grown by the last successful `run`.
    pub fn tree(&self) -> Option<&DecisionTree> {
        self.tree.as_ref()
    }

    pub fn run(&mut self) -> Result<EvaluationReport, TaskError> {
        let LoadedDataset { dataset, schema } = self.loader.load()?;
        if dataset.is_empty() {
            return Err(SprintError::EmptyDataset.into());
        }

        let (train, test) = if self.test_fraction > 0.0 {
            dataset.split_holdout(self.test_fraction, self.seed)
        } else {
            (dataset.clone(), dataset)
        };
        info!(
            train = train.len(),
            test = test.len(),
            seed = self.seed,
            "prepared train/test split"
        );
        let train_rows = train.len();

        let builder = SprintTreeBuilder::new(schema.n_classes(), self.impurity_threshold)?;
        let start = ThreadTime::now();
        let tree = builder.build(train, &schema)?;
        let build_seconds = start.elapsed().as_secs_f64();

        let start = ThreadTime::now();
        let confusion = classify(&test, &tree, &schema)?;
        let classify_seconds = start.elapsed().as_secs_f64();

        let report = EvaluationReport {
            relation: schema.relation_name().to_string(),
            train_rows,
            test_rows: test.len(),
            n_nodes: tree.n_nodes(),
            n_leaves: tree.n_leaves(),
            depth: tree.depth(),
            impurity_threshold: self.impurity_threshold,
            build_seconds,
            classify_seconds,
            accuracy: confusion.accuracy(),
            error: confusion.error(),
            confusion,
            generated_at: EvaluationReport::timestamp_now(),
        };
        self.tree = Some(tree);
        Ok(report)
    }
}
