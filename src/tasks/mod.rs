mod train_test_evaluator;

pub use train_test_evaluator::{TaskError, TrainTestEvaluator};
