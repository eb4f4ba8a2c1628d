use crate::classifiers::Classifier;
use crate::classifiers::sprint::DecisionTree;
use crate::core::attribute_schema::AttributeSchema;
use crate::core::instances::Dataset;
use crate::error::{Result, SprintError};
use crate::evaluation::ConfusionMatrix;
use tracing::info;

/// Routes every row of `dataset` through `tree` into a confusion matrix.
/// Fails without a partial result on empty input or a mismatched schema.
pub fn classify(
    dataset: &Dataset,
    tree: &DecisionTree,
    schema: &AttributeSchema,
) -> Result<ConfusionMatrix> {
    if dataset.is_empty() {
        return Err(SprintError::EmptyDataset);
    }
    tree.check_schema(schema)?;
    dataset.validate(schema)?;

    let matrix = confusion_matrix(dataset, tree)?;
    info!(
        rows = matrix.total(),
        correct = matrix.correct(),
        accuracy = matrix.accuracy(),
        "classified dataset"
    );
    Ok(matrix)
}

pub fn confusion_matrix<C: Classifier + ?Sized>(
    dataset: &Dataset,
    classifier: &C,
) -> Result<ConfusionMatrix> {
    let n_classes = classifier.n_classes();
    let mut matrix = ConfusionMatrix::new(n_classes);
    for (r, row) in dataset.rows().iter().enumerate() {
        if row.label() >= n_classes {
            return Err(SprintError::InvalidLabel {
                row: r,
                label: row.label().to_string(),
                n_classes,
            });
        }
        let predicted = classifier.predict(row).ok_or_else(|| {
            SprintError::InvalidSchema(format!("row {r} could not be routed to a leaf"))
        })?;
        if predicted >= n_classes {
            return Err(SprintError::InvalidSchema(format!(
                "row {r} was predicted as class {predicted} of {n_classes}"
            )));
        }
        matrix.add(row.label(), predicted);
    }
    Ok(matrix)
}
