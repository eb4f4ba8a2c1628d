use crate::loaders::{ArffFileLoader, CsvFileLoader, CsvLayout, DatasetLoader};
use crate::tasks::TrainTestEvaluator;
use crate::ui::types::choices::{LoaderChoice, TrainTestParams};
use anyhow::{Context, Result};

pub fn build_loader(choice: LoaderChoice) -> Box<dyn DatasetLoader> {
    match choice {
        LoaderChoice::Arff(p) => Box::new(ArffFileLoader::new(p.path, p.class_index)),
        LoaderChoice::Csv(p) => Box::new(CsvFileLoader::new(
            p.path,
            CsvLayout {
                delimiter: p.delimiter,
                has_header: p.has_header,
                label_column: p.label_column,
                n_classes: p.n_classes,
                attribute_kinds: p.attribute_kinds,
                label_bins: p.label_bins,
            },
        )),
    }
}

pub fn build_evaluator(params: &TrainTestParams) -> Result<TrainTestEvaluator> {
    TrainTestEvaluator::new(
        build_loader(params.loader.clone()),
        params.impurity_threshold,
        params.test_fraction,
        params.seed,
    )
    .context("failed to construct TrainTestEvaluator")
}
