//! Dataset sources. Each loader reads a whole file into memory and pairs
//! the rows with the schema they were resolved against.

pub mod arff;
pub mod csv;
mod label_bins;

pub use arff::ArffFileLoader;
pub use csv::{CsvFileLoader, CsvLayout};
pub use label_bins::LabelBins;

use crate::core::attribute_schema::AttributeSchema;
use crate::core::instances::Dataset;
use std::io::Error;

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub schema: AttributeSchema,
}

pub trait DatasetLoader {
    fn load(&self) -> Result<LoadedDataset, Error>;
}
