use crate::core::instances::Dataset;
use crate::loaders::arff::parser::{build_schema, parse_data_line, parse_header};
use crate::loaders::{DatasetLoader, LoadedDataset};
use crate::utils::file_parsing::is_comment_or_empty;
use std::fs::File;
use std::io::{BufRead, BufReader, Error, ErrorKind};
use std::path::PathBuf;
use tracing::info;

/// Loads a whole ARFF file. The class attribute must be nominal; when no
/// index is given the last attribute is used.
#[derive(Debug, Clone)]
pub struct ArffFileLoader {
    path: PathBuf,
    class_index: Option<usize>,
}

impl ArffFileLoader {
    pub fn new(path: PathBuf, class_index: Option<usize>) -> Self {
        Self { path, class_index }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl DatasetLoader for ArffFileLoader {
    fn load(&self) -> Result<LoadedDataset, Error> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        let header = parse_header(&mut reader)?;

        let class_index = match self.class_index {
            Some(i) => i,
            None => header.attributes.len().checked_sub(1).ok_or_else(|| {
                Error::new(ErrorKind::InvalidData, "ARFF header declares no attributes")
            })?,
        };
        let schema = build_schema(&header, class_index)?;

        let mut rows = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if is_comment_or_empty(&line, '%') {
                continue;
            }
            let row = parse_data_line(&header, class_index, line.trim(), rows.len()).map_err(|e| {
                Error::new(
                    ErrorKind::InvalidData,
                    format!("Invalid data in line '{}' (after @data, line {}): {e}", line.trim(), line_no + 1),
                )
            })?;
            rows.push(row);
        }

        info!(
            path = %self.path.display(),
            relation = schema.relation_name(),
            rows = rows.len(),
            attributes = schema.number_of_attributes(),
            classes = schema.n_classes(),
            "loaded ARFF dataset"
        );
        Ok(LoadedDataset {
            dataset: Dataset::new(rows),
            schema,
        })
    }
}
