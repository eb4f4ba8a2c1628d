use crate::core::attribute_schema::AttributeSchema;
use crate::core::attributes::{Attribute, AttributeKind};
use crate::core::instances::Dataset;
use crate::error::SprintError;
use crate::loaders::label_bins::LabelBins;
use crate::loaders::{DatasetLoader, LoadedDataset};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Error, ErrorKind};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct CsvLayout {
    pub delimiter: char,
    pub has_header: bool,
    /// `None` takes the last column.
    pub label_column: Option<usize>,
    /// Required unless `label_bins` decides the class count.
    pub n_classes: Option<usize>,
    pub attribute_kinds: Vec<AttributeKind>,
    pub label_bins: Option<Vec<f64>>,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: false,
            label_column: None,
            n_classes: None,
            attribute_kinds: Vec::new(),
            label_bins: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvFileLoader {
    path: PathBuf,
    layout: CsvLayout,
}

fn invalid(e: impl ToString) -> Error {
    Error::new(ErrorKind::InvalidData, e.to_string())
}

fn read_error(e: csv::Error) -> Error {
    if e.is_io_error() {
        Error::from(e)
    } else {
        invalid(e)
    }
}

impl CsvFileLoader {
    pub fn new(path: PathBuf, layout: CsvLayout) -> Self {
        Self { path, layout }
    }

    fn label_rule(&self) -> Result<(usize, Option<LabelBins>), Error> {
        let bins = self
            .layout
            .label_bins
            .clone()
            .map(LabelBins::new)
            .transpose()
            .map_err(invalid)?;

        let n_classes = match (&bins, self.layout.n_classes) {
            (Some(b), Some(n)) if b.n_classes() != n => {
                return Err(invalid(format!(
                    "{} label bins make {} classes but n_classes is {n}",
                    b.n_classes() - 1,
                    b.n_classes()
                )));
            }
            (Some(b), _) => b.n_classes(),
            (None, Some(n)) => n,
            (None, None) => {
                return Err(invalid("n_classes is required when no label bins are given"));
            }
        };
        Ok((n_classes, bins))
    }

    fn schema(&self, n_classes: usize, names: Option<Vec<String>>) -> AttributeSchema {
        let columns: BTreeMap<usize, Attribute> = self
            .layout
            .attribute_kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let name = names
                    .as_ref()
                    .and_then(|n| n.get(i).cloned())
                    .unwrap_or_else(|| format!("col{}", i + 1));
                (i + 1, Attribute::new(name, *kind))
            })
            .collect();
        let relation = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed_relation".to_string());
        AttributeSchema::new(relation, n_classes, columns)
    }

    fn delimiter(&self) -> Result<u8, Error> {
        u8::try_from(self.layout.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                invalid(format!(
                    "delimiter {:?} is not a single ASCII character",
                    self.layout.delimiter
                ))
            })
    }
}

fn record_cells(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

impl DatasetLoader for CsvFileLoader {
    fn load(&self) -> Result<LoadedDataset, Error> {
        let (n_classes, bins) = self.label_rule()?;
        let width = self.layout.attribute_kinds.len() + 1;
        let label_column = self.layout.label_column.unwrap_or(width - 1);
        if label_column >= width {
            return Err(invalid(format!(
                "label column {label_column} is outside rows of {width} columns"
            )));
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter()?)
            .has_headers(self.layout.has_header)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(File::open(&self.path)?);

        let mut names = None;
        if self.layout.has_header {
            let mut header = record_cells(reader.headers().map_err(read_error)?);
            if header.len() == width {
                header.remove(label_column);
                names = Some(header);
            }
        }
        let schema = self.schema(n_classes, names);

        let mut text_rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(read_error)?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let mut cells = record_cells(&record);
            let r = text_rows.len();
            if cells.len() != width {
                return Err(invalid(format!(
                    "row {r} has {} columns, expected {width}",
                    cells.len()
                )));
            }

            let raw_label = cells.remove(label_column);
            let label = match &bins {
                Some(b) => {
                    let value: f64 = raw_label.parse().map_err(|_| {
                        invalid(SprintError::UnparsableField {
                            row: r,
                            column: label_column,
                            value: raw_label.clone(),
                        })
                    })?;
                    b.class_of(value).to_string()
                }
                None => raw_label,
            };
            cells.insert(0, label);
            text_rows.push(cells);
        }

        let dataset = Dataset::from_text_rows(&text_rows, &schema).map_err(invalid)?;
        debug!(label_column, binned = bins.is_some(), "resolved CSV labels");
        info!(
            path = %self.path.display(),
            rows = dataset.len(),
            attributes = schema.number_of_attributes(),
            classes = n_classes,
            "loaded CSV dataset"
        );
        Ok(LoadedDataset { dataset, schema })
    }
}
