use crate::evaluation::ConfusionMatrix;
use chrono::{Local, SecondsFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    StrumDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
    Tsv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub relation: String,
    pub train_rows: usize,
    pub test_rows: usize,
    pub n_nodes: usize,
    pub n_leaves: usize,
    pub depth: usize,
    pub impurity_threshold: f64,
    pub build_seconds: f64,
    pub classify_seconds: f64,
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    pub error: f64,
    pub generated_at: String,
}

impl EvaluationReport {
    pub fn timestamp_now() -> String {
        Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn export(&self, path: &Path, format: ReportFormat) -> io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_to(&mut w, format)?;
        w.flush()
    }

    // csv/tsv carry only the confusion grid
    pub fn write_to<W: Write>(&self, w: &mut W, format: ReportFormat) -> io::Result<()> {
        match format {
            ReportFormat::Text => write!(w, "{self}"),
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, self).map_err(io::Error::other)?;
                writeln!(w)
            }
            ReportFormat::Csv => self.write_grid(w, ','),
            ReportFormat::Tsv => self.write_grid(w, '\t'),
        }
    }

    fn write_grid<W: Write>(&self, w: &mut W, sep: char) -> io::Result<()> {
        let k = self.confusion.n_classes();
        let mut header = vec!["actual".to_string()];
        header.extend((0..k).map(|c| format!("predicted_{c}")));
        writeln!(w, "{}", header.join(&sep.to_string()))?;

        for (actual, row) in self.confusion.rows().enumerate() {
            let mut cells = vec![actual.to_string()];
            cells.extend(row.iter().map(u64::to_string));
            writeln!(w, "{}", cells.join(&sep.to_string()))?;
        }
        Ok(())
    }
}

impl Display for EvaluationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "relation: {}", self.relation)?;
        writeln!(
            f,
            "train rows: {}  test rows: {}",
            self.train_rows, self.test_rows
        )?;
        writeln!(
            f,
            "tree: {} nodes, {} leaves, depth {} (threshold {})",
            self.n_nodes, self.n_leaves, self.depth, self.impurity_threshold
        )?;
        writeln!(
            f,
            "cpu: build {:.6}s  classify {:.6}s",
            self.build_seconds, self.classify_seconds
        )?;
        writeln!(f, "========= Confusion Matrix ========")?;
        write!(f, "{}", self.confusion)?;
        writeln!(f, "Success: {} Error: {}", self.accuracy, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::tempdir;

    fn report() -> EvaluationReport {
        let mut confusion = ConfusionMatrix::new(2);
        confusion.add(0, 0);
        confusion.add(0, 0);
        confusion.add(1, 0);
        confusion.add(1, 1);
        EvaluationReport {
            relation: "toy".into(),
            train_rows: 4,
            test_rows: 4,
            n_nodes: 3,
            n_leaves: 2,
            depth: 1,
            impurity_threshold: 0.4,
            build_seconds: 0.0,
            classify_seconds: 0.0,
            accuracy: confusion.accuracy(),
            error: confusion.error(),
            confusion,
            generated_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    fn render(format: ReportFormat) -> String {
        let mut buf = Vec::new();
        report().write_to(&mut buf, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_ends_with_matrix_and_success_line() {
        let text = render(ReportFormat::Text);
        assert!(text.contains("2 0\n1 1\n"));
        assert!(text.ends_with("Success: 0.75 Error: 0.25\n"));
    }

    #[test]
    fn csv_and_tsv_carry_the_grid() {
        assert_eq!(
            render(ReportFormat::Csv),
            "actual,predicted_0,predicted_1\n0,2,0\n1,1,1\n"
        );
        assert_eq!(
            render(ReportFormat::Tsv),
            "actual\tpredicted_0\tpredicted_1\n0\t2\t0\n1\t1\t1\n"
        );
    }

    #[test]
    fn json_round_trips() {
        let back: EvaluationReport = serde_json::from_str(&render(ReportFormat::Json)).unwrap();
        assert_eq!(back, report());
    }

    #[test]
    fn export_writes_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        report().export(&path, ReportFormat::Csv).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("actual,"));
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!(ReportFormat::from_str("JSON").unwrap(), ReportFormat::Json);
        assert_eq!(ReportFormat::from_str("tsv").unwrap(), ReportFormat::Tsv);
        assert!(ReportFormat::from_str("xml").is_err());
        assert_eq!(ReportFormat::default().to_string(), "text");
    }
}
