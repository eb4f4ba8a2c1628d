mod csv_file_loader;

pub use csv_file_loader::{CsvFileLoader, CsvLayout};
