pub mod dataset;
pub mod field;
pub mod row;

pub use dataset::Dataset;
pub use field::Field;
pub use row::Row;
