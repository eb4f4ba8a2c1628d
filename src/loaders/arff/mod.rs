mod arff_file_loader;
mod parser;

pub use arff_file_loader::ArffFileLoader;
