pub mod attribute_schema;
pub mod attributes;
pub mod instances;

pub use attribute_schema::AttributeSchema;
