mod attribute;

pub use attribute::{Attribute, AttributeKind};
