mod nominal_attribute_binary_test;

pub use instance_conditional_test::{Branch, InstanceConditionalTest, SplitTest};
pub use nominal_attribute_binary_test::NominalAttributeBinaryTest;
pub use numeric_attribute_binary_test::NumericAttributeBinaryTest;
