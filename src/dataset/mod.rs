pub mod boolean;

pub use boolean::{BooleanOp, AND_OUTPUTS, BINARY_OPERATOR_INPUTS, OR_OUTPUTS, XOR_OUTPUTS};
