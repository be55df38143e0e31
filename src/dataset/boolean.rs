use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShallowNnError;

/// Every pair of binary inputs, in the row order shared by all truth tables.
pub const BINARY_OPERATOR_INPUTS: [[f64; 2]; 4] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
];

pub const XOR_OUTPUTS: [[f64; 1]; 4] = [[0.0], [1.0], [1.0], [0.0]];

pub const OR_OUTPUTS: [[f64; 1]; 4] = [[0.0], [1.0], [1.0], [1.0]];

pub const AND_OUTPUTS: [[f64; 1]; 4] = [[0.0], [0.0], [0.0], [1.0]];

/// Selects which boolean function a run learns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanOp {
    #[default]
    Xor,
    Or,
    And,
}

impl BooleanOp {
    /// Target column for `BINARY_OPERATOR_INPUTS`.
    pub fn outputs(self) -> &'static [[f64; 1]; 4] {
        match self {
            BooleanOp::Xor => &XOR_OUTPUTS,
            BooleanOp::Or => &OR_OUTPUTS,
            BooleanOp::And => &AND_OUTPUTS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BooleanOp::Xor => "xor",
            BooleanOp::Or => "or",
            BooleanOp::And => "and",
        }
    }
}

impl std::fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BooleanOp {
    type Err = ShallowNnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xor" => Ok(BooleanOp::Xor),
            "or" => Ok(BooleanOp::Or),
            "and" => Ok(BooleanOp::And),
            other => Err(ShallowNnError::InvalidConfig(format!(
                "unknown problem '{other}', expected one of: xor, or, and"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_agree_with_boolean_logic() {
        for (row, input) in BINARY_OPERATOR_INPUTS.iter().enumerate() {
            let a = input[0] == 1.0;
            let b = input[1] == 1.0;
            assert_eq!(BooleanOp::Xor.outputs()[row][0] == 1.0, a ^ b);
            assert_eq!(BooleanOp::Or.outputs()[row][0] == 1.0, a || b);
            assert_eq!(BooleanOp::And.outputs()[row][0] == 1.0, a && b);
        }
    }

    #[test]
    fn serializes_as_lowercase_name() {
        assert_eq!(serde_json::to_string(&BooleanOp::And).unwrap(), "\"and\"");
        let op: BooleanOp = serde_json::from_str("\"or\"").unwrap();
        assert_eq!(op, BooleanOp::Or);
        assert_eq!(BooleanOp::Xor.to_string(), "xor");
    }

    #[test]
    fn parses_names_case_insensitively() {
        for op in [BooleanOp::Xor, BooleanOp::Or, BooleanOp::And] {
            assert_eq!(op.name().parse::<BooleanOp>().unwrap(), op);
        }
        assert_eq!("AND".parse::<BooleanOp>().unwrap(), BooleanOp::And);
        assert!(matches!("nand".parse::<BooleanOp>(), Err(ShallowNnError::InvalidConfig(_))));
    }
}
