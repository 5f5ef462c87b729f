//! Arithmetic dispatch.

use std::fmt;
use std::str::FromStr;

use crate::error::{PlaygroundError, Result};

/// Results are rounded to this many decimal places.
const DECIMALS: i32 = 6;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MathOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl MathOp {
    pub const ALL: [MathOp; 5] = [
        MathOp::Add,
        MathOp::Subtract,
        MathOp::Multiply,
        MathOp::Divide,
        MathOp::Power,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MathOp::Add => "add",
            MathOp::Subtract => "subtract",
            MathOp::Multiply => "multiply",
            MathOp::Divide => "divide",
            MathOp::Power => "power",
        }
    }

    /// Display symbol used when echoing a calculation back to the user.
    pub fn symbol(self) -> char {
        match self {
            MathOp::Add => '+',
            MathOp::Subtract => '-',
            MathOp::Multiply => '×',
            MathOp::Divide => '÷',
            MathOp::Power => '^',
        }
    }
}

impl FromStr for MathOp {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self> {
        MathOp::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| PlaygroundError::InvalidOperation(s.to_string()))
    }
}

/// Apply `op` to `a` and `b`, rounding the result to six decimal places.
///
/// `power` passes NaN / infinite results straight through; only non-finite
/// operands and division by zero are errors.
pub fn calculate(a: f64, b: f64, op: MathOp) -> Result<f64> {
    if !a.is_finite() || !b.is_finite() {
        return Err(PlaygroundError::InvalidInput);
    }
    let raw = match op {
        MathOp::Add => a + b,
        MathOp::Subtract => a - b,
        MathOp::Multiply => a * b,
        MathOp::Divide => {
            if b == 0.0 {
                return Err(PlaygroundError::DivideByZero);
            }
            a / b
        }
        MathOp::Power => a.powf(b),
    };
    Ok(round_decimals(raw))
}

fn round_decimals(value: f64) -> f64 {
    // Past 1e15 an f64 has no fractional digits left to round.
    if !value.is_finite() || value.abs() >= 1e15 {
        return value;
    }
    let scale = 10f64.powi(DECIMALS);
    let rounded = (value * scale).round() / scale;
    // Avoid handing back -0 for tiny negative results.
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// A completed calculation, as echoed back to the user.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calculation {
    pub a: f64,
    pub b: f64,
    pub op: MathOp,
    pub result: f64,
}

impl Calculation {
    pub fn new(a: f64, b: f64, op: MathOp) -> Result<Self> {
        let result = calculate(a, b, op)?;
        Ok(Self { a, b, op, result })
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = {}", self.a, self.op.symbol(), self.b, self.result)
    }
}
