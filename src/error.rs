//! Error kinds surfaced by every engine and controller in the crate.

use thiserror::Error;

/// Errors returned by the playground engines and controllers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaygroundError {
    /// An operand was NaN or infinite.
    #[error("please enter valid numbers")]
    InvalidInput,

    #[error("cannot divide by zero")]
    DivideByZero,

    /// The operation name did not match any known operation.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Text was empty (or whitespace only) for a transform that needs content.
    #[error("please enter some text first")]
    EmptyInput,

    #[error("invalid range: length {length}, min {min}, max {max}")]
    InvalidRange {
        /// Requested element count.
        length: i64,
        /// Lower bound (inclusive).
        min: i32,
        /// Upper bound (inclusive).
        max: i32,
    },

    /// Sum/average (or a workspace operation) was requested on an empty array.
    #[error("generate an array first")]
    EmptyArray,

    /// The play area cannot contain the target.
    #[error("bounds {width}x{height} cannot hold a target of size {size}")]
    InvalidBounds {
        /// Play area width.
        width: f64,
        /// Play area height.
        height: f64,
        /// Target edge length.
        size: f64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PlaygroundError {
    /// Stable snake_case code for the error kind, used when crossing into JS.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::DivideByZero => "divide_by_zero",
            Self::InvalidOperation(_) => "invalid_operation",
            Self::EmptyInput => "empty_input",
            Self::InvalidRange { .. } => "invalid_range",
            Self::EmptyArray => "empty_array",
            Self::InvalidBounds { .. } => "invalid_bounds",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlaygroundError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let all = [
            PlaygroundError::InvalidInput,
            PlaygroundError::DivideByZero,
            PlaygroundError::InvalidOperation("mod".into()),
            PlaygroundError::EmptyInput,
            PlaygroundError::InvalidRange { length: -1, min: 0, max: 1 },
            PlaygroundError::EmptyArray,
            PlaygroundError::InvalidBounds { width: 1.0, height: 1.0, size: 50.0 },
            PlaygroundError::InvalidConfig("bad".into()),
        ];
        let mut codes: Vec<&str> = all.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn test_display_mentions_operation_name() {
        let err = PlaygroundError::InvalidOperation("modulo".into());
        assert_eq!(err.to_string(), "invalid operation: modulo");
    }
}
