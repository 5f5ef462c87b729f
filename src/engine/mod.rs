//! Stateless utility engines.
//!
//! Each engine is a pure function of its inputs (and, for the array and color
//! engines, of the random source handed in). None of them touch counters or log;
//! bookkeeping happens in [`crate::Playground`].

pub mod array;
pub mod color;
pub mod math;
pub mod text;

pub use array::{MAX_ARRAY_LENGTH, generate, reverse, sort, sum_and_average};
pub use color::ColorSample;
pub use math::{Calculation, MathOp, calculate};
pub use text::{TextCounts, TextOp, TextResult, process};
