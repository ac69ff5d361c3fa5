//! Calculator tools.
//!
//! - `add`: sum of two numbers
//! - `calculate`: add, subtract, multiply or divide two numbers
//!
//! Results are rendered the way JavaScript prints numbers, so clients see
//! `3` rather than `3.0`, and `Infinity` rather than `inf`.

pub mod add;
pub mod calculate;

pub use add::{AddParams, AddTool};
pub use calculate::{CalculateParams, CalculateTool, Operation};

/// Render a number using JavaScript's default number-to-string rules.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // Also folds negative zero.
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let exponential = format!("{:e}", value);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponential,
    }
}
