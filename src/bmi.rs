//! BMI computation and classification
//!
//! Inputs are canonical (kilograms, meters). Display units are resolved by
//! [`Weight`] and [`Height`] before anything here runs.

use serde::Serialize;

use crate::category::{BmiCategory, Color, classify};
use crate::gauge::{self, GaugeReading};
use crate::units::{Height, Weight, round_to_tenth};

/// Outcome of one BMI computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiResult {
    /// BMI rounded to one decimal
    pub bmi: f64,
    /// Category of the unrounded BMI
    pub category: BmiCategory,
    /// Color of `category`
    pub color: Color,
}

impl BmiResult {
    /// Gauge needle and segments for this result
    #[must_use]
    pub fn gauge(&self) -> GaugeReading {
        gauge::reading(self.bmi)
    }
}

/// Compute BMI from canonical weight and height
///
/// Returns `None` when either input is non-positive or not finite; that is
/// the "incomplete input" state, not an error.
///
/// Classification uses the unrounded value, so a raw 24.96 is shown as 25.0
/// but still classified as Normal Weight. Rounding is half away from zero.
///
/// # Example
///
/// ```rust
/// use bmi_gauge::bmi::compute_bmi;
/// use bmi_gauge::category::BmiCategory;
///
/// let result = compute_bmi(70.0, 1.70).unwrap();
/// assert_eq!(result.bmi, 24.2);
/// assert_eq!(result.category, BmiCategory::Normal);
/// assert!(compute_bmi(70.0, 0.0).is_none());
/// ```
#[must_use]
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> Option<BmiResult> {
    if !is_positive(weight_kg) || !is_positive(height_m) {
        return None;
    }

    let raw = weight_kg / (height_m * height_m);
    if !raw.is_finite() {
        return None;
    }

    let row = classify(raw);
    Some(BmiResult {
        bmi: round_to_tenth(raw),
        category: row.category,
        color: row.color,
    })
}

/// Compute BMI from measurements in any display unit
#[must_use]
pub fn calculate(weight: Weight, height: Height) -> Option<BmiResult> {
    compute_bmi(weight.to_kilograms(), height.to_meters())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
