//! Unit conversion between display units and canonical units
//!
//! All computation happens in kilograms and meters. Weight and height are
//! modelled as closed unions over the two display systems so callers
//! normalize with an exhaustive match instead of branching on flags.
//!
//! The display conversions (`kg_to_lbs` and friends) are a convenience for
//! unit toggles: they return `None` when there is nothing sensible to convert,
//! in which case the caller leaves the target field as it was.

use serde::{Deserialize, Serialize};

/// Pounds per kilogram, used when showing a metric weight in pounds
pub const LBS_PER_KG: f64 = 2.20462;
/// Kilograms per pound. Not the exact reciprocal of [`LBS_PER_KG`], so a
/// kg -> lbs -> kg round trip is only stable to about 0.1 kg.
pub const KG_PER_LB: f64 = 0.453592;
/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;
/// Meters per inch
pub const M_PER_INCH: f64 = 0.0254;
/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;
/// Centimeters per meter
pub const CM_PER_M: f64 = 100.0;

/// Display unit for weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lbs")]
    Pounds,
}

/// Display unit for height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeightUnit {
    #[default]
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "ft")]
    FeetInches,
}

/// A weight as entered, in either display system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit")]
pub enum Weight {
    #[serde(rename = "kg")]
    Metric { kg: f64 },
    #[serde(rename = "lbs")]
    Imperial { lbs: f64 },
}

impl Weight {
    /// The display unit this weight was entered in
    #[must_use]
    pub fn unit(&self) -> WeightUnit {
        match self {
            Self::Metric { .. } => WeightUnit::Kilograms,
            Self::Imperial { .. } => WeightUnit::Pounds,
        }
    }

    /// Normalize to kilograms (unrounded)
    #[must_use]
    pub fn to_kilograms(&self) -> f64 {
        match *self {
            Self::Metric { kg } => kg,
            Self::Imperial { lbs } => lbs * KG_PER_LB,
        }
    }
}

/// A height as entered, in either display system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit")]
pub enum Height {
    #[serde(rename = "cm")]
    Metric { cm: f64 },
    #[serde(rename = "ft")]
    Imperial { feet: f64, inches: f64 },
}

impl Height {
    /// The display unit this height was entered in
    #[must_use]
    pub fn unit(&self) -> HeightUnit {
        match self {
            Self::Metric { .. } => HeightUnit::Centimeters,
            Self::Imperial { .. } => HeightUnit::FeetInches,
        }
    }

    /// Normalize to meters (unrounded)
    #[must_use]
    pub fn to_meters(&self) -> f64 {
        match *self {
            Self::Metric { cm } => cm / CM_PER_M,
            Self::Imperial { feet, inches } => (feet * INCHES_PER_FOOT + inches) * M_PER_INCH,
        }
    }
}

/// Whole feet and inches as shown in the imperial height fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeetInches {
    pub feet: u32,
    /// Nominally 0-11. Rounding can produce 12 (e.g. 71.6 total inches gives
    /// 5 ft 12 in); this is kept as is rather than carried into `feet`.
    pub inches: u32,
}

/// Round to one decimal place, half away from zero
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert kilograms to pounds, rounded to one decimal
///
/// Returns `None` for non-positive or non-finite input.
///
/// # Example
///
/// ```rust
/// use bmi_gauge::units::kg_to_lbs;
///
/// assert_eq!(kg_to_lbs(70.0), Some(154.3));
/// assert_eq!(kg_to_lbs(0.0), None);
/// ```
#[must_use]
pub fn kg_to_lbs(kg: f64) -> Option<f64> {
    positive(kg).map(|kg| round_to_tenth(kg * LBS_PER_KG))
}

/// Convert pounds to kilograms (unrounded)
///
/// Returns `None` for non-positive or non-finite input.
#[must_use]
pub fn lbs_to_kg(lbs: f64) -> Option<f64> {
    positive(lbs).map(|lbs| lbs * KG_PER_LB)
}

/// Convert centimeters to whole feet and rounded inches
///
/// Returns `None` for non-positive or non-finite input.
#[must_use]
pub fn cm_to_ft_in(cm: f64) -> Option<FeetInches> {
    let total_inches = positive(cm)? / CM_PER_INCH;

    // Finite and non-negative here, so the casts saturate at worst
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let feet = (total_inches / INCHES_PER_FOOT).floor() as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let inches = (total_inches % INCHES_PER_FOOT).round() as u32;

    Some(FeetInches { feet, inches })
}

/// Convert feet and inches to centimeters, rounded to one decimal
///
/// Converts when at least one of the two is positive. Returns `None` when both
/// are zero, either is negative, or either is not finite.
#[must_use]
pub fn ft_in_to_cm(feet: f64, inches: f64) -> Option<f64> {
    if !feet.is_finite() || !inches.is_finite() || feet < 0.0 || inches < 0.0 {
        return None;
    }
    if feet <= 0.0 && inches <= 0.0 {
        return None;
    }

    Some(round_to_tenth((feet * INCHES_PER_FOOT + inches) * CM_PER_INCH))
}

/// Parse a numeric input field
///
/// Reads the longest leading number (after leading whitespace), so `"70kg"`
/// reads as 70. Empty, malformed, or non-finite text reads as 0, which the
/// BMI computation then treats as incomplete input.
#[must_use]
pub fn parse_field(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let end = numeric_prefix_len(trimmed);
    if end == 0 {
        return 0.0;
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Length in bytes of the leading `[+-]digits[.digits][e[+-]digits]` run
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    i = int_end;

    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        mantissa_digits += frac_end - (i + 1);
        if mantissa_digits > 0 {
            i = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }

    i
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}
