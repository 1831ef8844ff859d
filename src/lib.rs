//! BMI Gauge
//!
//! This crate provides the computational core of a body-mass-index calculator:
//! - Unit conversion between kilograms/pounds and centimeters/feet-inches
//! - BMI computation and classification against a fixed category table
//! - Geometry for a semicircular gauge (needle rotation and colored bands)
//!
//! Around the core it offers an immutable session state with reducer-style
//! transitions, a debouncer for recomputation, and a health-tips contract
//! with a Gemini backend (feature `gemini`).
//!
//! # Example
//!
//! ```rust
//! use bmi_gauge::{BmiCategory, Height, Weight, calculate};
//!
//! let result = calculate(Weight::Metric { kg: 70.0 }, Height::Metric { cm: 170.0 }).unwrap();
//! assert_eq!(result.bmi, 24.2);
//! assert_eq!(result.category, BmiCategory::Normal);
//!
//! let gauge = result.gauge();
//! println!("needle at {:.1} degrees", gauge.needle.rotation_degrees);
//! ```

pub mod bmi;
pub mod category;
pub mod debounce;
pub mod error;
pub mod gauge;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod state;
pub mod tips;
pub mod units;

pub use bmi::{BmiResult, calculate, compute_bmi};
pub use category::{BmiCategory, CATEGORIES, CategoryBoundary, Color, classify};
pub use debounce::{Debouncer, RECOMPUTE_DELAY};
pub use error::{Result, TipsError};
pub use gauge::{GaugeLayout, GaugeReading, GaugeSegment, NeedleState};
pub use state::{CalculatorState, HeightEdit, TipsRequest, TipsResponse, TipsState, UnitSwitch};
pub use tips::{HealthTips, TipsProvider, fetch_tips};
pub use units::{Height, HeightUnit, Weight, WeightUnit};

/// Compute BMI from raw input text, as typed into the form
///
/// Each field goes through [`units::parse_field`], so malformed text reads as
/// zero and yields `None` rather than an error.
///
/// # Example
///
/// ```rust
/// use bmi_gauge::{HeightUnit, WeightUnit, calculate_from_text};
///
/// let result = calculate_from_text("100", WeightUnit::Kilograms, &["160"], HeightUnit::Centimeters);
/// assert_eq!(result.map(|r| r.bmi), Some(39.1));
/// assert!(calculate_from_text("", WeightUnit::Kilograms, &["160"], HeightUnit::Centimeters).is_none());
/// ```
#[must_use]
pub fn calculate_from_text(
    weight: &str,
    weight_unit: WeightUnit,
    height: &[&str],
    height_unit: HeightUnit,
) -> Option<BmiResult> {
    let field = |i: usize| height.get(i).map_or(0.0, |text| units::parse_field(text));

    let weight = match weight_unit {
        WeightUnit::Kilograms => Weight::Metric {
            kg: units::parse_field(weight),
        },
        WeightUnit::Pounds => Weight::Imperial {
            lbs: units::parse_field(weight),
        },
    };
    let height = match height_unit {
        HeightUnit::Centimeters => Height::Metric { cm: field(0) },
        HeightUnit::FeetInches => Height::Imperial {
            feet: field(0),
            inches: field(1),
        },
    };

    calculate(weight, height)
}
