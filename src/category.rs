//! BMI category boundary table
//!
//! One static, ordered table drives classification, gauge segments and the
//! reference legend. Order is lightest to heaviest; the last entry has an
//! infinite upper bound so every value lands somewhere.

use std::fmt;

use serde::{Deserialize, Serialize};

/// BMI category, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight = 0,
    #[serde(rename = "Normal Weight")]
    Normal = 1,
    #[serde(rename = "Overweight")]
    Overweight = 2,
    #[serde(rename = "Obese")]
    Obese = 3,
}

impl BmiCategory {
    /// All categories, lightest to heaviest
    pub const ALL: [Self; 4] = [Self::Underweight, Self::Normal, Self::Overweight, Self::Obese];

    /// Human readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal Weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    /// Table entry for this category
    #[must_use]
    pub fn boundary(&self) -> &'static CategoryBoundary {
        &CATEGORIES[*self as usize]
    }

    /// Display color for this category
    #[must_use]
    pub fn color(&self) -> Color {
        self.boundary().color
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A `#rrggbb` display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    pub const BLUE: Self = Self("#3b82f6");
    pub const GREEN: Self = Self("#10b981");
    pub const ORANGE: Self = Self("#f59e0b");
    pub const RED: Self = Self("#ef4444");

    /// The color as written, including the leading `#`
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Decode to an RGB triplet
    #[must_use]
    pub fn rgb(&self) -> Option<[u8; 3]> {
        let bytes = hex::decode(self.0.strip_prefix('#')?).ok()?;
        bytes.try_into().ok()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One row of the category table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryBoundary {
    pub category: BmiCategory,
    /// Exclusive upper bound used for classification
    pub upper_bound: f64,
    /// Threshold shown in the reference legend (24.9 rather than 25, etc.)
    pub display_max: Option<f64>,
    pub color: Color,
}

impl CategoryBoundary {
    /// Inclusive lower bound: the previous row's upper bound, or 0
    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        match self.category as usize {
            0 => 0.0,
            i => CATEGORIES[i - 1].upper_bound,
        }
    }

    /// Legend text for the reference table
    #[must_use]
    pub fn reference_label(&self) -> String {
        match self.display_max {
            Some(max) => format!("< {max}"),
            None => format!("> {:.1}", self.lower_bound()),
        }
    }

    /// Whether `bmi` falls in `[lower_bound, upper_bound)`
    #[must_use]
    pub fn contains(&self, bmi: f64) -> bool {
        bmi >= self.lower_bound() && bmi < self.upper_bound
    }
}

/// The category table, lightest to heaviest
pub static CATEGORIES: [CategoryBoundary; 4] = [
    CategoryBoundary {
        category: BmiCategory::Underweight,
        upper_bound: 18.5,
        display_max: Some(18.5),
        color: Color::BLUE,
    },
    CategoryBoundary {
        category: BmiCategory::Normal,
        upper_bound: 25.0,
        display_max: Some(24.9),
        color: Color::GREEN,
    },
    CategoryBoundary {
        category: BmiCategory::Overweight,
        upper_bound: 30.0,
        display_max: Some(29.9),
        color: Color::ORANGE,
    },
    CategoryBoundary {
        category: BmiCategory::Obese,
        upper_bound: f64::INFINITY,
        display_max: None,
        color: Color::RED,
    },
];

/// Find the table row for a BMI value
///
/// Scans in ascending order and returns the first row whose exclusive upper
/// bound exceeds `bmi`. Values that match nothing (NaN) land in the last row.
///
/// # Example
///
/// ```rust
/// use bmi_gauge::category::{classify, BmiCategory};
///
/// assert_eq!(classify(24.96).category, BmiCategory::Normal);
/// assert_eq!(classify(25.0).category, BmiCategory::Overweight);
/// ```
#[must_use]
pub fn classify(bmi: f64) -> &'static CategoryBoundary {
    CATEGORIES
        .iter()
        .find(|row| bmi < row.upper_bound)
        .unwrap_or(&CATEGORIES[CATEGORIES.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, BmiCategory::Underweight)]
    #[case(18.49, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::Normal)]
    #[case(24.96, BmiCategory::Normal)]
    #[case(25.0, BmiCategory::Overweight)]
    #[case(29.99, BmiCategory::Overweight)]
    #[case(30.0, BmiCategory::Obese)]
    #[case(1000.0, BmiCategory::Obese)]
    fn classify_cases(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify(bmi).category, expected);
    }

    #[test]
    fn table_is_strictly_increasing_in_display_order() {
        for pair in CATEGORIES.windows(2) {
            assert!(pair[0].upper_bound < pair[1].upper_bound);
        }
        for (row, category) in CATEGORIES.iter().zip(BmiCategory::ALL) {
            assert_eq!(row.category, category);
            assert_eq!(category.boundary(), row);
        }
        assert!(CATEGORIES[CATEGORIES.len() - 1].upper_bound.is_infinite());
    }

    #[test]
    fn exactly_one_row_contains_each_value() {
        for hundredths in 0..6000_i32 {
            let bmi = f64::from(hundredths) / 100.0;
            let matching: Vec<_> = CATEGORIES.iter().filter(|row| row.contains(bmi)).collect();
            assert_eq!(matching.len(), 1, "bmi {bmi}");
            assert_eq!(matching[0], classify(bmi));
        }
    }

    #[rstest]
    #[case(BmiCategory::Underweight, "< 18.5")]
    #[case(BmiCategory::Normal, "< 24.9")]
    #[case(BmiCategory::Overweight, "< 29.9")]
    #[case(BmiCategory::Obese, "> 30.0")]
    fn reference_labels(#[case] category: BmiCategory, #[case] expected: &str) {
        assert_eq!(category.boundary().reference_label(), expected);
    }

    #[test]
    fn colors_decode_to_rgb() {
        assert_eq!(Color::BLUE.rgb(), Some([0x3b, 0x82, 0xf6]));
        assert_eq!(Color::GREEN.rgb(), Some([0x10, 0xb9, 0x81]));
        assert_eq!(BmiCategory::Obese.color(), Color::RED);
        assert_eq!(Color::RED.to_string(), "#ef4444");
    }

    #[test]
    fn labels_serialize_as_display_text() {
        assert_eq!(BmiCategory::Normal.to_string(), "Normal Weight");
        assert_eq!(
            serde_json::to_string(&BmiCategory::Normal).unwrap(),
            "\"Normal Weight\""
        );
        let parsed: BmiCategory = serde_json::from_str("\"Overweight\"").unwrap();
        assert_eq!(parsed, BmiCategory::Overweight);
    }
}
