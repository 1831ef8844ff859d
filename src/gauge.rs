//! Semicircular gauge geometry
//!
//! The gauge spans BMI 10..40 over 180 degrees. Arc angles use the polar
//! convention 180 = low end, 90 = top, 0 = high end, at 6 degrees per BMI
//! unit. The needle is drawn pointing up and rotated, so its rotation is
//! measured from vertical: -90 at the low end, +90 at the high end.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::{BmiCategory, CATEGORIES, CategoryBoundary, Color};

/// Lowest BMI on the scale
pub const MIN_BMI: f64 = 10.0;
/// Highest BMI on the scale
pub const MAX_BMI: f64 = 40.0;
/// Degrees of arc per BMI unit (180 / 30)
pub const DEGREES_PER_BMI: f64 = 180.0 / (MAX_BMI - MIN_BMI);

/// Map a BMI value to its polar angle in degrees
///
/// Linear and decreasing: 10 -> 180, 25 -> 90, 40 -> 0. Not clamped.
#[must_use]
pub fn bmi_to_angle(bmi: f64) -> f64 {
    180.0 - (bmi - MIN_BMI) * DEGREES_PER_BMI
}

/// Clamp a BMI value to the visible range
///
/// Out-of-range values sit at the nearest end of the scale. NaN sits at
/// the low end.
#[must_use]
pub fn clamp_bmi(bmi: f64) -> f64 {
    if bmi.is_nan() {
        MIN_BMI
    } else {
        bmi.clamp(MIN_BMI, MAX_BMI)
    }
}

/// Needle rotation in degrees from vertical for a BMI value
///
/// # Example
///
/// ```rust
/// use bmi_gauge::gauge::needle_rotation;
///
/// assert_eq!(needle_rotation(10.0), -90.0);
/// assert_eq!(needle_rotation(25.0), 0.0);
/// assert_eq!(needle_rotation(40.0), 90.0);
/// ```
#[must_use]
pub fn needle_rotation(bmi: f64) -> f64 {
    90.0 - bmi_to_angle(clamp_bmi(bmi))
}

/// Needle position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeedleState {
    /// Degrees from vertical, negative toward the low end
    pub rotation_degrees: f64,
}

impl NeedleState {
    #[must_use]
    pub fn for_bmi(bmi: f64) -> Self {
        Self {
            rotation_degrees: needle_rotation(bmi),
        }
    }
}

/// One colored band of the gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeSegment {
    pub category: BmiCategory,
    pub color: Color,
    /// Angle of the band's low-BMI edge
    pub start_angle: f64,
    /// Angle of the band's high-BMI edge
    pub end_angle: f64,
}

impl GaugeSegment {
    fn for_boundary(row: &CategoryBoundary) -> Self {
        let lower = row.lower_bound().max(MIN_BMI);
        let upper = row.upper_bound.min(MAX_BMI);
        Self {
            category: row.category,
            color: row.color,
            start_angle: bmi_to_angle(lower),
            end_angle: bmi_to_angle(upper),
        }
    }

    /// Angular width in degrees
    #[must_use]
    pub fn span(&self) -> f64 {
        (self.start_angle - self.end_angle).abs()
    }
}

/// The four fixed gauge bands, lightest to heaviest
///
/// Band edges come from the category table, capped to the scale, so the
/// edges are BMI 10, 18.5, 25, 30 and 40 whatever the current value is.
#[must_use]
pub fn segments() -> [GaugeSegment; 4] {
    std::array::from_fn(|i| GaugeSegment::for_boundary(&CATEGORIES[i]))
}

/// Everything needed to draw the gauge for one value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeReading {
    pub bmi: f64,
    pub clamped_bmi: f64,
    pub needle: NeedleState,
    pub segments: [GaugeSegment; 4],
}

/// Compute the gauge reading for a BMI value
#[must_use]
pub fn reading(bmi: f64) -> GaugeReading {
    GaugeReading {
        bmi,
        clamped_bmi: clamp_bmi(bmi),
        needle: NeedleState::for_bmi(bmi),
        segments: segments(),
    }
}

/// A point in drawing coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Point on a circle for a gauge angle
///
/// Uses `center + radius * (cos(angle - 180), sin(angle - 180))`, so 90 is
/// straight above the center. With y growing downward, 180 lands at
/// `center.x + radius` and 0 at `center.x - radius`.
#[must_use]
pub fn polar_to_cartesian(center: Point, radius: f64, angle_degrees: f64) -> Point {
    let radians = (angle_degrees - 180.0).to_radians();
    Point {
        x: center.x + radius * radians.cos(),
        y: center.y + radius * radians.sin(),
    }
}

/// Stroke path for one arc band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcPath {
    pub start: Point,
    pub end: Point,
    pub radius: f64,
    /// Take the longer way round; set only for spans over 180 degrees
    pub large_arc: bool,
}

impl fmt::Display for ArcPath {
    /// SVG path data: `M x y A r r 0 large 0 x y`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M {} {} A {} {} 0 {} 0 {} {}",
            self.start.x,
            self.start.y,
            self.radius,
            self.radius,
            u8::from(self.large_arc),
            self.end.x,
            self.end.y
        )
    }
}

/// Build the arc between two gauge angles
///
/// The stroke runs from `end_angle`'s point to `start_angle`'s point with a
/// sweep flag of 0.
#[must_use]
pub fn describe_arc(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> ArcPath {
    ArcPath {
        start: polar_to_cartesian(center, radius, end_angle),
        end: polar_to_cartesian(center, radius, start_angle),
        radius,
        large_arc: (end_angle - start_angle).abs() > 180.0,
    }
}

/// Drawing dimensions of the gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeLayout {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
    pub stroke_width: f64,
}

impl Default for GaugeLayout {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 110.0,
            center: Point::new(100.0, 100.0),
            radius: 80.0,
            stroke_width: 20.0,
        }
    }
}

impl GaugeLayout {
    /// Arc for one band
    #[must_use]
    pub fn segment_path(&self, segment: &GaugeSegment) -> ArcPath {
        describe_arc(
            self.center,
            self.radius,
            segment.end_angle,
            segment.start_angle,
        )
    }

    /// Arcs for all four bands, lightest to heaviest
    #[must_use]
    pub fn segment_paths(&self) -> [ArcPath; 4] {
        segments().map(|segment| self.segment_path(&segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    fn assert_point(got: Point, x: f64, y: f64) {
        assert!(
            (got.x - x).abs() < EPS && (got.y - y).abs() < EPS,
            "got {got:?}, expected ({x}, {y})"
        );
    }

    #[rstest]
    #[case(10.0, 180.0)]
    #[case(18.5, 129.0)]
    #[case(25.0, 90.0)]
    #[case(30.0, 60.0)]
    #[case(40.0, 0.0)]
    #[case(45.0, -30.0)]
    fn bmi_to_angle_cases(#[case] bmi: f64, #[case] expected: f64) {
        assert!((bmi_to_angle(bmi) - expected).abs() < EPS);
    }

    #[test]
    fn angle_decreases_with_bmi() {
        let angles: Vec<f64> = (100..=400_i32).map(|t| bmi_to_angle(f64::from(t) / 10.0)).collect();
        assert!(angles.windows(2).all(|w| w[1] < w[0]));
    }

    #[rstest]
    #[case(5.0, 10.0)]
    #[case(10.0, 10.0)]
    #[case(24.2, 24.2)]
    #[case(40.0, 40.0)]
    #[case(72.0, 40.0)]
    #[case(f64::INFINITY, 40.0)]
    #[case(f64::NEG_INFINITY, 10.0)]
    #[case(f64::NAN, 10.0)]
    fn clamp_cases(#[case] bmi: f64, #[case] expected: f64) {
        assert_eq!(clamp_bmi(bmi), expected);
        assert_eq!(clamp_bmi(clamp_bmi(bmi)), clamp_bmi(bmi));
    }

    #[rstest]
    #[case(10.0, -90.0)]
    #[case(25.0, 0.0)]
    #[case(40.0, 90.0)]
    #[case(18.5, -39.0)]
    #[case(3.0, -90.0)]
    #[case(60.0, 90.0)]
    fn needle_rotation_cases(#[case] bmi: f64, #[case] expected: f64) {
        assert!((needle_rotation(bmi) - expected).abs() < EPS);
        assert_eq!(NeedleState::for_bmi(bmi).rotation_degrees, needle_rotation(bmi));
    }

    #[test]
    fn segments_cover_the_scale() {
        assert_debug_snapshot!(segments().map(|s| (s.category, s.start_angle, s.end_angle)), @r"
        [
            (
                Underweight,
                180.0,
                129.0,
            ),
            (
                Normal,
                129.0,
                90.0,
            ),
            (
                Overweight,
                90.0,
                60.0,
            ),
            (
                Obese,
                60.0,
                0.0,
            ),
        ]
        ");

        let total: f64 = segments().iter().map(GaugeSegment::span).sum();
        assert!((total - 180.0).abs() < EPS);
    }

    #[test]
    fn segments_do_not_follow_the_value() {
        assert_eq!(reading(12.0).segments, reading(38.0).segments);
        assert_eq!(reading(38.0).segments, segments());
    }

    #[test]
    fn reading_clamps_only_the_needle() {
        let r = reading(55.3);
        assert_eq!(r.bmi, 55.3);
        assert_eq!(r.clamped_bmi, MAX_BMI);
        assert_eq!(r.needle.rotation_degrees, 90.0);
    }

    #[test]
    fn polar_to_cartesian_places_angles() {
        let center = Point::new(100.0, 100.0);
        assert_point(polar_to_cartesian(center, 80.0, 90.0), 100.0, 20.0);
        assert_point(polar_to_cartesian(center, 80.0, 180.0), 180.0, 100.0);
        assert_point(polar_to_cartesian(center, 80.0, 0.0), 20.0, 100.0);
    }

    #[test]
    fn describe_arc_uses_minor_arc_up_to_half_circle() {
        let center = Point::new(100.0, 100.0);
        let arc = describe_arc(center, 80.0, 60.0, 90.0);
        assert!(!arc.large_arc);
        assert_point(arc.start, 100.0, 20.0);
        assert_point(arc.end, 60.0, 100.0 - 80.0 * 60f64.to_radians().sin());

        assert!(!describe_arc(center, 80.0, 0.0, 180.0).large_arc);
        assert!(describe_arc(center, 80.0, 0.0, 270.0).large_arc);
    }

    #[test]
    fn layout_paths_follow_segments() {
        let layout = GaugeLayout::default();
        let paths = layout.segment_paths();
        let obese = paths[3];
        assert_point(obese.start, 20.0 + 80.0 * 0.5, 100.0 - 80.0 * 60f64.to_radians().sin());
        assert_point(obese.end, 20.0, 100.0);
        assert!(paths.iter().all(|p| !p.large_arc && p.radius == 80.0));
    }

    #[test]
    fn arc_path_renders_svg_commands() {
        let arc = ArcPath {
            start: Point::new(20.0, 100.0),
            end: Point::new(180.0, 100.0),
            radius: 80.0,
            large_arc: false,
        };
        assert_eq!(arc.to_string(), "M 20 100 A 80 80 0 0 0 180 100");

        let large = ArcPath {
            large_arc: true,
            ..arc
        };
        assert_eq!(large.to_string(), "M 20 100 A 80 80 0 1 0 180 100");
    }
}
