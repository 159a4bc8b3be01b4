//! Closed-form lens overlap of two equal circles.
//!
//! Two fan patterns of radius `r` sit with their centers `d` apart (the path
//! index). Their intersection is a symmetric lens whose area, share of a full
//! circle and width along the center line are computed here. Nothing in this
//! module draws or reads input; see [`crate::scene`] for the drawable side.

use std::f64::consts::{FRAC_PI_2, PI};
use thiserror::Error;

/// Validation failures for a calculation request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlapError {
    #[error("Invalid fan pattern radius {radius}: the radius must be greater than zero.")]
    InvalidRadius { radius: f64 },

    #[error("Fan pattern radius {radius} is too large: its area does not fit in a float.")]
    RadiusTooLarge { radius: f64 },

    #[error("Invalid path index {index}: the index must be zero or positive.")]
    InvalidIndex { index: f64 },

    #[error(
        "No overlap present in current state! Please reduce path index distance or increase fan pattern radius."
    )]
    NoOverlap { index: f64, radius: f64 },
}

/// Center distance and shared radius of the two fan patterns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternInput {
    pub index: f64,
    pub radius: f64,
}

impl PatternInput {
    /// Validate and build an input. Rejects a non-positive radius, a negative
    /// index and circles that do not touch.
    pub fn new(index: f64, radius: f64) -> Result<Self, OverlapError> {
        validate(index, radius)?;
        Ok(Self { index, radius })
    }

    pub fn compute(&self) -> Result<OverlapResult, OverlapError> {
        compute_overlap(self.index, self.radius)
    }

    /// Offset of each pattern center from the origin along the x axis.
    pub fn half_index(&self) -> f64 {
        self.index / 2.0
    }
}

/// Measurements of the intersection lens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapResult {
    /// Area of the lens in square units.
    pub lens_area: f64,
    /// Lens area as a percentage of one circle.
    pub overlap_percentage: f64,
    /// Width of the lens along the line joining the centers.
    pub lens_diameter: f64,
    /// Area of one full fan pattern.
    pub circle_area: f64,
}

fn validate(index: f64, radius: f64) -> Result<(), OverlapError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(OverlapError::InvalidRadius { radius });
    }
    if !(PI * (radius * radius)).is_finite() {
        return Err(OverlapError::RadiusTooLarge { radius });
    }
    if !index.is_finite() || index < 0.0 {
        return Err(OverlapError::InvalidIndex { index });
    }
    if index > 2.0 * radius {
        return Err(OverlapError::NoOverlap { index, radius });
    }
    Ok(())
}

/// Compute the lens overlap for two circles of `radius` whose centers are
/// `index` apart.
pub fn compute_overlap(index: f64, radius: f64) -> Result<OverlapResult, OverlapError> {
    validate(index, radius)?;

    let r = radius;
    let circle_area = PI * (r * r);

    // Work with the lens as a share of the circle so tiny radii cannot
    // underflow into 0/0. t is in [0, 1] after validation.
    let t = index / (2.0 * r);
    let share = (t.acos() - t * (1.0 - t * t).max(0.0).sqrt()) / FRAC_PI_2;

    let lens_area = share * circle_area;
    let overlap_percentage = share * 100.0;
    let lens_diameter = 2.0 * r - index;

    Ok(OverlapResult {
        lens_area,
        overlap_percentage,
        lens_diameter,
        circle_area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn coincident_centers_overlap_fully() {
        for radius in [0.5, 1.0, 3.0, 5.0, 12.75] {
            let result = compute_overlap(0.0, radius).unwrap();
            assert_eq!(result.lens_area, result.circle_area);
            assert_eq!(result.overlap_percentage, 100.0);
            assert_eq!(result.lens_diameter, 2.0 * radius);
        }
    }

    #[test]
    fn full_overlap_is_exact_across_radii() {
        for k in 1..=10_000 {
            let radius = k as f64 * 0.0137;
            let result = compute_overlap(0.0, radius).unwrap();
            assert_eq!(result.overlap_percentage, 100.0, "radius {radius}");
            assert_eq!(result.lens_area, result.circle_area, "radius {radius}");
        }
    }

    #[test]
    fn extreme_radii_stay_finite() {
        let tiny = compute_overlap(0.0, 1e-200).unwrap();
        assert_eq!(tiny.overlap_percentage, 100.0);
        assert_eq!(tiny.lens_area, 0.0);

        let tiny_tangent = compute_overlap(2e-200, 1e-200).unwrap();
        assert_eq!(tiny_tangent.overlap_percentage, 0.0);

        let large = compute_overlap(1e150, 1e150).unwrap();
        assert!(large.lens_area.is_finite());
        assert!((large.overlap_percentage - 39.1).abs() < 0.05);

        assert!(matches!(
            compute_overlap(0.0, 1e160),
            Err(OverlapError::RadiusTooLarge { .. })
        ));
        assert!(matches!(
            compute_overlap(0.0, f64::MAX),
            Err(OverlapError::RadiusTooLarge { .. })
        ));
    }

    #[test]
    fn tangent_circles_have_empty_lens() {
        for radius in [0.5, 1.0, 3.0, 5.0, 12.75] {
            let result = compute_overlap(2.0 * radius, radius).unwrap();
            assert!(result.lens_area.abs() < EPS);
            assert!(result.overlap_percentage.abs() < EPS);
            assert_eq!(result.lens_diameter, 0.0);
        }
    }

    #[test]
    fn separated_circles_fail() {
        assert!(matches!(
            compute_overlap(10.0, 3.0),
            Err(OverlapError::NoOverlap { .. })
        ));
        assert!(matches!(
            compute_overlap(2.0 + 1e-9, 1.0),
            Err(OverlapError::NoOverlap { .. })
        ));
    }

    #[test]
    fn no_overlap_message_tells_user_what_to_change() {
        let err = compute_overlap(10.0, 3.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("No overlap present in current state!"));
        assert!(msg.contains("reduce path index distance"));
        assert!(msg.contains("increase fan pattern radius"));
    }

    #[test]
    fn non_positive_radius_is_rejected_first() {
        for radius in [0.0, -1.0, -0.0, f64::NAN] {
            assert!(matches!(
                compute_overlap(5.0, radius),
                Err(OverlapError::InvalidRadius { .. })
            ));
            assert!(matches!(
                compute_overlap(0.0, radius),
                Err(OverlapError::InvalidRadius { .. })
            ));
        }
    }

    #[test]
    fn negative_index_is_rejected() {
        assert!(matches!(
            compute_overlap(-1.0, 5.0),
            Err(OverlapError::InvalidIndex { .. })
        ));
        assert!(matches!(
            compute_overlap(f64::INFINITY, 5.0),
            Err(OverlapError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn overlap_decreases_with_index() {
        let radius = 4.0;
        let mut previous = f64::INFINITY;
        for step in 0..=80 {
            let index = 2.0 * radius * step as f64 / 80.0;
            let pct = compute_overlap(index, radius).unwrap().overlap_percentage;
            assert!(pct < previous, "index {index}: {pct} >= {previous}");
            previous = pct;
        }
    }

    #[test]
    fn radius_five_full_overlap() {
        let result = compute_overlap(0.0, 5.0).unwrap();
        assert!((result.lens_area - 78.54).abs() < 0.01);
        assert!((result.overlap_percentage - 100.0).abs() < 0.01);
        assert_eq!(result.lens_diameter, 10.0);
    }

    #[test]
    fn radius_five_index_five() {
        let result = compute_overlap(5.0, 5.0).unwrap();
        assert_eq!(result.lens_diameter, 5.0);
        assert!(result.overlap_percentage > 0.0 && result.overlap_percentage < 100.0);
        assert!((result.overlap_percentage - 39.1).abs() < 0.05);
        assert!((result.lens_area - 30.71).abs() < 0.02);
    }

    #[test]
    fn input_wrapper_validates_and_computes() {
        let input = PatternInput::new(5.0, 5.0).unwrap();
        assert_eq!(input.half_index(), 2.5);
        assert_eq!(input.compute().unwrap(), compute_overlap(5.0, 5.0).unwrap());
        assert!(PatternInput::new(7.0, 3.0).is_err());
        assert!(PatternInput::new(1.0, 0.0).is_err());
    }
}
