// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pairwise angles between result points, and their textual readout.

use std::fmt;

use quatlab_core::math::{radians_to_degrees, Vec3};
use serde::Serialize;

use crate::result::ConjugationView;

/// The placeholder shown instead of a number when no result is displayed.
pub const PLACEHOLDER: &str = "-";

/// The angle between two vectors, in degrees.
///
/// The cosine is clamped to `[-1, 1]` before `acos`, so rounding noise on
/// (anti)parallel inputs never produces NaN. A zero vector is treated as
/// orthogonal to everything.
///
/// ```
/// use quatlab_core::math::Vec3;
/// use quatlab_engine::angles::angle_between;
///
/// assert_eq!(angle_between(Vec3::X, Vec3::X), 0.0);
/// assert_eq!(angle_between(Vec3::X, -Vec3::X), 180.0);
/// ```
pub fn angle_between(a: Vec3, b: Vec3) -> f64 {
    let cos = a.normalize().dot(b.normalize()).clamp(-1.0, 1.0);
    radians_to_degrees(cos.acos())
}

/// The three pairwise angles of a result bundle, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleReport {
    /// Initial point to intermediate.
    pub initial_to_intermediate: f64,
    /// Initial point to final result.
    pub initial_to_final: f64,
    /// Intermediate to final result.
    pub intermediate_to_final: f64,
}

impl AngleReport {
    /// Measures the three angles of `view`.
    pub fn from_view(view: &impl ConjugationView) -> Self {
        let (initial, intermediate, final_point) =
            (view.initial(), view.intermediate(), view.final_point());
        Self {
            initial_to_intermediate: angle_between(initial, intermediate),
            initial_to_final: angle_between(initial, final_point),
            intermediate_to_final: angle_between(intermediate, final_point),
        }
    }
}

/// The formatted angle readout, two decimals and a degree sign per angle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AngleReadout {
    /// Formatted initial-to-intermediate angle.
    pub initial_to_intermediate: String,
    /// Formatted initial-to-final angle.
    pub initial_to_final: String,
    /// Formatted intermediate-to-final angle.
    pub intermediate_to_final: String,
}

impl AngleReadout {
    /// The readout when no result is shown.
    pub fn placeholder() -> Self {
        Self {
            initial_to_intermediate: PLACEHOLDER.to_owned(),
            initial_to_final: PLACEHOLDER.to_owned(),
            intermediate_to_final: PLACEHOLDER.to_owned(),
        }
    }

    /// Formats `report`, or the placeholder when it is `None`.
    pub fn new(report: Option<&AngleReport>) -> Self {
        match report {
            Some(report) => Self {
                initial_to_intermediate: format_degrees(report.initial_to_intermediate),
                initial_to_final: format_degrees(report.initial_to_final),
                intermediate_to_final: format_degrees(report.intermediate_to_final),
            },
            None => Self::placeholder(),
        }
    }
}

impl Default for AngleReadout {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl fmt::Display for AngleReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "initial→intermediate: {}  initial→final: {}  intermediate→final: {}",
            self.initial_to_intermediate, self.initial_to_final, self.intermediate_to_final
        )
    }
}

fn format_degrees(degrees: f64) -> String {
    format!("{degrees:.2}°")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::AlgebraMode;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use quatlab_core::math::Vec2;
    use quatlab_core::Parameters;

    #[test]
    fn test_identical_and_opposite_vectors() {
        let a = Vec3::new(0.3, -1.2, 2.0);
        assert_relative_eq!(angle_between(a, a), 0.0, epsilon = 1e-5);
        assert_relative_eq!(angle_between(a, -a), 180.0, epsilon = 1e-5);
        assert_relative_eq!(angle_between(Vec3::X, Vec3::Y), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_vector_is_orthogonal() {
        assert_relative_eq!(angle_between(Vec3::ZERO, Vec3::X), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_report_for_default_pseudo_result() {
        let result = AlgebraMode::Pseudo.compute(&Parameters::default());
        let report = AngleReport::from_view(&result);
        // (0,0,1) → (2,1,0) → (2,1,0)
        assert_relative_eq!(report.initial_to_intermediate, 90.0, epsilon = 1e-9);
        assert_relative_eq!(report.initial_to_final, 90.0, epsilon = 1e-9);
        assert_relative_eq!(report.intermediate_to_final, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_readout_formats_two_decimals() {
        let report = AngleReport {
            initial_to_intermediate: 90.0,
            initial_to_final: 12.3456,
            intermediate_to_final: 0.0,
        };
        let readout = AngleReadout::new(Some(&report));
        assert_eq!(readout.initial_to_intermediate, "90.00°");
        assert_eq!(readout.initial_to_final, "12.35°");
        assert_eq!(readout.intermediate_to_final, "0.00°");
    }

    #[test]
    fn test_readout_placeholder_when_hidden() {
        let readout = AngleReadout::new(None);
        assert_eq!(readout, AngleReadout::placeholder());
        assert_eq!(readout.initial_to_final, "-");
    }

    #[test]
    fn test_real_mode_angles_are_finite() {
        let params = Parameters::new(135.0, Vec2::new(1.0, 1.0), Vec2::new(-1.0, 0.5));
        let report = AngleReport::from_view(&AlgebraMode::Real.compute(&params));
        assert!(report.initial_to_intermediate.is_finite());
        assert!(report.initial_to_final.is_finite());
        assert!(report.intermediate_to_final.is_finite());
    }

    proptest! {
        #[test]
        fn test_angle_is_always_in_range(
            a in prop::array::uniform3(-10.0f64..10.0),
            b in prop::array::uniform3(-10.0f64..10.0),
        ) {
            let angle = angle_between(Vec3::new(a[0], a[1], a[2]), Vec3::new(b[0], b[1], b[2]));
            prop_assert!((0.0..=180.0).contains(&angle));
        }
    }
}
