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

//! Self-checks of a computed result, reported when an animation starts.

use std::fmt;

use quatlab_core::math::{Quaternion, Vec3};

use crate::angles::angle_between;
use crate::pseudo::{apply, PseudoResult, CANONICAL};
use crate::real::{conjugate, multiply, RealResult};
use crate::result::ConjugationResult;

/// Angles may drift this far (degrees) and still agree.
pub const ANGLE_TOLERANCE: f64 = 0.1;
/// Lengths, scales, and positions may drift this far and still agree.
pub const LINEAR_TOLERANCE: f64 = 1e-3;

/// One verified quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// What was checked.
    pub label: &'static str,
    /// The value the construction promises.
    pub expected: f64,
    /// The value actually measured.
    pub actual: f64,
    /// The allowed absolute difference.
    pub tolerance: f64,
}

impl Check {
    fn new(label: &'static str, expected: f64, actual: f64, tolerance: f64) -> Self {
        Self {
            label,
            expected,
            actual,
            tolerance,
        }
    }

    /// Whether `actual` is within `tolerance` of `expected`.
    pub fn passed(&self) -> bool {
        (self.expected - self.actual).abs() < self.tolerance
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: expected {:.3}, got {:.3}",
            if self.passed() { "ok" } else { "MISMATCH" },
            self.label,
            self.expected,
            self.actual
        )
    }
}

/// Verifies that each transform relocates the canonical direction onto its
/// target, and that it moves the carried point by the same angle and scale.
///
/// The angle checks only agree when the carried point is orthogonal to the
/// rotation axis of the transform; a mismatch there is the point of the
/// demonstration, not a bug.
pub fn verify_pseudo(result: &PseudoResult) -> Vec<Check> {
    let mut checks = Vec::with_capacity(8);

    let mapped = apply(CANONICAL, &result.first_transform);
    checks.push(Check::new(
        "first transform maps canonical onto V",
        0.0,
        mapped.distance(result.target),
        LINEAR_TOLERANCE,
    ));
    push_angle_and_scale(
        &mut checks,
        ("canonical→V angle vs Q→QV angle", "canonical→V scale vs Q→QV scale"),
        (CANONICAL, result.target),
        (result.embedding, result.intermediate),
    );

    let mapped = apply(CANONICAL, &result.second_transform);
    checks.push(Check::new(
        "second transform maps canonical onto Q⁻¹",
        0.0,
        mapped.distance(result.inverse),
        LINEAR_TOLERANCE,
    ));
    push_angle_and_scale(
        &mut checks,
        ("canonical→Q⁻¹ angle vs QV→final angle", "canonical→Q⁻¹ scale vs QV→final scale"),
        (CANONICAL, result.inverse),
        (result.intermediate, result.final_point),
    );

    checks
}

fn push_angle_and_scale(
    checks: &mut Vec<Check>,
    labels: (&'static str, &'static str),
    reference: (Vec3, Vec3),
    carried: (Vec3, Vec3),
) {
    checks.push(Check::new(
        labels.0,
        angle_between(reference.0, reference.1),
        angle_between(carried.0, carried.1),
        ANGLE_TOLERANCE,
    ));
    checks.push(Check::new(
        labels.1,
        length_ratio(reference.0, reference.1),
        length_ratio(carried.0, carried.1),
        LINEAR_TOLERANCE,
    ));
}

fn length_ratio(from: Vec3, to: Vec3) -> f64 {
    let from = from.length();
    if from <= f64::EPSILON {
        return 0.0;
    }
    to.length() / from
}

/// Verifies the algebraic identities of a Hamilton conjugation.
pub fn verify_real(result: &RealResult) -> Vec<Check> {
    let identity = multiply(result.rotation, conjugate(result.rotation));
    vec![
        Check::new("‖Q‖", 1.0, result.rotation.magnitude(), LINEAR_TOLERANCE),
        Check::new(
            "Q·conj(Q) distance to identity",
            0.0,
            (identity - Quaternion::IDENTITY).magnitude(),
            LINEAR_TOLERANCE,
        ),
        Check::new(
            "real part of Q·V·Q⁻¹",
            0.0,
            result.result.w,
            LINEAR_TOLERANCE,
        ),
        Check::new(
            "‖Q·V·Q⁻¹‖ vs ‖V‖",
            result.target.magnitude(),
            result.result.magnitude(),
            LINEAR_TOLERANCE,
        ),
    ]
}

/// Runs the checks matching the algebra that produced `result`.
pub fn verify(result: &ConjugationResult) -> Vec<Check> {
    match result {
        ConjugationResult::Pseudo(r) => verify_pseudo(r),
        ConjugationResult::Real(r) => verify_real(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::AlgebraMode;
    use quatlab_core::math::Vec2;
    use quatlab_core::Parameters;

    #[test]
    fn test_default_pseudo_result_passes_every_check() {
        let checks = verify(&AlgebraMode::Pseudo.compute(&Parameters::default()));
        assert_eq!(checks.len(), 6);
        for check in &checks {
            assert!(check.passed(), "{check}");
        }
    }

    #[test]
    fn test_transforms_always_hit_their_targets() {
        let params = Parameters::new(70.0, Vec2::new(1.0, 2.0), Vec2::new(-1.5, 0.5));
        let result = match AlgebraMode::Pseudo.compute(&params) {
            ConjugationResult::Pseudo(r) => r,
            ConjugationResult::Real(_) => unreachable!(),
        };
        let checks = verify_pseudo(&result);
        assert!(checks[0].passed(), "{}", checks[0]);
        assert!(checks[3].passed(), "{}", checks[3]);
        // Rotations preserve length, so the scale checks always agree.
        assert!(checks[2].passed(), "{}", checks[2]);
        assert!(checks[5].passed(), "{}", checks[5]);
    }

    #[test]
    fn test_real_result_passes_every_check() {
        let params = Parameters::new(123.0, Vec2::new(0.4, -0.9), Vec2::new(1.0, 3.0));
        for check in verify(&AlgebraMode::Real.compute(&params)) {
            assert!(check.passed(), "{check}");
        }
    }

    #[test]
    fn test_display_marks_mismatches() {
        let check = Check::new("demo", 1.0, 2.0, 0.1);
        assert!(!check.passed());
        assert_eq!(check.to_string(), "[MISMATCH] demo: expected 1.000, got 2.000");
    }
}
