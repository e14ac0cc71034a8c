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

//! Uniform-scale affine transformations in 3D space.

use serde::{Deserialize, Serialize};

use crate::math::{lerp, Quaternion, Vec3};

/// Rotation, then uniform scale, then translation:
/// `p' = translation + scale * (rotation * p)`.
///
/// Kept decomposed so [`AffineTransform::interpolate`] can slerp the rotation
/// on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    translation: Vec3,
    rotation: Quaternion,
    scale: f64,
}

impl AffineTransform {
    /// Leaves every point where it is.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quaternion::IDENTITY,
        scale: 1.0,
    };

    /// Rotate about the origin, then scale uniformly about it.
    ///
    /// ```
    /// use quatlab_core::math::{AffineTransform, Quaternion, Vec3, FRAC_PI_2};
    ///
    /// let quarter = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);
    /// let t = AffineTransform::from_rotation_scale(quarter, 2.0);
    /// assert!((t.transform_point(Vec3::X) - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-12);
    /// ```
    #[inline]
    pub fn from_rotation_scale(rotation: Quaternion, scale: f64) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: rotation.normalize(),
            scale,
        }
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Always unit length.
    #[inline]
    pub fn rotation(&self) -> Quaternion {
        self.rotation
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a point.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.translation + self.transform_vector(p)
    }

    /// Maps a direction: rotation and scale only.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.rotation.rotate_vec3(v) * self.scale
    }

    /// Blends two transforms part by part. Translation and scale lerp,
    /// rotation slerps, and `t` is clamped to `[0, 1]`.
    pub fn interpolate(start: &Self, end: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            translation: Vec3::lerp(start.translation, end.translation, t),
            rotation: Quaternion::slerp(start.rotation, end.rotation, t),
            scale: lerp(start.scale, end.scale, t),
        }
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::assert_relative_eq;

    fn quarter_turn(axis: Vec3) -> Quaternion {
        Quaternion::from_axis_angle(axis, FRAC_PI_2)
    }

    #[test]
    fn test_identity_leaves_points_unchanged() {
        let p = Vec3::new(1.5, -2.0, 0.25);
        assert_eq!(AffineTransform::IDENTITY.transform_point(p), p);
        assert_eq!(AffineTransform::default(), AffineTransform::IDENTITY);
    }

    #[test]
    fn test_rotation_is_applied_before_scale() {
        let t = AffineTransform::from_rotation_scale(quarter_turn(Vec3::Z), 3.0);
        assert_relative_eq!(t.transform_point(Vec3::X), Vec3::new(0.0, 3.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(t.transform_vector(Vec3::Y), Vec3::new(-3.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(t.transform_vector(Vec3::Z), Vec3::new(0.0, 0.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_translation_moves_points_not_directions() {
        let t = AffineTransform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            ..AffineTransform::IDENTITY
        };
        assert_eq!(t.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.transform_vector(Vec3::X), Vec3::X);
    }

    #[test]
    fn test_rotation_is_stored_normalized() {
        let t = AffineTransform::from_rotation_scale(quarter_turn(Vec3::X) * 4.0, 1.0);
        assert_relative_eq!(t.rotation().magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_endpoints_and_midpoint() {
        let start = AffineTransform::IDENTITY;
        let end = AffineTransform {
            translation: Vec3::new(2.0, 0.0, -4.0),
            ..AffineTransform::from_rotation_scale(quarter_turn(Vec3::Y), 3.0)
        };

        assert_eq!(AffineTransform::interpolate(&start, &end, 0.0), start);
        assert_eq!(AffineTransform::interpolate(&start, &end, -1.0), start);
        let at_end = AffineTransform::interpolate(&start, &end, 1.0);
        assert_relative_eq!(at_end.rotation(), end.rotation(), epsilon = 1e-12);
        assert_relative_eq!(at_end.translation(), end.translation());

        let mid = AffineTransform::interpolate(&start, &end, 0.5);
        assert_relative_eq!(mid.scale(), 2.0);
        assert_relative_eq!(mid.translation(), Vec3::new(1.0, 0.0, -2.0));
        assert_relative_eq!(
            mid.rotation(),
            Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2 / 2.0),
            epsilon = 1e-12
        );
    }
}
