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

//! Math primitives shared by both conjugation models.
//!
//! Geometry is `f64` throughout: identities such as `Q * conj(Q) == 1` are
//! checked to `1e-9`, beyond what `f32` can hold. Colors stay `f32`.
//! Angles are radians unless a name says degrees.

pub mod affine_transform;
pub mod color;
pub mod quaternion;
pub mod vector;

pub use self::affine_transform::AffineTransform;
pub use self::color::LinearRgba;
pub use self::quaternion::Quaternion;
pub use self::vector::{Vec2, Vec3};

pub use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

/// Tolerance for float comparisons and for deciding that a vector has no
/// direction.
pub const EPSILON: f64 = 1e-9;

/// ```
/// use quatlab_core::math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// ```
/// use quatlab_core::math::{radians_to_degrees, PI};
/// assert_eq!(radians_to_degrees(PI), 180.0);
/// ```
#[inline]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Clamps to `[0, 1]`, sending NaN to `0`.
///
/// ```
/// use quatlab_core::math::saturate;
/// assert_eq!(saturate(1.5), 1.0);
/// assert_eq!(saturate(-0.5), 0.0);
/// assert_eq!(saturate(f64::NAN), 0.0);
/// ```
#[inline]
pub fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Unclamped scalar interpolation.
#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}
