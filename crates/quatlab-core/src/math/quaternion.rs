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

//! Hamilton quaternions in `f64`.

use std::ops::{Add, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use super::{Vec3, EPSILON, PI};

/// The quaternion `w + xi + yj + zk`, stored as `(x, y, z, w)`.
///
/// A unit quaternion encodes a rotation; a pure one (`w = 0`) encodes a point.
/// Written out elsewhere the scalar usually comes first, `(w, x, y, z)`, which
/// is what [`Quaternion::from_scalar_vector`] takes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// `i` coefficient.
    pub x: f64,
    /// `j` coefficient.
    pub y: f64,
    /// `k` coefficient.
    pub z: f64,
    /// Scalar part.
    pub w: f64,
}

impl Quaternion {
    /// `1`, the rotation that does nothing.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// `0`. Has no inverse.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Raw components, in storage order. No normalization happens here.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// `(w, v)` in scalar-first notation.
    #[inline]
    pub const fn from_scalar_vector(w: f64, v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// The pure quaternion `(0, p)`.
    #[inline]
    pub const fn pure(p: Vec3) -> Self {
        Self::from_scalar_vector(0.0, p)
    }

    /// `(cos θ/2, sin θ/2 · â)`. A degenerate axis gives the identity.
    pub fn from_axis_angle(axis: Vec3, angle_radians: f64) -> Self {
        if axis.is_zero() {
            return Self::IDENTITY;
        }
        let (sin, cos) = (angle_radians / 2.0).sin_cos();
        Self::from_scalar_vector(cos, axis.normalize() * sin)
    }

    /// Shortest rotation carrying the direction of `from` onto that of `to`.
    ///
    /// Returns the identity if either input is degenerate. For opposite
    /// directions the result is a half turn about some axis orthogonal to
    /// `from`.
    pub fn from_rotation_arc(from: Vec3, to: Vec3) -> Self {
        if from.is_zero() || to.is_zero() {
            return Self::IDENTITY;
        }
        let (from, to) = (from.normalize(), to.normalize());
        let cos = from.dot(to);

        if cos < EPSILON - 1.0 {
            let pivot = if from.x.abs() > from.z.abs() {
                Vec3::new(-from.y, from.x, 0.0)
            } else {
                Vec3::new(0.0, -from.z, from.y)
            };
            return Self::from_axis_angle(pivot, PI);
        }

        // (1 + cos, from × to) is the half-angle rotation scaled by 2cos(θ/2).
        Self::from_scalar_vector(1.0 + cos, from.cross(to)).normalize()
    }

    /// The `(x, y, z)` part.
    #[inline]
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Four-component inner product.
    #[inline]
    pub fn dot(&self, rhs: Self) -> f64 {
        self.vector().dot(rhs.vector()) + self.w * rhs.w
    }

    /// Squared norm `‖q‖²`.
    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// Norm `‖q‖`.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// `q / ‖q‖`, or the identity when `q` is too close to zero.
    pub fn normalize(&self) -> Self {
        let norm_sq = self.magnitude_squared();
        if norm_sq <= EPSILON {
            return Self::IDENTITY;
        }
        *self * norm_sq.sqrt().recip()
    }

    /// `q*`: the vector part negated.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::from_scalar_vector(self.w, -self.vector())
    }

    /// `q* / ‖q‖²`. Equal to [`conjugate`](Self::conjugate) for unit
    /// quaternions. Near zero, falls back to the identity.
    pub fn inverse(&self) -> Self {
        let norm_sq = self.magnitude_squared();
        if norm_sq <= EPSILON {
            return Self::IDENTITY;
        }
        self.conjugate() * norm_sq.recip()
    }

    /// Rotates `v`, assuming `self` is unit length.
    ///
    /// Expands `q (0, v) q*` without building the intermediate products.
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let u = self.vector();
        let w = self.w;
        u * (2.0 * u.dot(v)) + v * (w * w - u.dot(u)) + u.cross(v) * (2.0 * w)
    }

    /// Constant-speed interpolation along the shorter great arc.
    ///
    /// `t` is clamped to `[0, 1]`. Nearly equal inputs fall back to a
    /// normalized linear blend.
    pub fn slerp(start: Self, end: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let (end, cos) = match start.dot(end) {
            d if d < 0.0 => (-end, -d),
            d => (end, d),
        };

        if cos > 1.0 - EPSILON {
            return (start * (1.0 - t) + end * t).normalize();
        }

        let angle = cos.acos();
        let sin = angle.sin();
        start * (((1.0 - t) * angle).sin() / sin) + end * ((t * angle).sin() / sin)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Hamilton product. `a * b != b * a` in general.
impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self.vector(), rhs.vector());
        let w = self.w * rhs.w - a.dot(b);
        let v = b * self.w + a * rhs.w + a.cross(b);
        Self::from_scalar_vector(w, v)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;
    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k, self.w * k)
    }
}

impl Add for Quaternion {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Quaternion {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self {
        self * -1.0
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.vector().abs_diff_eq(&other.vector(), epsilon)
            && (self.w - other.w).abs() <= epsilon
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.vector()
            .relative_eq(&other.vector(), epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}
