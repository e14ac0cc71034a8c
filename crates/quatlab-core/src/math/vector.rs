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

//! Plane and space vectors used by both conjugation engines.

use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use super::EPSILON;

/// A point or direction in the xy plane.
///
/// The user-facing inputs (rotation axis, target `V`) are `Vec2`s.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// `(1, 0)`, the stock rotation axis.
    pub const X: Self = Self::new(1.0, 0.0);
    /// `(0, 1)`.
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Builds a vector from components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Inner product.
    #[inline]
    pub fn dot(&self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Squared norm.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// Euclidean norm.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// `true` only for a vector with no direction at all. Any nonzero
    /// length, however small, still normalizes.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.length_squared() == 0.0
    }

    /// Unit vector in the same direction, or `ZERO` for a zero input.
    #[inline]
    pub fn normalize(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        *self * self.length().recip()
    }

    /// Places the vector in space at height `z`.
    #[inline]
    pub fn extend(&self, z: f64) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AbsDiffEq for Vec2 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl RelativeEq for Vec2 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

/// A point or direction in space.
///
/// Embeddings, intermediate and final points, and drawable positions are all
/// expressed as `Vec3`. The xy plane is the drawing plane and `z` points at
/// the viewer.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
    /// Height above the drawing plane.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit x.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit y.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// The canonical direction every embedding starts from.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Builds a vector from components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Inner product.
    #[inline]
    pub fn dot(&self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Right-handed cross product: `X × Y = Z`.
    #[inline]
    pub fn cross(&self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Squared norm.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// Euclidean norm.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// See [`Vec2::is_zero`].
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.length_squared() == 0.0
    }

    /// Unit vector in the same direction, or `ZERO` for a zero input.
    #[inline]
    pub fn normalize(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        *self / self.length()
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance(&self, to: Self) -> f64 {
        (*self - to).length()
    }

    /// Drops the point straight down onto the drawing plane.
    #[inline]
    pub fn flatten(&self) -> Self {
        Self { z: 0.0, ..*self }
    }

    /// Straight-line blend from `start` to `end`; `t` is clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        start + (end - start) * t
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, k: f64) -> Self {
        Self::new(self.x / k, self.y / k, self.z / k)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        [self.x - other.x, self.y - other.y, self.z - other.z]
            .iter()
            .all(|d| d.abs() <= epsilon)
    }
}

impl RelativeEq for Vec3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_three_four_five() {
        let v = Vec2::new(3.0, 4.0);
        assert_relative_eq!(v.length(), 5.0);
        let n = v.normalize();
        assert_relative_eq!(n.x, 0.6);
        assert_relative_eq!(n.y, 0.8);
    }

    #[test]
    fn test_only_the_zero_vector_has_no_direction() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert!(Vec2::ZERO.is_zero());
        assert!(!Vec2::new(1e-12, 0.0).is_zero());
        assert_relative_eq!(Vec2::new(1e-12, 0.0).normalize(), Vec2::X);
        assert_relative_eq!(Vec3::new(0.0, -3e-11, 0.0).normalize(), -Vec3::Y);
        assert_relative_eq!(Vec3::new(0.0, 0.0, 7.0).normalize(), Vec3::Z);
    }

    #[test]
    fn test_plane_and_space_conversions() {
        assert_eq!(Vec2::new(2.0, 1.0).extend(0.0), Vec3::new(2.0, 1.0, 0.0));
        let p = Vec3::new(1.5, -2.0, 0.75);
        assert_eq!(p.flatten(), Vec3::new(1.5, -2.0, 0.0));
    }

    #[test]
    fn test_cross_is_right_handed() {
        assert_relative_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_relative_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_relative_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
        assert_relative_eq!(Vec3::Y.cross(Vec3::X), -Vec3::Z);
    }

    #[test]
    fn test_dot_and_length() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, -5.0, 6.0);
        assert_relative_eq!(a.dot(b), 12.0);
        assert_relative_eq!(a.length_squared(), 14.0);
        assert_relative_eq!(a.distance(a + Vec3::new(0.0, 3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_lerp_is_clamped() {
        let b = Vec3::new(2.0, 4.0, -2.0);
        assert_relative_eq!(Vec3::lerp(Vec3::ZERO, b, 0.5), Vec3::new(1.0, 2.0, -1.0));
        assert_relative_eq!(Vec3::lerp(Vec3::ZERO, b, -1.0), Vec3::ZERO);
        assert_relative_eq!(Vec3::lerp(Vec3::ZERO, b, 3.0), b);
    }
}

