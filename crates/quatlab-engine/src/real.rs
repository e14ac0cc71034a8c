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

//! Genuine Hamilton-quaternion conjugation.
//!
//! The rotation axis and the target both live in the xy plane, so every
//! quaternion involved has a zero or near-zero `k` component. Results are
//! displayed through [`visual_projection`], which keeps `(i, j, real)`.

use quatlab_core::math::{Quaternion, Vec2, Vec3};
use quatlab_core::Parameters;
use serde::Serialize;

/// The rotation quaternion `(cos θ/2, sin θ/2·n̂ₓ, sin θ/2·n̂_y, 0)`.
///
/// A zero axis yields the identity.
pub fn rotation_quaternion(angle_radians: f64, axis: Vec2) -> Quaternion {
    if axis.is_zero() {
        log::debug!("Zero rotation axis, rotation quaternion falls back to identity.");
        return Quaternion::IDENTITY;
    }
    Quaternion::from_axis_angle(axis.extend(0.0), angle_radians)
}

/// Lifts a point of the xy plane to the pure quaternion `(0, x, y, 0)`.
#[inline]
pub fn pure_quaternion(point: Vec2) -> Quaternion {
    Quaternion::pure(point.extend(0.0))
}

/// The Hamilton product `a·b`.
#[inline]
pub fn multiply(a: Quaternion, b: Quaternion) -> Quaternion {
    a * b
}

/// The conjugate `(w, −x, −y, −z)`.
#[inline]
pub fn conjugate(q: Quaternion) -> Quaternion {
    q.conjugate()
}

/// Maps a quaternion to a displayable point `(x, y, w)`.
#[inline]
pub fn visual_projection(q: Quaternion) -> Vec3 {
    Vec3::new(q.x, q.y, q.w)
}

/// Every quaternion of the conjugation `Q·V·Q⁻¹`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RealResult {
    /// The rotation quaternion Q.
    pub rotation: Quaternion,
    /// The pure quaternion V.
    pub target: Quaternion,
    /// Q⁻¹.
    pub inverse: Quaternion,
    /// The partial product `Q·V`.
    pub partial: Quaternion,
    /// The full conjugation `Q·V·Q⁻¹`.
    pub result: Quaternion,
}

impl RealResult {
    /// Projection of V.
    pub fn target_projection(&self) -> Vec3 {
        visual_projection(self.target)
    }

    /// Projection of Q.
    pub fn rotation_projection(&self) -> Vec3 {
        visual_projection(self.rotation)
    }

    /// Projection of Q⁻¹.
    pub fn inverse_projection(&self) -> Vec3 {
        visual_projection(self.inverse)
    }

    /// Projection of `Q·V`.
    pub fn partial_projection(&self) -> Vec3 {
        visual_projection(self.partial)
    }

    /// Projection of `Q·V·Q⁻¹`.
    pub fn result_projection(&self) -> Vec3 {
        visual_projection(self.result)
    }
}

/// Runs the full Hamilton conjugation for `params`.
pub fn composed_result(params: &Parameters) -> RealResult {
    let rotation = rotation_quaternion(params.angle_radians(), params.axis);
    let target = pure_quaternion(params.target);
    let inverse = conjugate(rotation);
    let partial = multiply(rotation, target);
    let result = multiply(partial, inverse);

    RealResult {
        rotation,
        target,
        inverse,
        partial,
        result,
    }
}
