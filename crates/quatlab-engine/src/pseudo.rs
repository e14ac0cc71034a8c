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

//! The pseudo-quaternion model.
//!
//! An (angle, axis) pair is embedded as a point on the unit sphere,
//! `cos θ · ẑ + sin θ · n̂`, and "multiplication" is replaced by affine
//! transforms that carry the canonical direction `ẑ` onto another element.
//! `Q·V` becomes "move ẑ onto V and see where Q lands", and `(Q·V)·Q⁻¹`
//! repeats the construction with ẑ moved onto the pseudo-inverse.
//!
//! The pseudo-inverse `cos θ · ẑ − sin θ · n̂` is kept as defined even though
//! it is not the inverse of the composed transforms; the visualization exists
//! to show where this model diverges from real quaternion algebra.

use quatlab_core::math::{AffineTransform, Quaternion, Vec2, Vec3, FRAC_PI_2};
use quatlab_core::Parameters;
use serde::Serialize;

/// The canonical direction, playing the role of the identity element.
pub const CANONICAL: Vec3 = Vec3::Z;

/// Embeds `(angle, axis)` as `(sin θ·n̂ₓ, sin θ·n̂_y, cos θ)`.
///
/// A zero axis yields the neutral point `(0, 0, 1)`.
pub fn embed(angle_radians: f64, axis: Vec2) -> Vec3 {
    embed_signed(angle_radians, axis, 1.0)
}

/// The pseudo-conjugate `(−sin θ·n̂ₓ, −sin θ·n̂_y, cos θ)`.
///
/// A zero axis yields the neutral point `(0, 0, 1)`.
pub fn embed_inverse(angle_radians: f64, axis: Vec2) -> Vec3 {
    embed_signed(angle_radians, axis, -1.0)
}

fn embed_signed(angle_radians: f64, axis: Vec2, sign: f64) -> Vec3 {
    if axis.is_zero() {
        log::debug!("Zero rotation axis, embedding falls back to the canonical direction.");
        return CANONICAL;
    }
    let n = axis.normalize();
    let (sin, cos) = angle_radians.sin_cos();
    Vec3::new(sign * sin * n.x, sign * sin * n.y, cos)
}

/// Builds the transform carrying the canonical direction onto an xy-plane target.
///
/// The rotation is exactly 90° about `ẑ × t̂` followed by a uniform scale of
/// `‖target‖`, so `(0, 0, 1)` lands on `(target.x, target.y, 0)`. A zero
/// target yields the identity.
pub fn transform_to_target_2d(target: Vec2) -> AffineTransform {
    if target.is_zero() {
        log::debug!("Zero target, first transform collapses to identity.");
        return AffineTransform::IDENTITY;
    }
    let direction = target.normalize().extend(0.0);
    let rotation = Quaternion::from_axis_angle(CANONICAL.cross(direction), FRAC_PI_2);
    AffineTransform::from_rotation_scale(rotation, target.length())
}

/// Builds the transform carrying the canonical direction onto any 3D target,
/// using the minimal-angle rotation followed by a uniform scale of `‖target‖`.
///
/// A zero target yields the identity.
pub fn transform_to_target_3d(target: Vec3) -> AffineTransform {
    if target.is_zero() {
        log::debug!("Zero target, second transform collapses to identity.");
        return AffineTransform::IDENTITY;
    }
    let rotation = Quaternion::from_rotation_arc(CANONICAL, target.normalize());
    AffineTransform::from_rotation_scale(rotation, target.length())
}

/// Applies `transform` to `point`.
#[inline]
pub fn apply(point: Vec3, transform: &AffineTransform) -> Vec3 {
    transform.transform_point(point)
}

/// Everything the pseudo model derives from one parameter record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PseudoResult {
    /// The embedding point Q.
    pub embedding: Vec3,
    /// The pseudo-inverse Q⁻¹.
    pub inverse: Vec3,
    /// The target V lifted into the xy plane.
    pub target: Vec3,
    /// `Q·V`: the embedding carried by the first transform.
    pub intermediate: Vec3,
    /// `Q·V·Q⁻¹`: the intermediate carried by the second transform.
    pub final_point: Vec3,
    /// Canonical direction onto V.
    pub first_transform: AffineTransform,
    /// Canonical direction onto the pseudo-inverse.
    pub second_transform: AffineTransform,
}

/// Runs the full pseudo-quaternion pipeline for `params`.
pub fn composed_result(params: &Parameters) -> PseudoResult {
    let angle = params.angle_radians();
    let embedding = embed(angle, params.axis);
    let inverse = embed_inverse(angle, params.axis);

    let first_transform = transform_to_target_2d(params.target);
    let intermediate = apply(embedding, &first_transform);

    let second_transform = transform_to_target_3d(inverse);
    let final_point = apply(intermediate, &second_transform);

    PseudoResult {
        embedding,
        inverse,
        target: params.target.extend(0.0),
        intermediate,
        final_point,
        first_transform,
        second_transform,
    }
}
