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

//! Renderer-agnostic description of what is on screen.
//!
//! The visualization never talks to a renderer. It publishes [`Drawable`]s
//! keyed by logical [`Role`] into a [`DrawableSink`], and whatever sits behind
//! the sink decides how to draw them.

use serde::{Deserialize, Serialize};

use crate::math::{AffineTransform, LinearRgba, Quaternion, Vec3};

/// The logical slot a drawable occupies in the scene.
///
/// Static roles are rebuilt by every recompute pass. Animated roles belong to
/// the animation sequencer while a run is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    // --- Static ---
    /// The canonical direction `(0, 0, 1)`.
    CanonicalAxis,
    /// The line through `±3·n̂` along the rotation axis.
    RotationAxis,
    /// The target point V.
    Target,
    /// The rotation element (embedding point or projection of Q).
    RotationElement,
    /// The inverse element (pseudo-inverse or projection of Q⁻¹).
    InverseElement,
    /// The intermediate result flattened onto the xy plane.
    IntermediateProjection,
    /// The final result.
    FinalResult,

    // --- Animated ---
    /// Coordinate frame driven by the first transform.
    FirstFrame,
    /// Coordinate frame driven by the second transform.
    SecondFrame,
    /// The point travelling from the initial point to the intermediate.
    MovingIntermediate,
    /// The point travelling from the intermediate to the final result.
    MovingFinal,
    /// The canonical axis stretching onto the reference element.
    MovingCanonicalAxis,
    /// Highlight of the inverse element during a run.
    InverseMarker,
    /// The moving intermediate's projection onto the xy plane.
    MovingProjection,
}

impl Role {
    /// Every role rebuilt by a recompute pass.
    pub const STATIC: [Role; 7] = [
        Role::CanonicalAxis,
        Role::RotationAxis,
        Role::Target,
        Role::RotationElement,
        Role::InverseElement,
        Role::IntermediateProjection,
        Role::FinalResult,
    ];

    /// Every role owned by the animation sequencer.
    pub const ANIMATED: [Role; 7] = [
        Role::FirstFrame,
        Role::SecondFrame,
        Role::MovingIntermediate,
        Role::MovingFinal,
        Role::MovingCanonicalAxis,
        Role::InverseMarker,
        Role::MovingProjection,
    ];
}

/// The geometric primitive a drawable renders as.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// A point marker at the drawable's position, with a stem back to the origin.
    Vector {
        /// Marker radius.
        radius: f64,
    },
    /// An arrow from the origin along the drawable's oriented +Z axis.
    Arrow {
        /// Arrow length before scaling.
        length: f64,
    },
    /// An infinite-looking line through the origin along the oriented +Z axis.
    AxisLine {
        /// Half of the drawn line length.
        half_length: f64,
    },
    /// Three axes (x, y, z) showing an affine transform.
    CoordinateFrame {
        /// Length of each axis before scaling.
        axis_length: f64,
        /// Opacity of the axes.
        opacity: f32,
    },
    /// A smaller marker for points flattened onto the xy plane.
    Projection {
        /// Marker radius.
        radius: f64,
    },
}

/// An opaque renderable: a shape plus its placement and appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    /// The primitive to draw.
    pub shape: Shape,
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub orientation: Quaternion,
    /// Uniform scale.
    pub scale: f64,
    /// Linear color.
    pub color: LinearRgba,
    /// Whether the drawable is currently shown.
    pub visible: bool,
}

impl Drawable {
    /// Creates a visible drawable at the origin with identity orientation and unit scale.
    pub fn new(shape: Shape, color: LinearRgba) -> Self {
        Self {
            shape,
            position: Vec3::ZERO,
            orientation: Quaternion::IDENTITY,
            scale: 1.0,
            color,
            visible: true,
        }
    }

    /// A point marker at `position`.
    pub fn point(position: Vec3, color: LinearRgba) -> Self {
        Self::new(Shape::Vector { radius: 0.1 }, color).at(position)
    }

    /// A coordinate frame placed by `transform`.
    pub fn frame(transform: &AffineTransform, opacity: f32) -> Self {
        Self::new(
            Shape::CoordinateFrame {
                axis_length: 1.0,
                opacity,
            },
            LinearRgba::WHITE.with_alpha(opacity),
        )
        .with_transform(transform)
    }

    /// Sets the position.
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the orientation.
    pub fn oriented(mut self, orientation: Quaternion) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the visibility.
    pub fn shown(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Copies translation, rotation, and scale from an affine transform.
    pub fn with_transform(mut self, transform: &AffineTransform) -> Self {
        self.position = transform.translation();
        self.orientation = transform.rotation();
        self.scale = transform.scale();
        self
    }
}

/// Accepts drawables keyed by role.
pub trait DrawableSink {
    /// Inserts or overwrites the drawable for `role`.
    fn add(&mut self, role: Role, drawable: Drawable);

    /// Overwrites the drawable for `role` only if one exists. Returns whether it did.
    fn replace(&mut self, role: Role, drawable: Drawable) -> bool;

    /// Removes and returns the drawable for `role`, if any.
    fn remove(&mut self, role: Role) -> Option<Drawable>;

    /// Returns the drawable for `role`, if any.
    fn get(&self, role: Role) -> Option<&Drawable>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::assert_relative_eq;

    #[test]
    fn test_static_and_animated_roles_are_disjoint() {
        for role in Role::STATIC {
            assert!(!Role::ANIMATED.contains(&role), "{role:?} is in both sets");
        }
    }

    #[test]
    fn test_frame_copies_transform_components() {
        let transform = AffineTransform::from_rotation_scale(
            Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2),
            2.0,
        );
        let frame = Drawable::frame(&transform, 0.5);
        assert_eq!(frame.scale, 2.0);
        assert_eq!(frame.orientation, transform.rotation());
        assert_relative_eq!(
            frame.orientation.rotate_vec3(Vec3::Z) * frame.scale,
            transform.transform_vector(Vec3::Z),
            epsilon = 1e-12
        );
        assert!(matches!(frame.shape, Shape::CoordinateFrame { opacity, .. } if opacity == 0.5));
    }

    #[test]
    fn test_builders_compose() {
        let d = Drawable::point(Vec3::new(1.0, 2.0, 0.0), LinearRgba::YELLOW)
            .oriented(Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2))
            .shown(false);
        assert_eq!(d.position, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(d.scale, 1.0);
        assert!(!d.visible);
    }
}
