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

//! Interpolation targets driven by a phase.

use quatlab_core::math::{AffineTransform, LinearRgba, Quaternion, Vec3};
use quatlab_core::scene::{Drawable, Role};

/// Below this length a stretched axis keeps its previous orientation.
const MIN_STRETCH_LENGTH: f64 = 0.01;

/// One property of one drawable, interpolated between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Track {
    /// Linear interpolation of the position.
    Position {
        /// Animated drawable.
        role: Role,
        /// Value at the start of the phase.
        from: Vec3,
        /// Value at the end of the phase.
        to: Vec3,
    },
    /// A coordinate frame moving between two placements: translation and
    /// scale lerp, rotation slerps.
    Frame {
        /// Animated drawable.
        role: Role,
        /// Placement at the start of the phase.
        from: AffineTransform,
        /// Placement at the end of the phase.
        to: AffineTransform,
    },
    /// Linear interpolation of the color.
    Color {
        /// Animated drawable.
        role: Role,
        /// Value at the start of the phase.
        from: LinearRgba,
        /// Value at the end of the phase.
        to: LinearRgba,
    },
    /// An origin-anchored arrow whose tip travels linearly from `from` to
    /// `to`: orientation follows the tip, scale follows its length.
    Stretch {
        /// Animated drawable.
        role: Role,
        /// Tip at the start of the phase.
        from: Vec3,
        /// Tip at the end of the phase.
        to: Vec3,
    },
}

impl Track {
    /// Moves a coordinate frame from one transform to another.
    pub fn frame(role: Role, from: &AffineTransform, to: &AffineTransform) -> Track {
        Track::Frame {
            role,
            from: *from,
            to: *to,
        }
    }

    /// Pins a coordinate frame at `transform` for the whole phase.
    pub fn hold_frame(role: Role, transform: &AffineTransform) -> Track {
        Self::frame(role, transform, transform)
    }

    /// The drawable this track animates.
    pub fn role(&self) -> Role {
        match *self {
            Track::Position { role, .. }
            | Track::Frame { role, .. }
            | Track::Color { role, .. }
            | Track::Stretch { role, .. } => role,
        }
    }

    /// Writes the interpolated value at `eased ∈ [0, 1]` into `drawable`.
    pub fn apply(&self, drawable: &mut Drawable, eased: f64) {
        match *self {
            Track::Position { from, to, .. } => {
                drawable.position = Vec3::lerp(from, to, eased);
            }
            Track::Frame { from, to, .. } => {
                let placement = AffineTransform::interpolate(&from, &to, eased);
                *drawable = drawable.with_transform(&placement);
            }
            Track::Color { from, to, .. } => {
                drawable.color = LinearRgba::lerp(from, to, eased as f32);
            }
            Track::Stretch { from, to, .. } => {
                let tip = Vec3::lerp(from, to, eased);
                let length = tip.length();
                if length > MIN_STRETCH_LENGTH {
                    drawable.orientation = Quaternion::from_rotation_arc(Vec3::Z, tip / length);
                    drawable.scale = length;
                }
            }
        }
    }
}
