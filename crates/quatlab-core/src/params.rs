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

//! The parameter record driving every computation.

use serde::{Deserialize, Serialize};

use crate::math::{degrees_to_radians, Vec2};

/// The five scalar inputs of the visualization.
///
/// The record is a plain value: engines read it, never mutate it, and derive
/// every embedding point from it on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Rotation angle in degrees. Any real value is accepted.
    pub angle_degrees: f64,
    /// Rotation axis direction in the xy plane. Need not be unit length.
    pub axis: Vec2,
    /// Target point V in the xy plane.
    pub target: Vec2,
}

impl Parameters {
    /// Creates a parameter record.
    pub const fn new(angle_degrees: f64, axis: Vec2, target: Vec2) -> Self {
        Self {
            angle_degrees,
            axis,
            target,
        }
    }

    /// The angle in radians.
    #[inline]
    pub fn angle_radians(&self) -> f64 {
        degrees_to_radians(self.angle_degrees)
    }
}

impl Default for Parameters {
    /// Angle 0°, axis `(1, 0)`, target `(2, 1)`.
    fn default() -> Self {
        Self::new(0.0, Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0))
    }
}

/// Provides the current parameter record to whoever renders it.
pub trait ParameterSource {
    /// Returns the current parameters.
    fn parameters(&self) -> Parameters;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let p = Parameters::default();
        assert_eq!(p.angle_degrees, 0.0);
        assert_eq!(p.axis, Vec2::new(1.0, 0.0));
        assert_eq!(p.target, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_angle_in_radians() {
        let p = Parameters::new(90.0, Vec2::X, Vec2::Y);
        assert_relative_eq!(p.angle_radians(), FRAC_PI_2);
    }
}
