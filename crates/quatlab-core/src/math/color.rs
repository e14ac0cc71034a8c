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

//! Drawable colors and the visualization palette.

use serde::{Deserialize, Serialize};

/// An RGBA color with linear-light `f32` channels.
///
/// Color tracks blend in linear space. Palette entries noted with a hex code
/// are the linear-light equivalent of that sRGB value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRgba {
    #[allow(missing_docs)]
    pub r: f32,
    #[allow(missing_docs)]
    pub g: f32,
    #[allow(missing_docs)]
    pub b: f32,
    /// Opacity, not gamma encoded.
    pub a: f32,
}

impl LinearRgba {
    /// Canonical axis and final result.
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Target point `V`.
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    /// Rotation element `Q`.
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    /// Rotation axis line.
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    /// `#FF6600`, the intermediate result `Q·V`.
    pub const ORANGE: Self = Self::rgb(1.0, 0.1329, 0.0);
    /// `#FF00AA`, the inverse element `Q⁻¹`.
    pub const PINK: Self = Self::rgb(1.0, 0.0, 0.402);
    #[allow(missing_docs)]
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[allow(missing_docs)]
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color, new opacity.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Channel-wise blend, `t` clamped to `[0, 1]`.
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self::new(
            mix(start.r, end.r),
            mix(start.g, end.g),
            mix(start.b, end.b),
            mix(start.a, end.a),
        )
    }
}

impl Default for LinearRgba {
    fn default() -> Self {
        Self::WHITE
    }
}
