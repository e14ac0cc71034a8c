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

use quatlab_core::math::saturate;

/// Maps local phase progress `u ∈ [0, 1]` to an interpolation factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// `e(u) = u`.
    Linear,
    /// `e(u) = 2u²` below one half, `1 − (−2u + 2)² / 2` above.
    #[default]
    EaseInOutQuad,
}

impl Easing {
    /// Evaluates the curve. `u` is clamped to `[0, 1]` first.
    pub fn apply(self, u: f64) -> f64 {
        let u = saturate(u);
        match self {
            Easing::Linear => u,
            Easing::EaseInOutQuad => {
                if u < 0.5 {
                    2.0 * u * u
                } else {
                    1.0 - (-2.0 * u + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ease_in_out_quad_fixed_points() {
        let e = Easing::EaseInOutQuad;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(0.5), 0.5);
        assert_eq!(e.apply(1.0), 1.0);
        assert_relative_eq!(e.apply(0.25), 0.125);
        assert_relative_eq!(e.apply(0.75), 0.875);
    }

    #[test]
    fn test_ease_in_out_quad_is_monotonic() {
        let e = Easing::EaseInOutQuad;
        let mut previous = 0.0;
        for i in 0..=100 {
            let value = e.apply(i as f64 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::EaseInOutQuad.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseInOutQuad.apply(3.0), 1.0);
        assert_eq!(Easing::Linear.apply(f64::NAN), 0.0);
    }
}
