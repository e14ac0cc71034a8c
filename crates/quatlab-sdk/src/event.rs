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

//! Control events sent to the visualizer by its user interface.

use quatlab_anim::AnimationKind;
use quatlab_core::math::Vec2;
use quatlab_engine::AlgebraMode;

/// A user action. Every event except [`ControlEvent::Animate`] triggers a recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Sets the rotation angle, in degrees.
    SetAngle(f64),
    /// Sets the rotation axis direction in the xy plane.
    SetAxis(Vec2),
    /// Sets the target point V in the xy plane.
    SetTarget(Vec2),
    /// Switches the displayed algebra.
    SetMode(AlgebraMode),
    /// Shows or hides the final result and the angle readouts.
    ShowFinalResult(bool),
    /// Restores the default parameters.
    Reset,
    /// Plays an animation. Ignored while another one is running.
    Animate(AnimationKind),
}
