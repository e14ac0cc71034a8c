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

//! The public-facing API of the Quatlab visualizer.
//! This crate wires the engines and the sequencer behind a single
//! [`Visualizer`] that a host drives one frame at a time.

#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod event;
pub mod scene_graph;

pub use config::{ConfigError, VisualizerConfig, CONFIG_FILE_NAME};
pub use controller::Visualizer;
pub use event::ControlEvent;
pub use scene_graph::{SceneGraph, ScenePass};

pub mod prelude {
    //! The types a host needs to drive a [`Visualizer`](crate::Visualizer).
    pub use crate::{ControlEvent, SceneGraph, Visualizer, VisualizerConfig};
    pub use quatlab_anim::{AnimationKind, SequencerState, TickOutcome};
    pub use quatlab_core::math::{Vec2, Vec3};
    pub use quatlab_core::platform::{
        Clock, CountingScheduler, FrameScheduler, ManualClock, SystemClock,
    };
    pub use quatlab_core::scene::{Drawable, DrawableSink, Role, Shape};
    pub use quatlab_core::{ParameterSource, Parameters};
    pub use quatlab_engine::{AlgebraMode, AngleReadout, ConjugationResult, ConjugationView};
}
