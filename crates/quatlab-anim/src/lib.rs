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

//! # Quatlab Anim
//!
//! Phase-based animation of conjugation results.
//!
//! A [`PhaseTable`] times an [`AnimationKind`]; a [`Choreography`] turns a
//! result bundle into eased [`Track`]s laid out on a [`Timeline`]; the
//! [`Sequencer`] plays it against a drawable sink, one tick per frame.

#![warn(missing_docs)]

pub mod choreography;
pub mod easing;
pub mod sequencer;
pub mod table;
pub mod timeline;
pub mod track;

pub use choreography::Choreography;
pub use easing::Easing;
pub use sequencer::{Sequencer, SequencerState, TickOutcome};
pub use table::{AnimationKind, PhaseTable, PhaseTables};
pub use timeline::{check_partition, Phase, Timeline, TimelineError};
pub use track::Track;
