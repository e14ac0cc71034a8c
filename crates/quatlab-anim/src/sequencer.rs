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

//! The phase state machine playing a [`Choreography`].
//!
//! `Idle → Running(phase) → Complete → Idle`. There is a single run slot: a
//! start request while a run is in flight is ignored, whatever its kind.
//! Each tick samples the clock once, is O(cast size), and never blocks.

use quatlab_core::math::saturate;
use quatlab_core::scene::DrawableSink;

use crate::choreography::Choreography;

/// Where the sequencer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerState {
    /// Nothing to play.
    #[default]
    Idle,
    /// A run is in flight.
    Running {
        /// Index of the current phase.
        phase: usize,
    },
    /// The last run just finished; the next tick or start returns to `Idle`.
    Complete,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No run in flight.
    Idle,
    /// The run advanced.
    Running {
        /// Index of the current phase.
        phase: usize,
        /// Global progress `t ∈ [0, 1]`.
        progress: f64,
        /// Local, un-eased progress within the phase.
        local: f64,
    },
    /// The run reached `t = 1` during this tick.
    Completed,
}

#[derive(Debug)]
struct ActiveRun {
    choreography: Choreography,
    started_at_ms: f64,
    progress: f64,
    entered: Option<usize>,
}

/// Plays one choreography at a time against a drawable sink.
#[derive(Debug, Default)]
pub struct Sequencer {
    state: SequencerState,
    run: Option<ActiveRun>,
}

impl Sequencer {
    /// Creates an idle sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        matches!(self.state, SequencerState::Running { .. })
    }

    /// The choreography being played.
    pub fn choreography(&self) -> Option<&Choreography> {
        self.run.as_ref().map(|run| &run.choreography)
    }

    /// Starts playing `choreography` at `now_ms`.
    ///
    /// Adds the cast to `sink` and applies the state at `t = 0`. Returns
    /// `false` and changes nothing if a run is already in flight.
    pub fn start(
        &mut self,
        choreography: Choreography,
        now_ms: f64,
        sink: &mut impl DrawableSink,
    ) -> bool {
        if self.is_running() {
            log::warn!(
                "Ignoring {} animation request: an animation is already running.",
                choreography.kind()
            );
            return false;
        }

        log::info!(
            "Starting {} animation ({} phases, {} ms).",
            choreography.kind(),
            choreography.timeline().len(),
            choreography.duration_ms()
        );

        for (role, drawable) in choreography.cast() {
            sink.add(*role, *drawable);
        }

        self.run = Some(ActiveRun {
            choreography,
            started_at_ms: now_ms,
            progress: 0.0,
            entered: None,
        });
        self.state = SequencerState::Running { phase: 0 };
        self.tick(now_ms, sink);
        true
    }

    /// Advances the run in flight to `now_ms`.
    pub fn tick(&mut self, now_ms: f64, sink: &mut impl DrawableSink) -> TickOutcome {
        let Some(run) = self.run.as_mut() else {
            if self.state == SequencerState::Complete {
                self.state = SequencerState::Idle;
            }
            return TickOutcome::Idle;
        };

        let choreography = &run.choreography;
        let elapsed = now_ms - run.started_at_ms;
        let t = saturate(elapsed / choreography.duration_ms());
        run.progress = run.progress.max(t);
        let progress = run.progress;

        let timeline = choreography.timeline();
        let (index, local) = timeline.locate(progress);
        let phase = &timeline.phases()[index];

        if run.entered != Some(index) {
            log::info!(
                "{} phase {}/{}: {}",
                choreography.kind(),
                index + 1,
                timeline.len(),
                phase.label
            );
            run.entered = Some(index);
        }

        let eased = phase.easing.apply(local);
        for (role, initial) in choreography.cast() {
            let mut drawable = sink.get(*role).copied().unwrap_or(*initial);
            drawable.visible = phase.shows(*role);
            for track in phase.tracks.iter().filter(|track| track.role() == *role) {
                track.apply(&mut drawable, eased);
            }
            if !sink.replace(*role, drawable) {
                sink.add(*role, drawable);
            }
        }

        if progress >= 1.0 {
            for role in choreography.transient_roles() {
                sink.remove(*role);
            }
            log::info!(
                "{} animation complete, final point {:?}.",
                choreography.kind(),
                choreography.final_point()
            );
            self.run = None;
            self.state = SequencerState::Complete;
            return TickOutcome::Completed;
        }

        self.state = SequencerState::Running { phase: index };
        TickOutcome::Running {
            phase: index,
            progress,
            local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::AnimationKind;
    use approx::assert_relative_eq;
    use quatlab_core::math::{LinearRgba, Vec3};
    use quatlab_core::scene::{Drawable, Role};
    use quatlab_core::Parameters;
    use quatlab_engine::{AlgebraMode, ConjugationView};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapSink(HashMap<Role, Drawable>);

    impl DrawableSink for MapSink {
        fn add(&mut self, role: Role, drawable: Drawable) {
            self.0.insert(role, drawable);
        }

        fn replace(&mut self, role: Role, drawable: Drawable) -> bool {
            match self.0.get_mut(&role) {
                Some(slot) => {
                    *slot = drawable;
                    true
                }
                None => false,
            }
        }

        fn remove(&mut self, role: Role) -> Option<Drawable> {
            self.0.remove(&role)
        }

        fn get(&self, role: Role) -> Option<&Drawable> {
            self.0.get(&role)
        }
    }

    fn choreography(kind: AnimationKind) -> Choreography {
        let result = AlgebraMode::Pseudo.compute(&Parameters::default());
        Choreography::build(kind, &kind.default_table(), &result).expect("valid choreography")
    }

    #[test]
    fn test_qv_progress_at_1650_ms() {
        let mut sink = MapSink::default();
        let mut sequencer = Sequencer::new();
        assert!(sequencer.start(choreography(AnimationKind::Qv), 1000.0, &mut sink));

        match sequencer.tick(2650.0, &mut sink) {
            TickOutcome::Running {
                phase,
                progress,
                local,
            } => {
                assert_eq!(phase, 1);
                assert_relative_eq!(progress, 0.55, epsilon = 1e-12);
                assert_relative_eq!(local, 0.647, epsilon = 1e-3);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(sequencer.state(), SequencerState::Running { phase: 1 });
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let mut sink = MapSink::default();
        let mut sequencer = Sequencer::new();
        assert!(sequencer.start(choreography(AnimationKind::Qv), 0.0, &mut sink));
        assert!(!sequencer.start(choreography(AnimationKind::Qvq), 10.0, &mut sink));
        assert_eq!(
            sequencer.choreography().map(Choreography::kind),
            Some(AnimationKind::Qv)
        );
        assert!(sink.get(Role::SecondFrame).is_none());
    }

    #[test]
    fn test_progress_never_decreases() {
        let mut sink = MapSink::default();
        let mut sequencer = Sequencer::new();
        sequencer.start(choreography(AnimationKind::Qv), 0.0, &mut sink);
        sequencer.tick(1500.0, &mut sink);
        let outcome = sequencer.tick(900.0, &mut sink);
        assert!(matches!(outcome, TickOutcome::Running { progress, .. } if progress == 0.5));
        let outcome = sequencer.tick(-5000.0, &mut sink);
        assert!(matches!(outcome, TickOutcome::Running { progress, .. } if progress == 0.5));
    }

    #[test]
    fn test_stalled_clock_stalls_progress() {
        let mut sink = MapSink::default();
        let mut sequencer = Sequencer::new();
        sequencer.start(choreography(AnimationKind::Qvq), 0.0, &mut sink);
        for _ in 0..10 {
            assert!(matches!(
                sequencer.tick(0.0, &mut sink),
                TickOutcome::Running { phase: 0, .. }
            ));
        }
    }

    #[test]
    fn test_completion_removes_transients_and_returns_to_idle() {
        let mut sink = MapSink::default();
        let mut sequencer = Sequencer::new();
        sequencer.start(choreography(AnimationKind::Qvq), 0.0, &mut sink);
        assert!(sink.get(Role::InverseMarker).is_some());

        assert_eq!(sequencer.tick(6000.0, &mut sink), TickOutcome::Completed);
        assert_eq!(sequencer.state(), SequencerState::Complete);
        assert!(sink.get(Role::InverseMarker).is_none());
        assert!(sink.get(Role::MovingCanonicalAxis).is_none());
        assert!(sink.get(Role::MovingProjection).is_none());

        let final_marker = sink.get(Role::MovingFinal).expect("final point persists");
        assert!(final_marker.visible);
        let expected = AlgebraMode::Pseudo.compute(&Parameters::default()).final_point();
        assert_relative_eq!(final_marker.position, expected, epsilon = 1e-12);
        assert!(!sink.get(Role::FirstFrame).expect("frame persists").visible);

        assert_eq!(sequencer.tick(6100.0, &mut sink), TickOutcome::Idle);
        assert_eq!(sequencer.state(), SequencerState::Idle);
    }

    #[test]
    fn test_skipped_phases_still_land_on_end_state() {
        let mut sink = MapSink::default();
        let mut sequencer = Sequencer::new();
        sequencer.start(choreography(AnimationKind::Qv), 0.0, &mut sink);
        // Jump straight from phase 0 into the last phase.
        sequencer.tick(2900.0, &mut sink);
        let moving = sink.get(Role::MovingIntermediate).expect("cast member");
        assert_relative_eq!(moving.position, Vec3::new(2.0, 1.0, 0.0), epsilon = 1e-12);
        assert_eq!(moving.color, LinearRgba::ORANGE);
    }

    #[test]
    fn test_restart_after_completion() {
        let mut sink = MapSink::default();
        let mut sequencer = Sequencer::new();
        sequencer.start(choreography(AnimationKind::Qv), 0.0, &mut sink);
        assert_eq!(sequencer.tick(3000.0, &mut sink), TickOutcome::Completed);
        assert!(sequencer.start(choreography(AnimationKind::Qvq), 3000.0, &mut sink));
        assert!(sequencer.is_running());
    }
}
