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

//! Partition of normalized time into phases.

use quatlab_core::math::{saturate, EPSILON};
use quatlab_core::scene::Role;
use thiserror::Error;

use crate::easing::Easing;
use crate::track::Track;

/// Errors raised while assembling a timeline or a phase table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    /// A timeline needs at least one phase.
    #[error("timeline has no phases")]
    Empty,

    /// The first phase must start at 0.
    #[error("first phase starts at {0}, expected 0")]
    NotStartingAtZero(f64),

    /// The last phase must end at 1.
    #[error("last phase ends at {0}, expected 1")]
    NotEndingAtOne(f64),

    /// A phase has a non-positive or non-finite span.
    #[error("phase {index} is empty or inverted: [{start}, {end})")]
    EmptyPhase {
        /// Phase index.
        index: usize,
        /// Phase start.
        start: f64,
        /// Phase end.
        end: f64,
    },

    /// Two consecutive phases leave part of `[0, 1]` uncovered.
    #[error("gap between phase {index} and the previous one: {previous_end} .. {start}")]
    Gap {
        /// Index of the later phase.
        index: usize,
        /// End of the previous phase.
        previous_end: f64,
        /// Start of this phase.
        start: f64,
    },

    /// Two consecutive phases cover the same instant.
    #[error("phase {index} overlaps the previous one: starts at {start}, previous ends at {previous_end}")]
    Overlap {
        /// Index of the later phase.
        index: usize,
        /// End of the previous phase.
        previous_end: f64,
        /// Start of this phase.
        start: f64,
    },

    /// An animation duration must be positive and finite.
    #[error("duration must be positive, got {0} ms")]
    NonPositiveDuration(f64),

    /// The phase table does not have the number of phases the animation needs.
    #[error("{kind} animation needs {expected} phases, table defines {got}")]
    PhaseCountMismatch {
        /// Animation name.
        kind: String,
        /// Phases the animation defines.
        expected: usize,
        /// Phases the table defines.
        got: usize,
    },
}

/// A time-bounded animation segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    /// Human-readable name, logged when the phase is entered.
    pub label: &'static str,
    /// Normalized start time, inclusive.
    pub start: f64,
    /// Normalized end time, exclusive except for the last phase.
    pub end: f64,
    /// Easing applied to the local progress.
    pub easing: Easing,
    /// Properties interpolated during the phase.
    pub tracks: Vec<Track>,
    /// Drawables shown during the phase. Every other drawable of the run is hidden.
    pub visible: Vec<Role>,
}

impl Phase {
    /// Creates a phase with no tracks and nothing visible.
    pub fn new(label: &'static str, start: f64, end: f64) -> Self {
        Self {
            label,
            start,
            end,
            easing: Easing::default(),
            tracks: Vec::new(),
            visible: Vec::new(),
        }
    }

    /// Sets the easing.
    pub fn eased(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Adds tracks.
    pub fn with_tracks(mut self, tracks: impl IntoIterator<Item = Track>) -> Self {
        self.tracks.extend(tracks);
        self
    }

    /// Marks drawables as shown during the phase.
    pub fn showing(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.visible.extend(roles);
        self
    }

    /// Whether `role` is shown during the phase.
    pub fn shows(&self, role: Role) -> bool {
        self.visible.contains(&role)
    }

    /// Local progress of global time `t` within this phase, in `[0, 1]`.
    pub fn local_progress(&self, t: f64) -> f64 {
        saturate((t - self.start) / (self.end - self.start))
    }
}

/// Checks that `spans` partition `[0, 1]`: non-empty, starting at 0, ending
/// at 1, each span positive, no gaps, no overlaps.
pub fn check_partition(spans: &[(f64, f64)]) -> Result<(), TimelineError> {
    let &(first_start, _) = spans.first().ok_or(TimelineError::Empty)?;
    if first_start.abs() > EPSILON {
        return Err(TimelineError::NotStartingAtZero(first_start));
    }

    for (index, &(start, end)) in spans.iter().enumerate() {
        let span = end - start;
        if !span.is_finite() || span <= EPSILON {
            return Err(TimelineError::EmptyPhase { index, start, end });
        }
        if index > 0 {
            let previous_end = spans[index - 1].1;
            if start > previous_end + EPSILON {
                return Err(TimelineError::Gap {
                    index,
                    previous_end,
                    start,
                });
            }
            if start < previous_end - EPSILON {
                return Err(TimelineError::Overlap {
                    index,
                    previous_end,
                    start,
                });
            }
        }
    }

    let last_end = spans[spans.len() - 1].1;
    if (last_end - 1.0).abs() > EPSILON {
        return Err(TimelineError::NotEndingAtOne(last_end));
    }
    Ok(())
}

/// An ordered, gap-free, overlap-free partition of `[0, 1]` into phases.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    phases: Vec<Phase>,
}

impl Timeline {
    /// Validates and wraps `phases`.
    pub fn new(phases: Vec<Phase>) -> Result<Self, TimelineError> {
        let spans: Vec<(f64, f64)> = phases.iter().map(|p| (p.start, p.end)).collect();
        check_partition(&spans)?;
        Ok(Self { phases })
    }

    /// The phases in order.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Number of phases.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// A validated timeline is never empty.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Finds the phase containing global time `t` and the local progress in it.
    ///
    /// Phases are closed at entry and open at exit; the last phase also owns
    /// `t = 1`. `t` is clamped to `[0, 1]`.
    pub fn locate(&self, t: f64) -> (usize, f64) {
        let t = saturate(t);
        let last = self.phases.len() - 1;
        let index = self
            .phases
            .iter()
            .position(|phase| t < phase.end)
            .unwrap_or(last)
            .min(last);
        (index, self.phases[index].local_progress(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn three_phases() -> Timeline {
        Timeline::new(vec![
            Phase::new("hold", 0.0, 0.33),
            Phase::new("move", 0.33, 0.67),
            Phase::new("rest", 0.67, 1.0),
        ])
        .expect("valid timeline")
    }

    #[test]
    fn test_locate_uses_half_open_phases() {
        let timeline = three_phases();
        assert_eq!(timeline.locate(0.0), (0, 0.0));
        assert_eq!(timeline.locate(0.33).0, 1);
        assert_eq!(timeline.locate(0.6699).0, 1);
        assert_eq!(timeline.locate(0.67).0, 2);
        assert_eq!(timeline.locate(1.0), (2, 1.0));
        assert_eq!(timeline.locate(7.0), (2, 1.0));
        assert_eq!(timeline.locate(-1.0), (0, 0.0));
    }

    #[test]
    fn test_locate_reports_local_progress() {
        let (index, u) = three_phases().locate(0.55);
        assert_eq!(index, 1);
        assert_relative_eq!(u, 0.22 / 0.34, epsilon = 1e-12);
        assert_relative_eq!(u, 0.647, epsilon = 1e-3);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Timeline::new(Vec::new()), Err(TimelineError::Empty));
    }

    #[test]
    fn test_rejects_gaps_and_overlaps() {
        let gap = Timeline::new(vec![Phase::new("a", 0.0, 0.4), Phase::new("b", 0.5, 1.0)]);
        assert!(matches!(gap, Err(TimelineError::Gap { index: 1, .. })));

        let overlap = Timeline::new(vec![Phase::new("a", 0.0, 0.6), Phase::new("b", 0.5, 1.0)]);
        assert!(matches!(overlap, Err(TimelineError::Overlap { index: 1, .. })));
    }

    #[test]
    fn test_rejects_bad_bounds() {
        assert_eq!(
            Timeline::new(vec![Phase::new("a", 0.1, 1.0)]),
            Err(TimelineError::NotStartingAtZero(0.1))
        );
        assert_eq!(
            Timeline::new(vec![Phase::new("a", 0.0, 0.9)]),
            Err(TimelineError::NotEndingAtOne(0.9))
        );
        assert!(matches!(
            Timeline::new(vec![Phase::new("a", 0.0, 0.5), Phase::new("b", 0.5, 0.5)]),
            Err(TimelineError::EmptyPhase { index: 1, .. })
        ));
        assert!(matches!(
            Timeline::new(vec![Phase::new("a", 0.0, f64::NAN)]),
            Err(TimelineError::EmptyPhase { index: 0, .. })
        ));
    }

    #[test]
    fn test_error_messages_are_readable() {
        let err = TimelineError::PhaseCountMismatch {
            kind: "QV".to_owned(),
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "QV animation needs 3 phases, table defines 2");
    }
}
