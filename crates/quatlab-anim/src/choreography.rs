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

//! The immutable per-run animation context.
//!
//! A [`Choreography`] is assembled once, when an animation starts, from a
//! result bundle and a phase table. It owns copies of every point and frame
//! the run needs, so parameter changes made while it plays only affect the
//! next run.

use quatlab_core::math::{AffineTransform, LinearRgba, Vec3};
use quatlab_core::scene::{Drawable, Role, Shape};
use quatlab_engine::ConjugationView;

use crate::easing::Easing;
use crate::table::{AnimationKind, PhaseTable};
use crate::timeline::{Phase, Timeline, TimelineError};
use crate::track::Track;

const FIRST_FRAME_OPACITY_QV: f32 = 0.5;
const FIRST_FRAME_OPACITY_QVQ: f32 = 0.7;
const SECOND_FRAME_OPACITY: f32 = 0.5;
const MARKER_RADIUS: f64 = 0.12;
const FINAL_RADIUS: f64 = 0.15;
const PROJECTION_RADIUS: f64 = 0.1;

/// Everything one animation run needs, captured at start.
#[derive(Debug, Clone, PartialEq)]
pub struct Choreography {
    kind: AnimationKind,
    duration_ms: f64,
    timeline: Timeline,
    cast: Vec<(Role, Drawable)>,
    transient: Vec<Role>,
    final_point: Vec3,
}

impl Choreography {
    /// Builds the choreography of `kind` for `view`, timed by `table`.
    pub fn build(
        kind: AnimationKind,
        table: &PhaseTable,
        view: &impl ConjugationView,
    ) -> Result<Self, TimelineError> {
        table.validate(kind)?;
        let spans = table.spans();

        let (phases, cast, transient, final_point) = match kind {
            AnimationKind::Qv => qv(&spans, view),
            AnimationKind::Qvq => qvq(&spans, view),
        };

        Ok(Self {
            kind,
            duration_ms: table.duration_ms,
            timeline: Timeline::new(phases)?,
            cast,
            transient,
            final_point,
        })
    }

    /// The animation played.
    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// Total duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// The validated phase partition.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The drawables added to the scene when the run starts, in their initial state.
    pub fn cast(&self) -> &[(Role, Drawable)] {
        &self.cast
    }

    /// Roles removed from the scene when the run completes.
    pub fn transient_roles(&self) -> &[Role] {
        &self.transient
    }

    /// The point the run ends on.
    pub fn final_point(&self) -> Vec3 {
        self.final_point
    }
}

type Parts = (Vec<Phase>, Vec<(Role, Drawable)>, Vec<Role>, Vec3);

fn marker(position: Vec3, radius: f64, color: LinearRgba) -> Drawable {
    Drawable::new(Shape::Vector { radius }, color)
        .at(position)
        .shown(false)
}

fn frame(opacity: f32) -> Drawable {
    Drawable::frame(&AffineTransform::IDENTITY, opacity).shown(false)
}

/// `Q·V`: hold, move the first frame while the carried point travels, hold the result.
fn qv(spans: &[(f64, f64)], view: &impl ConjugationView) -> Parts {
    let first = view.first_frame();
    let (initial, intermediate) = (view.initial(), view.intermediate());
    let shown = [Role::FirstFrame, Role::MovingIntermediate];

    let phases = vec![
        Phase::new("initial state", spans[0].0, spans[0].1),
        Phase::new("first transform", spans[1].0, spans[1].1)
            .with_tracks([Track::frame(Role::FirstFrame, &AffineTransform::IDENTITY, &first)])
            .with_tracks(carry(Role::MovingIntermediate, initial, intermediate))
            .with_tracks([fade(Role::MovingIntermediate, LinearRgba::CYAN, LinearRgba::ORANGE)])
            .showing(shown),
        Phase::new("result", spans[2].0, spans[2].1)
            .eased(Easing::Linear)
            .with_tracks([Track::hold_frame(Role::FirstFrame, &first)])
            .with_tracks(carry(Role::MovingIntermediate, intermediate, intermediate))
            .with_tracks([fade(Role::MovingIntermediate, LinearRgba::ORANGE, LinearRgba::ORANGE)])
            .showing(shown),
    ];

    let cast = vec![
        (Role::FirstFrame, frame(FIRST_FRAME_OPACITY_QV)),
        (
            Role::MovingIntermediate,
            marker(initial, MARKER_RADIUS, LinearRgba::CYAN),
        ),
    ];

    (phases, cast, Vec::new(), intermediate)
}

/// `Q·V·Q⁻¹`: the `Q·V` construction followed by a second frame carrying the
/// canonical axis onto the reference element.
fn qvq(spans: &[(f64, f64)], view: &impl ConjugationView) -> Parts {
    let (first, second) = (view.first_frame(), view.second_frame());
    let (initial, intermediate, final_point, reference) = (
        view.initial(),
        view.intermediate(),
        view.final_point(),
        view.reference(),
    );

    let phases = vec![
        Phase::new("initial state", spans[0].0, spans[0].1).showing([Role::InverseMarker]),
        Phase::new("first transform", spans[1].0, spans[1].1)
            .with_tracks([Track::frame(Role::FirstFrame, &AffineTransform::IDENTITY, &first)])
            .with_tracks(carry(Role::MovingIntermediate, initial, intermediate))
            .with_tracks([fade(Role::MovingIntermediate, LinearRgba::CYAN, LinearRgba::ORANGE)])
            .showing([
                Role::InverseMarker,
                Role::FirstFrame,
                Role::MovingIntermediate,
                Role::MovingProjection,
            ]),
        Phase::new("second transform", spans[2].0, spans[2].1)
            .with_tracks([Track::hold_frame(Role::FirstFrame, &first)])
            .with_tracks(carry(Role::MovingIntermediate, intermediate, intermediate))
            .with_tracks([fade(Role::MovingIntermediate, LinearRgba::ORANGE, LinearRgba::ORANGE)])
            .with_tracks([Track::frame(Role::SecondFrame, &AffineTransform::IDENTITY, &second)])
            .with_tracks([Track::Stretch {
                role: Role::MovingCanonicalAxis,
                from: Vec3::Z,
                to: reference,
            }])
            .with_tracks(carry(Role::MovingFinal, intermediate, final_point))
            .with_tracks([fade(Role::MovingFinal, LinearRgba::ORANGE, LinearRgba::GREEN)])
            .showing([
                Role::InverseMarker,
                Role::FirstFrame,
                Role::SecondFrame,
                Role::MovingIntermediate,
                Role::MovingProjection,
                Role::MovingCanonicalAxis,
                Role::MovingFinal,
            ]),
        Phase::new("final state", spans[3].0, spans[3].1)
            .eased(Easing::Linear)
            .with_tracks([Track::hold_frame(Role::SecondFrame, &second)])
            .with_tracks(carry(Role::MovingFinal, final_point, final_point))
            .with_tracks([fade(Role::MovingFinal, LinearRgba::GREEN, LinearRgba::GREEN)])
            .showing([Role::InverseMarker, Role::SecondFrame, Role::MovingFinal]),
    ];

    let cast = vec![
        (
            Role::InverseMarker,
            marker(reference, MARKER_RADIUS, LinearRgba::PINK),
        ),
        (Role::FirstFrame, frame(FIRST_FRAME_OPACITY_QVQ)),
        (Role::SecondFrame, frame(SECOND_FRAME_OPACITY)),
        (
            Role::MovingIntermediate,
            marker(initial, MARKER_RADIUS, LinearRgba::CYAN),
        ),
        (
            Role::MovingProjection,
            Drawable::new(
                Shape::Projection {
                    radius: PROJECTION_RADIUS,
                },
                LinearRgba::ORANGE.with_alpha(0.7),
            )
            .at(intermediate.flatten())
            .shown(false),
        ),
        (
            Role::MovingCanonicalAxis,
            Drawable::new(Shape::Arrow { length: 1.0 }, LinearRgba::GREEN).shown(false),
        ),
        (
            Role::MovingFinal,
            marker(intermediate, FINAL_RADIUS, LinearRgba::ORANGE),
        ),
    ];

    let transient = vec![
        Role::InverseMarker,
        Role::MovingCanonicalAxis,
        Role::MovingProjection,
    ];

    (phases, cast, transient, final_point)
}

fn carry(role: Role, from: Vec3, to: Vec3) -> [Track; 1] {
    [Track::Position { role, from, to }]
}

fn fade(role: Role, from: LinearRgba, to: LinearRgba) -> Track {
    Track::Color { role, from, to }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quatlab_core::math::Vec2;
    use quatlab_core::Parameters;
    use quatlab_engine::AlgebraMode;

    fn params() -> Parameters {
        Parameters::new(45.0, Vec2::new(1.0, 1.0), Vec2::new(2.0, -1.0))
    }

    #[test]
    fn test_qv_uses_three_phases() {
        let result = AlgebraMode::Pseudo.compute(&params());
        let choreography =
            Choreography::build(AnimationKind::Qv, &AnimationKind::Qv.default_table(), &result)
                .expect("default table is valid");
        assert_eq!(choreography.timeline().len(), 3);
        assert_eq!(choreography.duration_ms(), 3000.0);
        assert!(choreography.transient_roles().is_empty());
        assert_eq!(choreography.final_point(), result.intermediate());
    }

    #[test]
    fn test_qvq_uses_four_phases_and_cleans_up_helpers() {
        let result = AlgebraMode::Real.compute(&params());
        let choreography =
            Choreography::build(AnimationKind::Qvq, &AnimationKind::Qvq.default_table(), &result)
                .expect("default table is valid");
        assert_eq!(choreography.timeline().len(), 4);
        assert_eq!(choreography.final_point(), result.final_point());
        assert_eq!(
            choreography.transient_roles(),
            &[Role::InverseMarker, Role::MovingCanonicalAxis, Role::MovingProjection]
        );
        // Every animated role is cast, and every track targets a cast role.
        let is_cast = |role: Role| choreography.cast().iter().any(|(cast, _)| *cast == role);
        for role in Role::ANIMATED {
            assert!(is_cast(role), "{role:?} not cast");
        }
        for phase in choreography.timeline().phases() {
            for track in &phase.tracks {
                assert!(is_cast(track.role()));
            }
        }
    }

    #[test]
    fn test_cast_starts_hidden() {
        let result = AlgebraMode::Pseudo.compute(&params());
        let choreography =
            Choreography::build(AnimationKind::Qvq, &AnimationKind::Qvq.default_table(), &result)
                .expect("default table is valid");
        assert!(choreography.cast().iter().all(|(_, d)| !d.visible));
    }

    #[test]
    fn test_wrong_table_is_rejected() {
        let result = AlgebraMode::Pseudo.compute(&params());
        let err = Choreography::build(AnimationKind::Qvq, &AnimationKind::Qv.default_table(), &result);
        assert!(matches!(err, Err(TimelineError::PhaseCountMismatch { .. })));

        let unordered = PhaseTable::new(3000.0, vec![0.7, 0.3]);
        let err = Choreography::build(AnimationKind::Qv, &unordered, &result);
        assert!(matches!(err, Err(TimelineError::EmptyPhase { index: 1, .. })));
    }
}
