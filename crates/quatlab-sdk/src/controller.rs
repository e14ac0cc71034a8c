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

//! The visualizer controller.
//!
//! [`Visualizer`] owns the parameters, the scene graph and the sequencer. A
//! host drives it with one [`Visualizer::frame`] call per display refresh;
//! user actions arrive as [`ControlEvent`]s on its event bus and are applied
//! at the start of the next frame, in the order they were sent.

use quatlab_anim::{
    AnimationKind, Choreography, PhaseTables, Sequencer, SequencerState, TickOutcome,
};
use quatlab_core::event::EventBus;
use quatlab_core::math::{LinearRgba, Quaternion, Vec3};
use quatlab_core::platform::{Clock, FrameScheduler};
use quatlab_core::scene::{Drawable, DrawableSink, Role, Shape};
use quatlab_core::{ParameterSource, Parameters};
use quatlab_engine::diagnostics;
use quatlab_engine::{AlgebraMode, AngleReadout, AngleReport, ConjugationResult, ConjugationView};

use crate::config::VisualizerConfig;
use crate::event::ControlEvent;
use crate::scene_graph::{SceneGraph, ScenePass};

const AXIS_HALF_LENGTH: f64 = 3.0;
const TARGET_RADIUS: f64 = 0.15;
const ELEMENT_RADIUS: f64 = 0.12;
const FINAL_RADIUS: f64 = 0.15;
const PROJECTION_RADIUS: f64 = 0.1;
const PROJECTION_ALPHA: f32 = 0.7;

/// The interactive conjugation visualizer, minus the window.
#[derive(Debug)]
pub struct Visualizer {
    params: Parameters,
    mode: AlgebraMode,
    show_final_result: bool,
    tables: PhaseTables,
    result: ConjugationResult,
    readout: AngleReadout,
    scene: SceneGraph,
    sequencer: Sequencer,
    bus: EventBus<ControlEvent>,
}

impl Visualizer {
    /// Creates a visualizer and builds its initial scene.
    pub fn new(config: VisualizerConfig) -> Self {
        let VisualizerConfig {
            parameters,
            mode,
            show_final_result,
            animations,
            ..
        } = config;

        let mut visualizer = Self {
            params: parameters,
            mode,
            show_final_result,
            tables: animations,
            result: mode.compute(&parameters),
            readout: AngleReadout::placeholder(),
            scene: SceneGraph::new(),
            sequencer: Sequencer::new(),
            bus: EventBus::new(),
        };
        visualizer.recompute();
        log::info!(
            "Visualizer initialized: {} algebra, {} drawables.",
            visualizer.mode,
            visualizer.scene.len()
        );
        visualizer
    }

    /// A handle user interfaces publish events through.
    pub fn event_sender(&self) -> flume::Sender<ControlEvent> {
        self.bus.sender()
    }

    /// Queues an event for the next frame.
    pub fn publish(&self, event: ControlEvent) {
        self.bus.publish(event);
    }

    /// Applies one event immediately.
    pub fn handle(&mut self, event: ControlEvent, now_ms: f64) {
        log::debug!("Handling {event:?}");
        match event {
            ControlEvent::SetAngle(degrees) => self.params.angle_degrees = degrees,
            ControlEvent::SetAxis(axis) => self.params.axis = axis,
            ControlEvent::SetTarget(target) => self.params.target = target,
            ControlEvent::SetMode(mode) => self.mode = mode,
            ControlEvent::ShowFinalResult(show) => self.show_final_result = show,
            ControlEvent::Reset => self.params = Parameters::default(),
            ControlEvent::Animate(kind) => {
                self.start_animation(kind, now_ms);
                return;
            }
        }
        self.recompute();
    }

    /// Applies every queued event, in order. Returns how many were applied.
    pub fn pump_events(&mut self, now_ms: f64) -> usize {
        let events = self.bus.drain();
        let count = events.len();
        for event in events {
            self.handle(event, now_ms);
        }
        count
    }

    /// Runs one frame: applies queued events, advances any animation, and
    /// requests the next frame.
    pub fn frame(
        &mut self,
        clock: &impl Clock,
        scheduler: &mut impl FrameScheduler,
    ) -> TickOutcome {
        let now_ms = clock.now_ms();
        self.pump_events(now_ms);
        let outcome = self.sequencer.tick(now_ms, &mut self.scene);
        scheduler.request_frame();
        outcome
    }

    /// Recomputes the result and replaces the static scene in one pass.
    ///
    /// While no animation runs, the pass also clears whatever the last run
    /// left behind.
    pub fn recompute(&mut self) {
        self.result = self.mode.compute(&self.params);
        self.readout = if self.show_final_result {
            AngleReadout::new(Some(&AngleReport::from_view(&self.result)))
        } else {
            AngleReadout::placeholder()
        };

        let mut pass = if self.sequencer.is_running() {
            ScenePass::new(Role::STATIC)
        } else {
            ScenePass::new(Role::STATIC.into_iter().chain(Role::ANIMATED))
        };
        compose_static(&mut pass, &self.params, &self.result, self.show_final_result);
        self.scene.apply_pass(pass);

        log::debug!(
            "Recomputed {} result for {:?}: final point {:?}.",
            self.mode,
            self.params,
            self.result.final_point()
        );
    }

    /// Starts `kind` from the current result. Returns `false` if an animation
    /// is already running or the phase table is invalid.
    pub fn start_animation(&mut self, kind: AnimationKind, now_ms: f64) -> bool {
        if self.sequencer.is_running() {
            log::warn!("Ignoring {kind} animation request: an animation is already running.");
            return false;
        }

        let choreography = match Choreography::build(kind, self.tables.get(kind), &self.result) {
            Ok(choreography) => choreography,
            Err(e) => {
                log::error!("Cannot play the {kind} animation: {e}");
                return false;
            }
        };

        for check in diagnostics::verify(&self.result) {
            log::debug!("{check}");
        }

        // Leftovers of the previous run.
        for role in Role::ANIMATED {
            self.scene.remove(role);
        }
        self.sequencer.start(choreography, now_ms, &mut self.scene)
    }

    /// The current parameters.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// The displayed algebra.
    pub fn mode(&self) -> AlgebraMode {
        self.mode
    }

    /// Whether the final result and angle readouts are shown.
    pub fn shows_final_result(&self) -> bool {
        self.show_final_result
    }

    /// The result of the last recompute.
    pub fn result(&self) -> &ConjugationResult {
        &self.result
    }

    /// The formatted angle readouts.
    pub fn readout(&self) -> &AngleReadout {
        &self.readout
    }

    /// The scene graph.
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The animation state.
    pub fn animation_state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Whether an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.sequencer.is_running()
    }
}

impl ParameterSource for Visualizer {
    fn parameters(&self) -> Parameters {
        self.params
    }
}

fn compose_static(
    pass: &mut ScenePass,
    params: &Parameters,
    result: &ConjugationResult,
    show_final_result: bool,
) {
    pass.put(
        Role::CanonicalAxis,
        Drawable::new(Shape::Arrow { length: 1.0 }, LinearRgba::GREEN),
    );

    if !params.axis.is_zero() {
        let direction = params.axis.normalize().extend(0.0);
        pass.put(
            Role::RotationAxis,
            Drawable::new(
                Shape::AxisLine {
                    half_length: AXIS_HALF_LENGTH,
                },
                LinearRgba::MAGENTA,
            )
            .oriented(Quaternion::from_rotation_arc(Vec3::Z, direction)),
        );
    }

    pass.put(
        Role::Target,
        marker(params.target.extend(0.0), TARGET_RADIUS, LinearRgba::YELLOW),
    )
    .put(
        Role::RotationElement,
        marker(result.rotation_element(), ELEMENT_RADIUS, LinearRgba::CYAN),
    )
    .put(
        Role::InverseElement,
        marker(result.reference(), ELEMENT_RADIUS, LinearRgba::PINK),
    );

    if show_final_result {
        pass.put(
            Role::IntermediateProjection,
            Drawable::new(
                Shape::Projection {
                    radius: PROJECTION_RADIUS,
                },
                LinearRgba::ORANGE.with_alpha(PROJECTION_ALPHA),
            )
            .at(result.intermediate().flatten()),
        )
        .put(
            Role::FinalResult,
            marker(result.final_point(), FINAL_RADIUS, LinearRgba::GREEN),
        );
    }
}

fn marker(position: Vec3, radius: f64, color: LinearRgba) -> Drawable {
    Drawable::new(Shape::Vector { radius }, color).at(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quatlab_core::math::Vec2;

    #[test]
    fn test_initial_scene_hides_final_result() {
        let visualizer = Visualizer::new(VisualizerConfig::default());
        let scene = visualizer.scene();
        for role in [
            Role::CanonicalAxis,
            Role::RotationAxis,
            Role::Target,
            Role::RotationElement,
            Role::InverseElement,
        ] {
            assert!(scene.contains(role), "{role:?} missing");
        }
        assert!(!scene.contains(Role::FinalResult));
        assert!(!scene.contains(Role::IntermediateProjection));
        assert_eq!(visualizer.readout(), &AngleReadout::placeholder());
    }

    #[test]
    fn test_zero_axis_omits_the_axis_line() {
        let mut visualizer = Visualizer::new(VisualizerConfig::default());
        visualizer.handle(ControlEvent::SetAxis(Vec2::ZERO), 0.0);
        assert!(!visualizer.scene().contains(Role::RotationAxis));
        assert!(visualizer.scene().contains(Role::RotationElement));
    }

    #[test]
    fn test_axis_line_follows_the_axis() {
        let mut visualizer = Visualizer::new(VisualizerConfig::default());
        visualizer.handle(ControlEvent::SetAxis(Vec2::new(0.0, 2.0)), 0.0);
        let line = visualizer
            .scene()
            .get(Role::RotationAxis)
            .expect("axis line present");
        assert_relative_eq!(line.orientation.rotate_vec3(Vec3::Z), Vec3::Y, epsilon = 1e-12);
        assert_eq!(line.color, LinearRgba::MAGENTA);
    }

    #[test]
    fn test_show_final_result_adds_drawables_and_readouts() {
        let mut visualizer = Visualizer::new(VisualizerConfig::default());
        visualizer.handle(ControlEvent::ShowFinalResult(true), 0.0);
        let final_marker = visualizer
            .scene()
            .get(Role::FinalResult)
            .expect("final result shown");
        assert_relative_eq!(
            final_marker.position,
            visualizer.result().final_point(),
            epsilon = 1e-12
        );
        let projection = visualizer
            .scene()
            .get(Role::IntermediateProjection)
            .expect("projection shown");
        assert_eq!(projection.position.z, 0.0);
        assert_ne!(visualizer.readout(), &AngleReadout::placeholder());

        visualizer.handle(ControlEvent::ShowFinalResult(false), 0.0);
        assert!(!visualizer.scene().contains(Role::FinalResult));
        assert_eq!(visualizer.readout(), &AngleReadout::placeholder());
    }

    #[test]
    fn test_mode_switch_recomputes() {
        let mut visualizer = Visualizer::new(VisualizerConfig::default());
        visualizer.handle(ControlEvent::SetMode(AlgebraMode::Real), 0.0);
        assert_eq!(visualizer.result().mode(), AlgebraMode::Real);
        assert_eq!(visualizer.mode(), AlgebraMode::Real);
    }

    #[test]
    fn test_reset_restores_defaults_only() {
        let mut visualizer = Visualizer::new(VisualizerConfig::default());
        visualizer.handle(ControlEvent::SetAngle(45.0), 0.0);
        visualizer.handle(ControlEvent::SetTarget(Vec2::new(-1.0, 0.5)), 0.0);
        visualizer.handle(ControlEvent::ShowFinalResult(true), 0.0);
        visualizer.handle(ControlEvent::Reset, 0.0);
        assert_eq!(visualizer.parameters(), Parameters::default());
        assert!(visualizer.shows_final_result());
    }

    #[test]
    fn test_queued_events_apply_in_order() {
        let mut visualizer = Visualizer::new(VisualizerConfig::default());
        let sender = visualizer.event_sender();
        sender.send(ControlEvent::SetAngle(10.0)).expect("bus is open");
        sender.send(ControlEvent::SetAngle(20.0)).expect("bus is open");
        assert_eq!(visualizer.params().angle_degrees, 0.0);
        assert_eq!(visualizer.pump_events(0.0), 2);
        assert_eq!(visualizer.params().angle_degrees, 20.0);
    }
}
