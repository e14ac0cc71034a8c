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

//! Headless Quatlab runner.
//!
//! Loads `Quatlab.toml`, applies command-line overrides, prints the angle
//! readouts, optionally plays one animation frame by frame, and can dump the
//! resulting scene as JSON.

mod cli;

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use quatlab_sdk::prelude::*;
use serde::Serialize;

use crate::cli::Cli;

/// Upper bound on simulated frames, far above any sane duration at any sane rate.
const MAX_FRAMES: u64 = 10_000_000;

/// What `--dump-scene` writes.
#[derive(Serialize)]
struct SceneDump<'a> {
    parameters: Parameters,
    mode: AlgebraMode,
    show_final_result: bool,
    readout: &'a AngleReadout,
    result: &'a ConjugationResult,
    scene: &'a SceneGraph,
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = VisualizerConfig::load(&cli.config)
        .with_context(|| format!("Failed to load '{}'", cli.config.display()))?;
    cli.apply(&mut config);
    config
        .validate()
        .context("Invalid configuration after command-line overrides")?;

    let frame_ms = config.frame_interval_ms();
    let mut visualizer = Visualizer::new(config);
    print_summary(&visualizer);

    if let Some(kind) = cli.animate {
        visualizer.publish(ControlEvent::Animate(kind));
        let run = if cli.realtime {
            let clock = SystemClock::new();
            run_animation(&mut visualizer, &clock, || {
                thread::sleep(Duration::from_secs_f64(frame_ms / 1000.0));
            })?
        } else {
            let clock = ManualClock::new(0.0);
            run_animation(&mut visualizer, &clock, || clock.advance(frame_ms))?
        };
        log::info!(
            "{kind} animation finished after {} frames, {} of them redrawn.",
            run.frames,
            run.redraws
        );
    }

    if let Some(path) = &cli.dump_scene {
        dump_scene(&visualizer, path)?;
    }

    Ok(())
}

fn print_summary(visualizer: &Visualizer) {
    let params = visualizer.params();
    println!(
        "θ = {}°, axis = ({}, {}), V = ({}, {}), {} algebra",
        params.angle_degrees,
        params.axis.x,
        params.axis.y,
        params.target.x,
        params.target.y,
        visualizer.mode()
    );
    let result = visualizer.result();
    println!("initial:      {:?}", result.initial());
    println!("intermediate: {:?}", result.intermediate());
    println!("final:        {:?}", result.final_point());
    println!("{}", visualizer.readout());

    let scene = visualizer.scene();
    let shown: Vec<String> = scene.visible().map(|(role, _)| format!("{role:?}")).collect();
    println!(
        "scene:        {} drawables, {} shown ({})",
        scene.len(),
        shown.len(),
        shown.join(", ")
    );
}

/// Frame counts of one animation run.
struct RunStats {
    frames: u64,
    /// Frames after which the scene revision moved, i.e. a renderer would redraw.
    redraws: u64,
}

/// Runs frames until the animation completes, calling `pace` between frames.
fn run_animation(
    visualizer: &mut Visualizer,
    clock: &impl Clock,
    mut pace: impl FnMut(),
) -> Result<RunStats> {
    let mut scheduler = CountingScheduler::default();
    let mut revision = visualizer.scene().revision();
    let mut redraws = 0;
    while scheduler.requested < MAX_FRAMES {
        let outcome = visualizer.frame(clock, &mut scheduler);
        if visualizer.scene().revision() != revision {
            revision = visualizer.scene().revision();
            redraws += 1;
        }
        match outcome {
            TickOutcome::Completed => {
                return Ok(RunStats {
                    frames: scheduler.requested,
                    redraws,
                })
            }
            TickOutcome::Idle => bail!("the animation did not start"),
            TickOutcome::Running { .. } => pace(),
        }
    }
    bail!("the animation did not complete within {MAX_FRAMES} frames")
}

fn dump_scene(visualizer: &Visualizer, path: &Path) -> Result<()> {
    let dump = SceneDump {
        parameters: visualizer.parameters(),
        mode: visualizer.mode(),
        show_final_result: visualizer.shows_final_result(),
        readout: visualizer.readout(),
        result: visualizer.result(),
        scene: visualizer.scene(),
    };
    let json = serde_json::to_string_pretty(&dump).context("Failed to serialize the scene")?;

    if path == Path::new("-") {
        println!("{json}");
    } else {
        fs::write(path, json)
            .with_context(|| format!("Failed to write scene dump to '{}'", path.display()))?;
        log::info!("Scene written to '{}'.", path.display());
    }
    Ok(())
}
