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

//! Command-line arguments of the headless runner.

use std::path::PathBuf;

use clap::Parser;
use quatlab_sdk::prelude::*;
use quatlab_sdk::CONFIG_FILE_NAME;

#[derive(Parser, Debug)]
#[command(name = "quatlab")]
#[command(version)]
#[command(about = "Quatlab: Q·V·Q⁻¹ conjugation visualizer, headless", long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Rotation angle in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Rotation axis direction in the xy plane
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pub axis: Option<Vec<f64>>,

    /// Target point V in the xy plane
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pub target: Option<Vec<f64>>,

    /// Algebra to display: pseudo or real
    #[arg(short, long)]
    pub mode: Option<AlgebraMode>,

    /// Show the final result and the angle readouts
    #[arg(long)]
    pub show_final: bool,

    /// Play an animation: qv or qvq
    #[arg(short, long)]
    pub animate: Option<AnimationKind>,

    /// Pace the animation with the wall clock instead of simulating frames
    #[arg(long)]
    pub realtime: bool,

    /// Frame rate of the runner, in Hz
    #[arg(long)]
    pub refresh_hz: Option<f64>,

    /// Write the final scene and result as JSON ("-" for stdout)
    #[arg(long, value_name = "FILE")]
    pub dump_scene: Option<PathBuf>,
}

impl Cli {
    /// Writes every override given on the command line into `config`.
    pub fn apply(&self, config: &mut VisualizerConfig) {
        if let Some(angle) = self.angle {
            config.parameters.angle_degrees = angle;
        }
        if let Some(axis) = self.axis.as_deref().and_then(pair) {
            config.parameters.axis = axis;
        }
        if let Some(target) = self.target.as_deref().and_then(pair) {
            config.parameters.target = target;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.show_final {
            config.show_final_result = true;
        }
        if let Some(refresh_hz) = self.refresh_hz {
            config.refresh_hz = refresh_hz;
        }
    }
}

fn pair(values: &[f64]) -> Option<Vec2> {
    match *values {
        [x, y] => Some(Vec2::new(x, y)),
        _ => None,
    }
}
