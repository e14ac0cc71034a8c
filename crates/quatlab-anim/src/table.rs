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

//! Durations and phase boundaries of the two animations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::timeline::{check_partition, TimelineError};

/// The animations the visualizer can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    /// The partial product `Q·V`.
    Qv,
    /// The full conjugation `Q·V·Q⁻¹`.
    Qvq,
}

impl AnimationKind {
    /// Number of phases the choreography of this animation defines.
    pub fn phase_count(self) -> usize {
        match self {
            AnimationKind::Qv => 3,
            AnimationKind::Qvq => 4,
        }
    }

    /// The stock phase table of this animation.
    pub fn default_table(self) -> PhaseTable {
        match self {
            AnimationKind::Qv => PhaseTable::new(3000.0, vec![0.33, 0.67]),
            AnimationKind::Qvq => PhaseTable::new(6000.0, vec![0.25, 0.5, 0.75]),
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationKind::Qv => write!(f, "QV"),
            AnimationKind::Qvq => write!(f, "QVQ⁻¹"),
        }
    }
}

impl FromStr for AnimationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "qv" => Ok(AnimationKind::Qv),
            "qvq" => Ok(AnimationKind::Qvq),
            other => Err(format!("unknown animation '{other}', expected 'qv' or 'qvq'")),
        }
    }
}

/// Duration and inner boundaries of one animation.
///
/// `boundaries` lists the normalized instants separating consecutive phases,
/// so a table with `n` boundaries describes `n + 1` phases spanning `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTable {
    /// Total duration in milliseconds.
    pub duration_ms: f64,
    /// Strictly increasing instants in `(0, 1)`.
    pub boundaries: Vec<f64>,
}

impl PhaseTable {
    /// Creates a table.
    pub fn new(duration_ms: f64, boundaries: Vec<f64>) -> Self {
        Self {
            duration_ms,
            boundaries,
        }
    }

    /// Number of phases described.
    pub fn phase_count(&self) -> usize {
        self.boundaries.len() + 1
    }

    /// The `[start, end)` span of every phase, in order.
    pub fn spans(&self) -> Vec<(f64, f64)> {
        let mut edges = Vec::with_capacity(self.boundaries.len() + 2);
        edges.push(0.0);
        edges.extend_from_slice(&self.boundaries);
        edges.push(1.0);
        edges.windows(2).map(|w| (w[0], w[1])).collect()
    }

    /// Checks the duration, that the table fits the phases of `kind`, and that
    /// its boundaries partition `[0, 1]`.
    pub fn validate(&self, kind: AnimationKind) -> Result<(), TimelineError> {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(TimelineError::NonPositiveDuration(self.duration_ms));
        }
        if self.phase_count() != kind.phase_count() {
            return Err(TimelineError::PhaseCountMismatch {
                kind: kind.to_string(),
                expected: kind.phase_count(),
                got: self.phase_count(),
            });
        }
        check_partition(&self.spans())
    }
}

/// One phase table per animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTables {
    /// Table of the `Q·V` animation.
    pub qv: PhaseTable,
    /// Table of the `Q·V·Q⁻¹` animation.
    pub qvq: PhaseTable,
}

impl PhaseTables {
    /// The table for `kind`.
    pub fn get(&self, kind: AnimationKind) -> &PhaseTable {
        match kind {
            AnimationKind::Qv => &self.qv,
            AnimationKind::Qvq => &self.qvq,
        }
    }
}

impl Default for PhaseTables {
    fn default() -> Self {
        Self {
            qv: AnimationKind::Qv.default_table(),
            qvq: AnimationKind::Qvq.default_table(),
        }
    }
}
