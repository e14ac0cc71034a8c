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

//! A single view over the results of both algebras.

use std::fmt;
use std::str::FromStr;

use quatlab_core::math::{AffineTransform, Quaternion, Vec3};
use quatlab_core::Parameters;
use serde::{Deserialize, Serialize};

use crate::pseudo::{self, PseudoResult};
use crate::real::{self, RealResult};

/// The points and frames a conjugation result exposes for display and animation.
///
/// Both algebras implement it, so consumers (angle readouts, choreography)
/// never branch on which model produced the numbers.
pub trait ConjugationView {
    /// The point the operation starts from.
    fn initial(&self) -> Vec3;
    /// The result of `Q·V`.
    fn intermediate(&self) -> Vec3;
    /// The result of `Q·V·Q⁻¹`.
    fn final_point(&self) -> Vec3;
    /// The element the second step aims the canonical direction at.
    fn reference(&self) -> Vec3;
    /// The displayed rotation element.
    fn rotation_element(&self) -> Vec3;
    /// The frame reached at the end of the first step.
    fn first_frame(&self) -> AffineTransform;
    /// The frame reached at the end of the second step.
    fn second_frame(&self) -> AffineTransform;
}

impl ConjugationView for PseudoResult {
    fn initial(&self) -> Vec3 {
        self.embedding
    }

    fn intermediate(&self) -> Vec3 {
        self.intermediate
    }

    fn final_point(&self) -> Vec3 {
        self.final_point
    }

    fn reference(&self) -> Vec3 {
        self.inverse
    }

    fn rotation_element(&self) -> Vec3 {
        self.embedding
    }

    fn first_frame(&self) -> AffineTransform {
        self.first_transform
    }

    fn second_frame(&self) -> AffineTransform {
        self.second_transform
    }
}

impl ConjugationView for RealResult {
    fn initial(&self) -> Vec3 {
        self.target_projection()
    }

    fn intermediate(&self) -> Vec3 {
        self.partial_projection()
    }

    fn final_point(&self) -> Vec3 {
        self.result_projection()
    }

    fn reference(&self) -> Vec3 {
        self.inverse_projection()
    }

    fn rotation_element(&self) -> Vec3 {
        self.rotation_projection()
    }

    /// Left multiplication by Q alone turns V by half the angle.
    fn first_frame(&self) -> AffineTransform {
        let axis = self.rotation.vector();
        let half = axis.length().atan2(self.rotation.w);
        AffineTransform::from_rotation_scale(Quaternion::from_axis_angle(axis, half), 1.0)
    }

    /// The full sandwich turns V by the whole angle, which is what Q encodes
    /// as a rotation.
    fn second_frame(&self) -> AffineTransform {
        AffineTransform::from_rotation_scale(self.rotation, 1.0)
    }
}

/// Which algebra the visualizer displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgebraMode {
    /// The affine-transform model.
    #[default]
    Pseudo,
    /// Hamilton quaternions.
    Real,
}

impl AlgebraMode {
    /// Computes the result of this algebra for `params`.
    pub fn compute(self, params: &Parameters) -> ConjugationResult {
        match self {
            AlgebraMode::Pseudo => ConjugationResult::Pseudo(pseudo::composed_result(params)),
            AlgebraMode::Real => ConjugationResult::Real(real::composed_result(params)),
        }
    }
}

impl fmt::Display for AlgebraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgebraMode::Pseudo => write!(f, "pseudo"),
            AlgebraMode::Real => write!(f, "real"),
        }
    }
}

impl FromStr for AlgebraMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pseudo" => Ok(AlgebraMode::Pseudo),
            "real" => Ok(AlgebraMode::Real),
            other => Err(format!("unknown algebra mode '{other}'")),
        }
    }
}

/// The result bundle of either algebra.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ConjugationResult {
    /// Produced by the pseudo-quaternion engine.
    Pseudo(PseudoResult),
    /// Produced by the Hamilton engine.
    Real(RealResult),
}

impl ConjugationResult {
    /// The algebra that produced this result.
    pub fn mode(&self) -> AlgebraMode {
        match self {
            ConjugationResult::Pseudo(_) => AlgebraMode::Pseudo,
            ConjugationResult::Real(_) => AlgebraMode::Real,
        }
    }

    fn view(&self) -> &dyn ConjugationView {
        match self {
            ConjugationResult::Pseudo(r) => r,
            ConjugationResult::Real(r) => r,
        }
    }
}

impl ConjugationView for ConjugationResult {
    fn initial(&self) -> Vec3 {
        self.view().initial()
    }

    fn intermediate(&self) -> Vec3 {
        self.view().intermediate()
    }

    fn final_point(&self) -> Vec3 {
        self.view().final_point()
    }

    fn reference(&self) -> Vec3 {
        self.view().reference()
    }

    fn rotation_element(&self) -> Vec3 {
        self.view().rotation_element()
    }

    fn first_frame(&self) -> AffineTransform {
        self.view().first_frame()
    }

    fn second_frame(&self) -> AffineTransform {
        self.view().second_frame()
    }
}
