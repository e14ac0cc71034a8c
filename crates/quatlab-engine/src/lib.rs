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

//! # Quatlab Engine
//!
//! The two conjugation models compared by the visualizer, the common view
//! over their results, and the angle calculator.
//!
//! Every function here is pure: results are derived fresh from a
//! [`Parameters`](quatlab_core::Parameters) record and degenerate inputs fall
//! back to neutral values instead of failing.

#![warn(missing_docs)]

pub mod angles;
pub mod diagnostics;
pub mod pseudo;
pub mod real;
pub mod result;

pub use angles::{angle_between, AngleReadout, AngleReport};
pub use pseudo::PseudoResult;
pub use real::RealResult;
pub use result::{AlgebraMode, ConjugationResult, ConjugationView};
