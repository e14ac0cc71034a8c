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

//! Time sources and frame scheduling.
//!
//! The animation code never reads the system time directly; it asks a
//! [`Clock`]. Production code uses [`SystemClock`], tests and the simulated
//! runner use [`ManualClock`] so that every tick is reproducible.

use std::cell::Cell;
use std::time::Instant;

/// A monotonic source of time, in milliseconds.
pub trait Clock {
    /// Returns the current time in milliseconds. Successive calls never decrease
    /// for a well-behaved clock.
    fn now_ms(&self) -> f64;
}

/// The "run on next display refresh" primitive.
///
/// The controller calls [`FrameScheduler::request_frame`] at the end of each
/// frame to keep the cooperative loop alive.
pub trait FrameScheduler {
    /// Requests that the frame callback runs again on the next refresh.
    fn request_frame(&mut self);
}

/// A [`Clock`] reading milliseconds since its creation off [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A [`Clock`] that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Creates a manual clock reading `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Moves the clock forward by `delta_ms`. Negative deltas are allowed, which
    /// lets tests simulate a misbehaving time source.
    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }

    /// Sets the clock to an absolute reading.
    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// A [`FrameScheduler`] that only counts requests. Used by headless runners.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingScheduler {
    /// The number of frames requested so far.
    pub requested: u64,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requested += 1;
    }
}
