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

/// Multi-producer queue of control events, drained by its owner once per frame.
///
/// Generic over the event type so this crate does not need to know the
/// controller's vocabulary.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    tx: flume::Sender<T>,
    rx: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// An empty, unbounded bus.
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self { tx, rx }
    }

    /// Queues `event`. The bus owns its receiver, so this only fails if the
    /// bus is being torn down; that case is logged and the event is lost.
    pub fn publish(&self, event: T) {
        if self.tx.send(event).is_err() {
            log::warn!("Dropped an event published to a closed bus.");
        }
    }

    /// A sender for another thread or input source.
    pub fn sender(&self) -> flume::Sender<T> {
        self.tx.clone()
    }

    /// Everything queued so far, oldest first. Never blocks.
    pub fn drain(&self) -> Vec<T> {
        let events: Vec<T> = self.rx.try_iter().collect();
        if !events.is_empty() {
            log::trace!("Drained {} event(s).", events.len());
        }
        events
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
