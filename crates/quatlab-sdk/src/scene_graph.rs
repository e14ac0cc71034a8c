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

//! The controller-owned scene graph, keyed by logical role.

use std::collections::BTreeMap;

use quatlab_core::scene::{Drawable, DrawableSink, Role};
use serde::Serialize;

/// Every drawable currently in the scene.
///
/// The revision counter increases only when the contents change, so a
/// renderer can skip frames where it did not move.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneGraph {
    revision: u64,
    drawables: BTreeMap<Role, Drawable>,
}

impl SceneGraph {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Content-change counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of drawables in the scene.
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Returns `true` if the scene holds no drawable.
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Whether a drawable exists for `role`.
    pub fn contains(&self, role: Role) -> bool {
        self.drawables.contains_key(&role)
    }

    /// All drawables, in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &Drawable)> {
        self.drawables.iter().map(|(role, drawable)| (*role, drawable))
    }

    /// Only the drawables currently shown.
    pub fn visible(&self) -> impl Iterator<Item = (Role, &Drawable)> {
        self.iter().filter(|(_, drawable)| drawable.visible)
    }

    /// Applies a recompute pass as one mutation.
    ///
    /// Every role the pass manages ends up holding exactly what the pass
    /// provides for it, or nothing. Roles outside the pass are untouched.
    /// The revision moves at most once, and not at all if the pass only
    /// restated what the scene already held.
    pub fn apply_pass(&mut self, pass: ScenePass) {
        let ScenePass { managed, drawables } = pass;
        let mut changed = false;
        for role in &managed {
            if !drawables.iter().any(|(r, _)| r == role) {
                changed |= self.drawables.remove(role).is_some();
            }
        }
        for (role, drawable) in drawables {
            changed |= self.drawables.insert(role, drawable) != Some(drawable);
        }
        if changed {
            self.revision += 1;
            log::trace!("Scene pass applied, revision {}.", self.revision);
        }
    }
}

impl DrawableSink for SceneGraph {
    fn add(&mut self, role: Role, drawable: Drawable) {
        if self.drawables.insert(role, drawable) != Some(drawable) {
            self.revision += 1;
            log::trace!("Scene add {role:?}");
        }
    }

    fn replace(&mut self, role: Role, drawable: Drawable) -> bool {
        match self.drawables.get_mut(&role) {
            Some(slot) => {
                if *slot != drawable {
                    *slot = drawable;
                    self.revision += 1;
                }
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, role: Role) -> Option<Drawable> {
        let removed = self.drawables.remove(&role);
        if removed.is_some() {
            self.revision += 1;
            log::trace!("Scene remove {role:?}");
        }
        removed
    }

    fn get(&self, role: Role) -> Option<&Drawable> {
        self.drawables.get(&role)
    }
}

/// A batch of scene changes built by one recompute pass.
#[derive(Debug, Clone, Default)]
pub struct ScenePass {
    managed: Vec<Role>,
    drawables: Vec<(Role, Drawable)>,
}

impl ScenePass {
    /// Starts a pass that owns `managed`. Roles it does not provide are removed.
    pub fn new(managed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            managed: managed.into_iter().collect(),
            drawables: Vec::new(),
        }
    }

    /// Provides the drawable of `role`. The role is managed by the pass from now on.
    pub fn put(&mut self, role: Role, drawable: Drawable) -> &mut Self {
        if !self.managed.contains(&role) {
            self.managed.push(role);
        }
        self.drawables.retain(|(r, _)| *r != role);
        self.drawables.push((role, drawable));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quatlab_core::math::{LinearRgba, Vec3};

    fn point(x: f64) -> Drawable {
        Drawable::point(Vec3::new(x, 0.0, 0.0), LinearRgba::YELLOW)
    }

    #[test]
    fn test_pass_replaces_and_removes_managed_roles_only() {
        let mut scene = SceneGraph::new();
        scene.add(Role::Target, point(1.0));
        scene.add(Role::FinalResult, point(2.0));
        scene.add(Role::FirstFrame, point(3.0));

        let mut pass = ScenePass::new([Role::Target, Role::FinalResult]);
        pass.put(Role::Target, point(5.0));
        scene.apply_pass(pass);

        assert_eq!(scene.get(Role::Target).map(|d| d.position.x), Some(5.0));
        assert!(!scene.contains(Role::FinalResult));
        assert!(scene.contains(Role::FirstFrame));
    }

    #[test]
    fn test_put_keeps_the_latest_drawable() {
        let mut pass = ScenePass::default();
        pass.put(Role::Target, point(1.0)).put(Role::Target, point(2.0));
        let mut scene = SceneGraph::new();
        scene.apply_pass(pass);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(Role::Target).map(|d| d.position.x), Some(2.0));
    }

    #[test]
    fn test_unchanged_pass_keeps_the_revision() {
        let build = || {
            let mut pass = ScenePass::new([Role::Target, Role::FinalResult]);
            pass.put(Role::Target, point(1.0));
            pass
        };
        let mut scene = SceneGraph::new();
        scene.apply_pass(build());
        assert_eq!(scene.revision(), 1);

        scene.apply_pass(build());
        assert_eq!(scene.revision(), 1);

        let mut moved = build();
        moved.put(Role::Target, point(1.5));
        scene.apply_pass(moved);
        assert_eq!(scene.revision(), 2);

        scene.apply_pass(ScenePass::new([Role::Target]));
        assert_eq!(scene.revision(), 3);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_revision_tracks_mutations() {
        let mut scene = SceneGraph::new();
        scene.add(Role::Target, point(1.0));
        assert_eq!(scene.revision(), 1);
        scene.add(Role::Target, point(1.0));
        assert_eq!(scene.revision(), 1);
        assert!(scene.replace(Role::Target, point(1.0)));
        assert_eq!(scene.revision(), 1);
        assert!(scene.replace(Role::Target, point(2.0)));
        assert_eq!(scene.revision(), 2);
        assert!(!scene.replace(Role::FinalResult, point(2.0)));
        assert!(scene.remove(Role::FinalResult).is_none());
        assert_eq!(scene.revision(), 2);
    }

    #[test]
    fn test_visible_filters_hidden_drawables() {
        let mut scene = SceneGraph::new();
        scene.add(Role::Target, point(1.0));
        scene.add(Role::FirstFrame, point(1.0).shown(false));
        let visible: Vec<Role> = scene.visible().map(|(role, _)| role).collect();
        assert_eq!(visible, vec![Role::Target]);
    }

    #[test]
    fn test_dumps_as_json_keyed_by_role() {
        let mut scene = SceneGraph::new();
        scene.add(Role::Target, point(1.0));
        let json = serde_json::to_string_pretty(&scene).expect("scene serializes");
        assert!(json.contains("\"Target\""));
        assert!(json.contains("\"revision\": 1"));
    }
}
