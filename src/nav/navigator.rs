// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::{debug, warn};

use crate::model::{DiagramLevel, NodeId, ROOT_LABEL, UNNAMED_LABEL};
use crate::store::{codec, DocumentError};
use crate::surface::{MemorySurface, RenderSurface};

/// Back-button text used when the owner of the current level cannot be found.
pub const PARENT_FALLBACK_LABEL: &str = "Parent";

/// The level being edited plus the ancestors that lead to it, root first.
///
/// An empty stack means the current level is the root. For each adjacent pair the deeper level's
/// `parent_node` names a node of the shallower one.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    current: DiagramLevel,
    stack: Vec<DiagramLevel>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self { current: DiagramLevel::root(), stack: Vec::new() }
    }

    /// Builds a state from parts without checking the chain. Use the codec for untrusted input.
    pub fn from_parts(current: DiagramLevel, stack: Vec<DiagramLevel>) -> Self {
        Self { current, stack }
    }

    pub fn current(&self) -> &DiagramLevel {
        &self.current
    }

    pub fn stack(&self) -> &[DiagramLevel] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn into_parts(self) -> (DiagramLevel, Vec<DiagramLevel>) {
        (self.current, self.stack)
    }
}

/// One breadcrumb entry. Crumbs other than the last are navigation targets for their depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub depth: usize,
    pub is_current: bool,
}

/// Drives a single rendering surface through the level hierarchy.
#[derive(Debug)]
pub struct Navigator<S = MemorySurface> {
    state: NavigationState,
    surface: S,
    breadcrumb: Vec<Crumb>,
    back_target: Option<String>,
}

impl Default for Navigator<MemorySurface> {
    fn default() -> Self {
        Self::new(MemorySurface::new())
    }
}

impl<S: RenderSurface> Navigator<S> {
    pub fn new(surface: S) -> Self {
        Self::with_state(NavigationState::new(), surface)
    }

    pub fn with_state(state: NavigationState, surface: S) -> Self {
        let mut navigator =
            Self { state, surface, breadcrumb: Vec::new(), back_target: None };
        navigator.refresh();
        navigator
    }

    /// The navigation state as last captured. Call [`Self::capture_current_level`] first to see
    /// edits still pending on the surface.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current(&self) -> &DiagramLevel {
        &self.state.current
    }

    pub fn stack(&self) -> &[DiagramLevel] {
        &self.state.stack
    }

    pub fn depth(&self) -> usize {
        self.state.depth()
    }

    pub fn is_at_root(&self) -> bool {
        self.state.stack.is_empty()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Copies the surface's live items into the current level.
    pub fn capture_current_level(&mut self) {
        let items = self.surface.items();
        self.state.current.set_items(items.nodes, items.edges);
    }

    /// Enters the sub-diagram owned by `node_id`, creating it empty on first entry.
    ///
    /// Returns `false` without changing anything when the node is not on the surface or is not a
    /// rectangle.
    pub fn descend_into(&mut self, node_id: &NodeId) -> bool {
        let Some(node) = self.surface.find_node(node_id) else {
            debug!(node_id = %node_id, "descend ignored: node not on surface");
            return false;
        };
        if !node.kind().can_own_subgraph() {
            debug!(node_id = %node_id, kind = %node.kind(), "descend ignored: leaf node");
            return false;
        }

        self.capture_current_level();
        let mut parent = self.state.current.clone();
        let Some(owner) = parent.node_mut(node_id) else {
            return false;
        };
        let child = match owner.ensure_sub_graph() {
            Ok(level) => level.clone(),
            Err(err) => {
                debug!(error = %err, "descend ignored");
                return false;
            }
        };

        self.state.stack.push(parent);
        self.state.current = child;
        debug!(node_id = %node_id, depth = self.depth(), "descended");
        self.refresh();
        true
    }

    /// Pops back up until `depth() == target`, writing each level left behind into its owner.
    ///
    /// Targets deeper than the current depth are ignored. Returns whether any level was left.
    pub fn navigate_to_level(&mut self, target: usize) -> bool {
        let depth = self.depth();
        if target > depth {
            debug!(target, depth, "navigate ignored: target below current level");
            return false;
        }

        self.capture_current_level();
        while self.state.stack.len() > target {
            let Some(mut parent) = self.state.stack.pop() else {
                break;
            };
            let left = std::mem::replace(&mut self.state.current, DiagramLevel::root());
            write_back(&mut parent, left);
            self.state.current = parent;
        }

        if target < depth {
            debug!(from = depth, to = target, "ascended");
        }
        self.refresh();
        target < depth
    }

    /// Ascends one level. No-op at the root.
    pub fn go_back(&mut self) -> bool {
        match self.depth().checked_sub(1) {
            Some(target) => self.navigate_to_level(target),
            None => false,
        }
    }

    pub fn breadcrumb(&self) -> &[Crumb] {
        &self.breadcrumb
    }

    /// Label of the level "back" leads to, or `None` at the root.
    pub fn back_target(&self) -> Option<&str> {
        self.back_target.as_deref()
    }

    /// Swaps in a whole new state and rebinds the surface.
    pub fn replace_state(&mut self, state: NavigationState) {
        self.state = state;
        self.refresh();
    }

    /// Rebinds the surface to the current level and recomputes the derived labels.
    pub fn refresh(&mut self) {
        self.surface.bind(&self.state.current);
        self.breadcrumb = compute_breadcrumb(&self.state);
        self.back_target = compute_back_target(&self.state);
    }

    /// Captures the surface and encodes the whole state as a pretty-printed JSON document.
    pub fn serialize(&mut self) -> Result<String, DocumentError> {
        self.capture_current_level();
        codec::encode_state(&self.state)
    }

    /// Decodes `text` and replaces the state with it. On error the state is left untouched.
    pub fn deserialize(&mut self, text: &str) -> Result<(), DocumentError> {
        let state = codec::decode_state(text)?;
        self.replace_state(state);
        Ok(())
    }
}

fn write_back(parent: &mut DiagramLevel, left: DiagramLevel) {
    let Some(owner_id) = left.parent_node().cloned() else {
        warn!(level = %left.id(), "level without owner dropped while ascending");
        return;
    };
    let Some(owner) = parent.node_mut(&owner_id) else {
        warn!(owner = %owner_id, "owner missing while ascending; sub-diagram dropped");
        return;
    };
    if let Err(err) = owner.set_sub_graph(left) {
        warn!(error = %err, "sub-diagram dropped while ascending");
    }
}

fn owner_label(state: &NavigationState, depth: usize) -> Option<&str> {
    let level = if depth == state.stack.len() { &state.current } else { state.stack.get(depth)? };
    let owner_id = level.parent_node()?;
    let parent = state.stack.get(depth.checked_sub(1)?)?;
    parent.node(owner_id).map(|node| node.display_label())
}

fn compute_breadcrumb(state: &NavigationState) -> Vec<Crumb> {
    let depth = state.depth();
    let mut crumbs = vec![Crumb { label: ROOT_LABEL.to_owned(), depth: 0, is_current: depth == 0 }];
    for level in 1..=depth {
        let label = owner_label(state, level).unwrap_or(UNNAMED_LABEL);
        crumbs.push(Crumb { label: label.to_owned(), depth: level, is_current: level == depth });
    }
    crumbs
}

fn compute_back_target(state: &NavigationState) -> Option<String> {
    if state.stack.is_empty() {
        return None;
    }
    let label = owner_label(state, state.depth()).unwrap_or(PARENT_FALLBACK_LABEL);
    Some(label.to_owned())
}
