// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The rendering surface collaborator.
//!
//! A surface shows exactly one level at a time and is the source of truth for in-progress edits
//! until the navigation model captures it. Item additions, removals and updates are applied
//! through [`crate::ops::apply_ops`] and committed with [`RenderSurface::replace_items`].

use thiserror::Error;

use crate::model::{DiagramLevel, EdgeRecord, LevelId, NodeId, NodeRecord};

/// A snapshot of everything currently on a surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceItems {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl SurfaceItems {
    pub fn node(&self, node_id: &NodeId) -> Option<&NodeRecord> {
        self.nodes.iter().find(|node| node.id() == node_id)
    }

    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut NodeRecord> {
        self.nodes.iter_mut().find(|node| node.id() == node_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FocusError {
    #[error("node {node_id} is not on the surface")]
    NotOnSurface { node_id: NodeId },
}

pub trait RenderSurface {
    fn nodes(&self) -> &[NodeRecord];

    fn edges(&self) -> &[EdgeRecord];

    /// Rebinds the surface to `level`, discarding whatever it showed before.
    ///
    /// Binding is synchronous: when this returns the surface shows `level`.
    fn bind(&mut self, level: &DiagramLevel);

    /// Replaces the items of the currently bound level (an edit, not a level switch).
    fn replace_items(&mut self, items: SurfaceItems);

    fn selection(&self) -> Option<&NodeId>;

    fn set_selection(&mut self, node_id: Option<NodeId>);

    fn items(&self) -> SurfaceItems {
        SurfaceItems { nodes: self.nodes().to_vec(), edges: self.edges().to_vec() }
    }

    fn find_node(&self, node_id: &NodeId) -> Option<&NodeRecord> {
        self.nodes().iter().find(|node| node.id() == node_id)
    }

    /// Brings `node_id` into view and selects it.
    ///
    /// Surfaces without a viewport fall back to plain selection.
    fn focus(&mut self, node_id: &NodeId) -> Result<(), FocusError> {
        if self.find_node(node_id).is_none() {
            return Err(FocusError::NotOnSurface { node_id: node_id.clone() });
        }
        self.set_selection(Some(node_id.clone()));
        Ok(())
    }
}

/// A surface that keeps its items in memory. The terminal UI and the MCP server draw from it.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    bound_level: Option<LevelId>,
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
    selection: Option<NodeId>,
    focused: Option<NodeId>,
    binds: u64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound_level(&self) -> Option<&LevelId> {
        self.bound_level.as_ref()
    }

    /// Number of times the surface has been rebound.
    pub fn binds(&self) -> u64 {
        self.binds
    }

    /// The node most recently brought into view, if it is still on the surface.
    pub fn focused(&self) -> Option<&NodeId> {
        self.focused.as_ref()
    }
}

impl RenderSurface for MemorySurface {
    fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    fn bind(&mut self, level: &DiagramLevel) {
        self.bound_level = Some(level.id().clone());
        self.nodes = level.nodes().to_vec();
        self.edges = level.edges().to_vec();
        self.selection = None;
        self.focused = None;
        self.binds = self.binds.wrapping_add(1);
    }

    fn replace_items(&mut self, items: SurfaceItems) {
        self.nodes = items.nodes;
        self.edges = items.edges;
        let still_present = |id: &NodeId| self.nodes.iter().any(|node| node.id() == id);
        if self.selection.as_ref().is_some_and(|id| !still_present(id)) {
            self.selection = None;
        }
        if self.focused.as_ref().is_some_and(|id| !still_present(id)) {
            self.focused = None;
        }
    }

    fn selection(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    fn set_selection(&mut self, node_id: Option<NodeId>) {
        self.selection = node_id;
    }

    fn focus(&mut self, node_id: &NodeId) -> Result<(), FocusError> {
        if self.find_node(node_id).is_none() {
            return Err(FocusError::NotOnSurface { node_id: node_id.clone() });
        }
        self.selection = Some(node_id.clone());
        self.focused = Some(node_id.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FocusError, MemorySurface, RenderSurface, SurfaceItems};
    use crate::model::fixtures::{nid, rect};
    use crate::model::DiagramLevel;

    #[test]
    fn bind_copies_level_items_and_clears_selection() {
        let mut level = DiagramLevel::root();
        level.nodes_mut().push(rect("a", "A"));

        let mut surface = MemorySurface::new();
        surface.set_selection(Some(nid("zzz")));
        surface.bind(&level);

        assert_eq!(surface.bound_level().map(|id| id.as_str()), Some("root"));
        assert_eq!(surface.nodes().len(), 1);
        assert!(surface.selection().is_none());
        assert_eq!(surface.binds(), 1);
    }

    #[test]
    fn replace_items_drops_selection_of_removed_node() {
        let mut surface = MemorySurface::new();
        surface.replace_items(SurfaceItems { nodes: vec![rect("a", "A")], edges: Vec::new() });
        surface.focus(&nid("a")).expect("focus");
        assert_eq!(surface.focused(), Some(&nid("a")));

        surface.replace_items(SurfaceItems::default());
        assert!(surface.selection().is_none());
        assert!(surface.focused().is_none());
    }

    #[test]
    fn focus_rejects_nodes_not_on_surface() {
        let mut surface = MemorySurface::new();
        assert_eq!(
            surface.focus(&nid("ghost")),
            Err(FocusError::NotOnSurface { node_id: nid("ghost") })
        );
    }
}
