// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::edge::EdgeRecord;
use super::ids::{EdgeId, LevelId, NodeId};
use super::node::{NodeRecord, UNNAMED_LABEL};

pub const ROOT_LABEL: &str = "Root";

/// One diagram in the hierarchy: the nodes and edges shown together on the surface.
///
/// Node order is z-order only. Nested levels are owned by the node they belong to (see
/// [`NodeRecord::sub_graph`]); `parent_node` is the back-reference to that owner and is `None`
/// only for the root level.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLevel {
    id: LevelId,
    label: Option<String>,
    parent_node: Option<NodeId>,
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
    extra: BTreeMap<String, serde_json::Value>,
}

impl DiagramLevel {
    pub fn new(id: LevelId, label: Option<String>) -> Self {
        Self {
            id,
            label,
            parent_node: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(LevelId::root(), Some(ROOT_LABEL.to_owned()))
    }

    pub fn id(&self) -> &LevelId {
        &self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    pub fn display_label(&self) -> &str {
        match (self.label.as_deref(), self.parent_node.is_none()) {
            (Some(label), _) if !label.is_empty() => label,
            (_, true) => ROOT_LABEL,
            (_, false) => UNNAMED_LABEL,
        }
    }

    pub fn parent_node(&self) -> Option<&NodeId> {
        self.parent_node.as_ref()
    }

    pub fn set_parent_node(&mut self, parent_node: Option<NodeId>) {
        self.parent_node = parent_node;
    }

    pub fn is_root(&self) -> bool {
        self.parent_node.is_none()
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<NodeRecord> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut Vec<EdgeRecord> {
        &mut self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Overwrites the node and edge collections, keeping id, label and owner link.
    pub fn set_items(&mut self, nodes: Vec<NodeRecord>, edges: Vec<EdgeRecord>) {
        self.nodes = nodes;
        self.edges = edges;
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&NodeRecord> {
        self.nodes.iter().find(|node| node.id() == node_id)
    }

    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut NodeRecord> {
        self.nodes.iter_mut().find(|node| node.id() == node_id)
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node(node_id).is_some()
    }

    pub fn edge(&self, edge_id: &EdgeId) -> Option<&EdgeRecord> {
        self.edges.iter().find(|edge| edge.id() == edge_id)
    }

    /// Level attributes this crate does not interpret, kept so documents round-trip.
    pub fn extra(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut BTreeMap<String, serde_json::Value> {
        &mut self.extra
    }

    /// First node whose display label equals `label`.
    pub fn node_by_label(&self, label: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|node| node.display_label() == label)
    }
}
