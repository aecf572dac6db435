// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editing operations for the level shown on a surface.
//!
//! A batch of ops is applied to a copy of the surface items and committed only if every op
//! succeeds. The result carries a coarse delta of the items that changed.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::model::{EdgeId, EdgeRecord, NodeId, NodeRecord, Point, Size};
use crate::nav::linkage::owned_levels;
use crate::surface::{RenderSurface, SurfaceItems};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    AddNode { node: NodeRecord },
    UpdateNode { node_id: NodeId, patch: NodePatch },
    /// Removes the node, its incident edges and the sub-diagram tree it owns.
    RemoveNode { node_id: NodeId },
    AddEdge { edge_id: EdgeId, source: NodeId, target: NodeId },
    RemoveEdge { edge_id: EdgeId },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub font_size: Option<f64>,
    pub text_color: Option<String>,
}

impl NodePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Reference to one item on a surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemRef {
    Node(NodeId),
    Edge(EdgeId),
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "node:{id}"),
            Self::Edge(id) => write!(f, "edge:{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub applied: usize,
    pub delta: Delta,
}

/// Items added, removed or updated by a batch, each sorted and reported once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<ItemRef>,
    pub removed: Vec<ItemRef>,
    pub updated: Vec<ItemRef>,
    /// Sub-diagram levels dropped together with removed nodes.
    pub removed_levels: usize,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: BTreeSet<ItemRef>,
    removed: BTreeSet<ItemRef>,
    updated: BTreeSet<ItemRef>,
    removed_levels: usize,
}

impl DeltaBuilder {
    fn record_added(&mut self, item: ItemRef) {
        self.removed.remove(&item);
        self.updated.remove(&item);
        self.added.insert(item);
    }

    fn record_removed(&mut self, item: ItemRef) {
        self.updated.remove(&item);
        if !self.added.remove(&item) {
            self.removed.insert(item);
        }
    }

    fn record_updated(&mut self, item: ItemRef) {
        if self.added.contains(&item) || self.removed.contains(&item) {
            return;
        }
        self.updated.insert(item);
    }

    fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
            removed_levels: self.removed_levels,
        }
    }
}

/// Applies `ops` to the surface's current level, all or nothing.
pub fn apply_ops<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ops: &[Op],
) -> Result<ApplyResult, ApplyError> {
    if ops.is_empty() {
        return Ok(ApplyResult { applied: 0, delta: Delta::default() });
    }

    let mut items = surface.items();
    let mut delta = DeltaBuilder::default();
    for op in ops {
        apply_op(&mut items, op, &mut delta)?;
    }

    surface.replace_items(items);
    Ok(ApplyResult { applied: ops.len(), delta: delta.finish() })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Node,
    Edge,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Node => "node",
            Self::Edge => "edge",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("{kind} already exists (id={id})")]
    AlreadyExists { kind: ItemKind, id: String },
    #[error("{kind} not found (id={id})")]
    NotFound { kind: ItemKind, id: String },
    #[error("edge endpoint is not on this level (node={node_id})")]
    MissingEndpoint { node_id: NodeId },
    #[error("edge would connect node {node_id} to itself")]
    SelfLoop { node_id: NodeId },
    #[error("invalid label style: {reason}")]
    InvalidStyle { reason: String },
}

// Per-op application helpers.
include!("ops_impl.rs");

#[cfg(test)]
mod tests;
