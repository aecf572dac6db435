// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Helpers over the "rectangle owns a level" convention.

use tracing::warn;

use crate::model::{DiagramLevel, NodeRecord, ROOT_LABEL};

/// Whether `node` owns a sub-diagram with at least one node or edge.
pub fn has_content(node: &NodeRecord) -> bool {
    node.sub_graph().is_some_and(|level| !level.is_empty())
}

/// Visits every node of `level` and its sub-diagrams depth-first, in document order.
///
/// `visit` receives the node and the labels of the levels above it, starting with `"Root"`.
/// Only rectangle nodes are descended into.
pub fn walk<'a>(level: &'a DiagramLevel, visit: &mut impl FnMut(&'a NodeRecord, &[String])) {
    let mut path = vec![ROOT_LABEL.to_owned()];
    walk_level(level, &mut path, visit);
}

fn walk_level<'a>(
    level: &'a DiagramLevel,
    path: &mut Vec<String>,
    visit: &mut impl FnMut(&'a NodeRecord, &[String]),
) {
    for node in level.nodes() {
        visit(node, path);
        if !node.kind().can_own_subgraph() {
            continue;
        }
        if let Some(sub_graph) = node.sub_graph() {
            path.push(node.display_label().to_owned());
            walk_level(sub_graph, path, visit);
            path.pop();
        }
    }
}

/// Rebuilds the full tree from the ancestor stack and the live current level.
///
/// Each deeper level is spliced into its owner in a copy of the level above, so the result
/// reflects edits made below the root without touching the navigation state.
pub fn assemble_root(current: &DiagramLevel, stack: &[DiagramLevel]) -> DiagramLevel {
    let mut assembled = current.clone();
    for ancestor in stack.iter().rev() {
        let mut parent = ancestor.clone();
        match assembled.parent_node().cloned() {
            Some(owner_id) => match parent.node_mut(&owner_id) {
                Some(owner) => {
                    if let Err(err) = owner.set_sub_graph(assembled) {
                        warn!(error = %err, "skipping level while assembling tree");
                    }
                }
                None => warn!(owner = %owner_id, "owner missing while assembling tree"),
            },
            None => warn!(level = %assembled.id(), "ownerless level inside stack"),
        }
        assembled = parent;
    }
    assembled
}

/// Number of levels in the subtree rooted at `level`, including `level` itself.
pub fn count_levels(level: &DiagramLevel) -> usize {
    1 + level.nodes().iter().filter_map(NodeRecord::sub_graph).map(count_levels).sum::<usize>()
}

/// Number of sub-diagram levels owned by `node`, directly or transitively.
pub fn owned_levels(node: &NodeRecord) -> usize {
    node.sub_graph().map_or(0, count_levels)
}
