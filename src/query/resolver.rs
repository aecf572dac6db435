// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;
use tracing::debug;

use super::search::SearchEntry;
use crate::model::{NodeId, NodeKind};
use crate::nav::Navigator;
use crate::surface::RenderSurface;

const HINT_MIN_RATIO: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no node labelled '{segment}' at depth {depth}{}", hint_suffix(.closest))]
    UnresolvedPathSegment { segment: String, depth: usize, closest: Option<String> },
    #[error("'{segment}' is a {kind} node and has no sub-diagram")]
    NotDescendable { segment: String, kind: NodeKind },
    #[error("node {node_id} is not on the target level")]
    TargetMissing { node_id: NodeId },
}

fn hint_suffix(closest: &Option<String>) -> String {
    closest.as_ref().map(|label| format!(" (did you mean '{label}'?)")).unwrap_or_default()
}

/// Moves the navigator to the level holding `entry` and focuses the node.
///
/// When the node is already on the surface at the same depth it is focused directly. Otherwise
/// navigation restarts at the root and follows the path labels, entering the first node whose
/// label matches each segment. Levels entered before a failure stay entered.
pub fn navigate_to_node<S: RenderSurface>(
    navigator: &mut Navigator<S>,
    entry: &SearchEntry,
) -> Result<(), ResolveError> {
    if entry.depth() == navigator.depth() && navigator.surface().find_node(&entry.node_id).is_some()
    {
        return focus_target(navigator, &entry.node_id);
    }

    navigator.navigate_to_level(0);
    for segment in entry.path.iter().skip(1) {
        let depth = navigator.depth();
        let found = navigator
            .surface()
            .nodes()
            .iter()
            .find(|node| node.display_label() == segment)
            .map(|node| (node.id().clone(), node.kind()));
        let Some((node_id, kind)) = found else {
            let closest = closest_label(
                segment,
                navigator.surface().nodes().iter().map(|node| node.display_label()),
            );
            debug!(segment = %segment, depth, "path segment not found");
            return Err(ResolveError::UnresolvedPathSegment {
                segment: segment.clone(),
                depth,
                closest,
            });
        };
        if !kind.can_own_subgraph() || !navigator.descend_into(&node_id) {
            return Err(ResolveError::NotDescendable { segment: segment.clone(), kind });
        }
    }

    focus_target(navigator, &entry.node_id)
}

fn focus_target<S: RenderSurface>(
    navigator: &mut Navigator<S>,
    node_id: &NodeId,
) -> Result<(), ResolveError> {
    navigator
        .surface_mut()
        .focus(node_id)
        .map_err(|_| ResolveError::TargetMissing { node_id: node_id.clone() })
}

/// The label most similar to `wanted`, if any is similar enough to suggest.
fn closest_label<'a>(wanted: &str, labels: impl Iterator<Item = &'a str>) -> Option<String> {
    let wanted = wanted.to_lowercase();
    labels
        .map(|label| (rapidfuzz::fuzz::ratio(wanted.chars(), label.to_lowercase().chars()), label))
        .filter(|(ratio, _)| *ratio >= HINT_MIN_RATIO)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, label)| label.to_owned())
}
