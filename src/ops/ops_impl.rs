// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Node/edge mutation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_op(items: &mut SurfaceItems, op: &Op, delta: &mut DeltaBuilder) -> Result<(), ApplyError> {
    match op {
        Op::AddNode { node } => {
            if items.node(node.id()).is_some() {
                return Err(ApplyError::AlreadyExists {
                    kind: ItemKind::Node,
                    id: node.id().to_string(),
                });
            }
            items.nodes.push(node.clone());
            delta.record_added(ItemRef::Node(node.id().clone()));
            Ok(())
        }
        Op::UpdateNode { node_id, patch } => {
            let Some(node) = items.node_mut(node_id) else {
                return Err(node_not_found(node_id));
            };
            apply_node_patch(node, patch)?;
            delta.record_updated(ItemRef::Node(node_id.clone()));
            Ok(())
        }
        Op::RemoveNode { node_id } => {
            let Some(index) = items.nodes.iter().position(|node| node.id() == node_id) else {
                return Err(node_not_found(node_id));
            };
            let removed = items.nodes.remove(index);
            delta.removed_levels += owned_levels(&removed);

            let incident = items
                .edges
                .iter()
                .filter(|edge| edge.touches(node_id))
                .map(|edge| edge.id().clone())
                .collect::<Vec<_>>();
            items.edges.retain(|edge| !edge.touches(node_id));
            for edge_id in incident {
                delta.record_removed(ItemRef::Edge(edge_id));
            }
            delta.record_removed(ItemRef::Node(node_id.clone()));
            Ok(())
        }
        Op::AddEdge { edge_id, source, target } => {
            if items.edges.iter().any(|edge| edge.id() == edge_id) {
                return Err(ApplyError::AlreadyExists {
                    kind: ItemKind::Edge,
                    id: edge_id.to_string(),
                });
            }
            if source == target {
                return Err(ApplyError::SelfLoop { node_id: source.clone() });
            }
            for endpoint in [source, target] {
                if items.node(endpoint).is_none() {
                    return Err(ApplyError::MissingEndpoint { node_id: endpoint.clone() });
                }
            }
            items.edges.push(EdgeRecord::new(edge_id.clone(), source.clone(), target.clone()));
            delta.record_added(ItemRef::Edge(edge_id.clone()));
            Ok(())
        }
        Op::RemoveEdge { edge_id } => {
            let before = items.edges.len();
            items.edges.retain(|edge| edge.id() != edge_id);
            if items.edges.len() == before {
                return Err(ApplyError::NotFound { kind: ItemKind::Edge, id: edge_id.to_string() });
            }
            delta.record_removed(ItemRef::Edge(edge_id.clone()));
            Ok(())
        }
    }
}

fn node_not_found(node_id: &NodeId) -> ApplyError {
    ApplyError::NotFound { kind: ItemKind::Node, id: node_id.to_string() }
}

fn apply_node_patch(node: &mut NodeRecord, patch: &NodePatch) -> Result<(), ApplyError> {
    if let Some(font_size) = patch.font_size {
        validate_font_size(font_size)?;
    }
    if let Some(color) = &patch.text_color {
        validate_color(color)?;
    }

    if let Some(label) = &patch.label {
        node.set_label(Some(label.clone()));
    }
    if let Some(position) = patch.position {
        node.set_position(position);
    }
    if let Some(size) = patch.size {
        node.set_size(Some(size.clamped()));
    }
    if let Some(font_size) = patch.font_size {
        node.style_mut().set_font_size(Some(font_size));
    }
    if let Some(color) = &patch.text_color {
        node.style_mut().set_text_color(Some(color.clone()));
    }
    Ok(())
}

fn validate_font_size(font_size: f64) -> Result<(), ApplyError> {
    if font_size.is_finite() && font_size > 0.0 {
        return Ok(());
    }
    Err(ApplyError::InvalidStyle { reason: format!("font size must be positive, got {font_size}") })
}

/// Accepts `#rgb` and `#rrggbb`.
fn validate_color(color: &str) -> Result<(), ApplyError> {
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        return Ok(());
    }
    Err(ApplyError::InvalidStyle { reason: format!("expected #rgb or #rrggbb color, got '{color}'") })
}
