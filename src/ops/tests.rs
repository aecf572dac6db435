// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use crate::model::fixtures::{edge, eid, nested_tree, nid, rect};
use crate::model::{DiagramLevel, Point, Size};
use crate::surface::{MemorySurface, RenderSurface};

use super::{apply_ops, ApplyError, ItemKind, ItemRef, NodePatch, Op};

fn surface_with(level: &DiagramLevel) -> MemorySurface {
    let mut surface = MemorySurface::new();
    surface.bind(level);
    surface
}

#[test]
fn add_node_and_edge_report_added_items() {
    let mut surface = surface_with(&DiagramLevel::root());
    let ops = [
        Op::AddNode { node: rect("n1", "One") },
        Op::AddNode { node: rect("n2", "Two") },
        Op::AddEdge { edge_id: eid("e1"), source: nid("n1"), target: nid("n2") },
    ];

    let result = apply_ops(&mut surface, &ops).expect("apply");
    assert_eq!(result.applied, 3);
    assert_eq!(
        result.delta.added,
        vec![ItemRef::Node(nid("n1")), ItemRef::Node(nid("n2")), ItemRef::Edge(eid("e1"))]
    );
    assert_eq!(surface.nodes().len(), 2);
    assert_eq!(surface.edges().len(), 1);
}

#[test]
fn failed_batch_leaves_surface_untouched() {
    let mut surface = surface_with(&nested_tree());
    let before = surface.items();
    let ops = [
        Op::AddNode { node: rect("n9", "Nine") },
        Op::AddEdge { edge_id: eid("e9"), source: nid("n9"), target: nid("ghost") },
    ];

    let err = apply_ops(&mut surface, &ops).expect_err("missing endpoint");
    assert_eq!(err, ApplyError::MissingEndpoint { node_id: nid("ghost") });
    assert_eq!(surface.items(), before);
}

#[test]
fn self_loops_are_rejected() {
    let mut surface = surface_with(&nested_tree());
    let err = apply_ops(
        &mut surface,
        &[Op::AddEdge { edge_id: eid("loop"), source: nid("a"), target: nid("a") }],
    )
    .expect_err("self loop");
    assert_eq!(err, ApplyError::SelfLoop { node_id: nid("a") });
}

#[rstest]
#[case::node(Op::AddNode { node: rect("a", "Again") }, ItemKind::Node)]
#[case::edge(Op::AddEdge { edge_id: eid("e1"), source: nid("b"), target: nid("a") }, ItemKind::Edge)]
fn duplicate_ids_are_rejected(#[case] op: Op, #[case] kind: ItemKind) {
    let mut surface = surface_with(&nested_tree());
    let err = apply_ops(&mut surface, &[op]).expect_err("duplicate");
    assert!(matches!(err, ApplyError::AlreadyExists { kind: k, .. } if k == kind));
}

#[test]
fn remove_node_cascades_edges_and_owned_levels() {
    let mut surface = surface_with(&nested_tree());
    let result =
        apply_ops(&mut surface, &[Op::RemoveNode { node_id: nid("a") }]).expect("remove");

    assert_eq!(result.delta.removed, vec![ItemRef::Node(nid("a")), ItemRef::Edge(eid("e1"))]);
    assert_eq!(result.delta.removed_levels, 2);
    assert!(surface.find_node(&nid("a")).is_none());
    assert!(surface.edges().is_empty());
}

#[test]
fn update_node_applies_patch_and_clamps_size() {
    let mut surface = surface_with(&nested_tree());
    let patch = NodePatch {
        label: Some("Renamed".to_owned()),
        position: Some(Point::new(10.0, 20.0)),
        size: Some(Size::new(5.0, 50.0)),
        font_size: Some(30.0),
        text_color: Some("#1890ff".to_owned()),
    };

    let result =
        apply_ops(&mut surface, &[Op::UpdateNode { node_id: nid("b"), patch }]).expect("update");
    assert_eq!(result.delta.updated, vec![ItemRef::Node(nid("b"))]);

    let b = surface.find_node(&nid("b")).expect("b");
    assert_eq!(b.label(), Some("Renamed"));
    assert_eq!(b.position(), Point::new(10.0, 20.0));
    assert_eq!(b.size(), Some(Size::new(30.0, 50.0)));
    assert_eq!(b.style().font_size(), Some(30.0));
    assert_eq!(b.style().text_color(), Some("#1890ff"));
}

#[rstest]
#[case(NodePatch { font_size: Some(0.0), ..NodePatch::default() })]
#[case(NodePatch { font_size: Some(f64::NAN), ..NodePatch::default() })]
#[case(NodePatch { text_color: Some("blue".to_owned()), ..NodePatch::default() })]
#[case(NodePatch { text_color: Some("#12345".to_owned()), ..NodePatch::default() })]
fn invalid_styles_are_rejected(#[case] patch: NodePatch) {
    let mut surface = surface_with(&nested_tree());
    let err = apply_ops(&mut surface, &[Op::UpdateNode { node_id: nid("b"), patch }])
        .expect_err("invalid style");
    assert!(matches!(err, ApplyError::InvalidStyle { .. }));
}

#[test]
fn missing_items_report_not_found() {
    let mut surface = surface_with(&nested_tree());
    let err = apply_ops(&mut surface, &[Op::RemoveEdge { edge_id: eid("nope") }])
        .expect_err("not found");
    assert_eq!(err, ApplyError::NotFound { kind: ItemKind::Edge, id: "nope".to_owned() });

    let err = apply_ops(
        &mut surface,
        &[Op::UpdateNode { node_id: nid("nope"), patch: NodePatch::default() }],
    )
    .expect_err("not found");
    assert_eq!(err.to_string(), "node not found (id=nope)");
}

#[test]
fn add_then_remove_in_one_batch_cancels_out() {
    let mut surface = surface_with(&DiagramLevel::root());
    let result = apply_ops(
        &mut surface,
        &[Op::AddNode { node: rect("tmp", "Tmp") }, Op::RemoveNode { node_id: nid("tmp") }],
    )
    .expect("apply");
    assert!(result.delta.is_empty());
    assert!(surface.nodes().is_empty());
}

#[test]
fn removing_one_edge_keeps_others() {
    let mut level = nested_tree();
    level.edges_mut().push(edge("e2", "b", "a"));
    let mut surface = surface_with(&level);

    apply_ops(&mut surface, &[Op::RemoveEdge { edge_id: eid("e1") }]).expect("remove");
    assert_eq!(surface.edges().len(), 1);
    assert_eq!(surface.edges()[0].id(), &eid("e2"));
}
