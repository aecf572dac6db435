// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::*;
use crate::store::GraphFile;

fn temp_document_dir(test_name: &str) -> std::path::PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};

    let mut dir = std::env::temp_dir();
    let pid = std::process::id();
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).expect("clock is monotonic").as_nanos();
    dir.push(format!("nestdraw-mcp-{test_name}-{pid}-{nanos}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn server_in(dir: &std::path::Path) -> NestdrawMcp {
    NestdrawMcp::new(Editor::new(GraphFile::new(dir.join("graph-data.json"))))
}

fn rectangle(label: &str, x: f64) -> NodeAddParams {
    NodeAddParams { kind: McpNodeKind::Rectangle, x, y: 0.0, label: Some(label.into()), image_path: None }
}

fn node(node_id: &str) -> Parameters<NodeIdParams> {
    Parameters(NodeIdParams { node_id: node_id.into() })
}

/// Root holds `Parent` (node-0, owning a level with text `Child` text-2) and `Other` (node-1).
async fn nested_server(dir: &std::path::Path) -> NestdrawMcp {
    let server = server_in(dir);
    server.node_add(Parameters(rectangle("Parent", 0.0))).await.expect("node.add parent");
    server.node_add(Parameters(rectangle("Other", 300.0))).await.expect("node.add other");
    server.nav_descend(node("node-0")).await.expect("nav.descend");
    server
        .node_add(Parameters(NodeAddParams {
            kind: McpNodeKind::Text,
            x: 10.0,
            y: 10.0,
            label: Some("Child".into()),
            image_path: None,
        }))
        .await
        .expect("node.add child");
    server.nav_back().await.expect("nav.back");
    server
}

#[tokio::test]
async fn nav_state_starts_at_empty_root() {
    let dir = temp_document_dir("root");
    let server = server_in(&dir);
    let Json(state) = server.nav_state().await.expect("nav.state");

    assert_eq!(state.depth, 0);
    assert_eq!(state.level_id, "root");
    assert_eq!(state.parent_node, None);
    assert_eq!(state.back_target, None);
    assert_eq!(state.breadcrumb.len(), 1);
    assert_eq!(state.breadcrumb[0].label, "Root");
    assert!(state.breadcrumb[0].is_current);
}

#[tokio::test]
async fn descend_reports_breadcrumb_and_back_target() {
    let dir = temp_document_dir("descend");
    let server = nested_server(&dir).await;

    let Json(response) = server.nav_descend(node("node-0")).await.expect("nav.descend");
    assert!(response.moved);
    assert_eq!(response.state.depth, 1);
    assert_eq!(response.state.level_id, "subgraph-node-0");
    assert_eq!(response.state.parent_node.as_deref(), Some("node-0"));
    assert_eq!(response.state.back_target.as_deref(), Some("Parent"));
    let labels: Vec<_> = response.state.breadcrumb.iter().map(|crumb| crumb.label.as_str()).collect();
    assert_eq!(labels, vec!["Root", "Parent"]);

    let Json(level) = server.level_read().await.expect("level.read");
    assert_eq!(level.nodes.len(), 1);
    assert_eq!(level.nodes[0].node_id, "text-2");
    assert_eq!(level.nodes[0].label.as_deref(), Some("Child"));
}

#[tokio::test]
async fn ignored_navigation_is_not_an_error() {
    let dir = temp_document_dir("ignored");
    let server = nested_server(&dir).await;

    let Json(unknown) = server.nav_descend(node("missing")).await.expect("nav.descend");
    assert!(!unknown.moved);
    let Json(back) = server.nav_back().await.expect("nav.back at root");
    assert!(!back.moved);
    let Json(jump) = server
        .nav_go_to_level(Parameters(GoToLevelParams { depth: 3 }))
        .await
        .expect("nav.go_to_level");
    assert!(!jump.moved);
    assert_eq!(jump.state.depth, 0);
}

#[tokio::test]
async fn descend_rejects_invalid_node_id() {
    let dir = temp_document_dir("invalid-id");
    let server = server_in(&dir);
    let err = match server.nav_descend(node("")).await {
        Ok(_) => panic!("expected invalid id error"),
        Err(err) => err,
    };
    assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
}

#[tokio::test]
async fn level_read_marks_owners_of_sub_diagrams() {
    let dir = temp_document_dir("owners");
    let server = nested_server(&dir).await;
    let Json(level) = server.level_read().await.expect("level.read");

    assert_eq!(level.depth, 0);
    let owners: Vec<_> =
        level.nodes.iter().map(|node| (node.node_id.as_str(), node.has_sub_graph)).collect();
    assert_eq!(owners, vec![("node-0", true), ("node-1", false)]);
}

#[tokio::test]
async fn node_update_keeps_unspecified_coordinates() {
    let dir = temp_document_dir("update");
    let server = nested_server(&dir).await;
    let Json(edit) = server
        .node_update(Parameters(NodeUpdateParams {
            node_id: "node-1".into(),
            label: Some("Renamed".into()),
            x: Some(42.0),
            y: None,
            width: None,
            height: Some(120.0),
            font_size: Some(30.0),
            text_color: Some("#1890ff".into()),
        }))
        .await
        .expect("node.update");
    assert_eq!(edit.updated, vec!["node:node-1"]);

    let Json(level) = server.level_read().await.expect("level.read");
    let renamed = level.nodes.iter().find(|node| node.node_id == "node-1").expect("node-1");
    assert_eq!(renamed.label.as_deref(), Some("Renamed"));
    assert_eq!((renamed.x, renamed.y), (42.0, 0.0));
    assert_eq!((renamed.width, renamed.height), (Some(160.0), Some(120.0)));
    assert_eq!(renamed.font_size, Some(30.0));
    assert_eq!(renamed.text_color.as_deref(), Some("#1890ff"));
}

#[tokio::test]
async fn node_update_rejects_unknown_node_and_empty_patch() {
    let dir = temp_document_dir("update-errors");
    let server = nested_server(&dir).await;
    let empty = |node_id: &str| NodeUpdateParams {
        node_id: node_id.into(),
        label: None,
        x: None,
        y: None,
        width: None,
        height: None,
        font_size: None,
        text_color: None,
    };

    let err = match server.node_update(Parameters(empty("nope"))).await {
        Ok(_) => panic!("expected not found"),
        Err(err) => err,
    };
    assert_eq!(err.code, rmcp::model::ErrorCode::RESOURCE_NOT_FOUND);

    let err = match server.node_update(Parameters(empty("node-1"))).await {
        Ok(_) => panic!("expected empty patch error"),
        Err(err) => err,
    };
    assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
}

#[tokio::test]
async fn edges_validate_and_cascade_with_their_nodes() {
    let dir = temp_document_dir("edges");
    let server = nested_server(&dir).await;

    let err = match server
        .edge_add(Parameters(EdgeAddParams { source: "node-0".into(), target: "node-0".into() }))
        .await
    {
        Ok(_) => panic!("expected self-loop error"),
        Err(err) => err,
    };
    assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);

    let Json(added) = server
        .edge_add(Parameters(EdgeAddParams { source: "node-0".into(), target: "node-1".into() }))
        .await
        .expect("edge.add");
    assert_eq!(added.added, vec!["edge:edge-3"]);

    let Json(removed) = server.node_remove(node("node-0")).await.expect("node.remove");
    assert_eq!(removed.removed, vec!["node:node-0", "edge:edge-3"]);
    assert_eq!(removed.removed_levels, 1);

    let err = match server.edge_remove(Parameters(EdgeIdParams { edge_id: "edge-3".into() })).await {
        Ok(_) => panic!("expected missing edge"),
        Err(err) => err,
    };
    assert_eq!(err.code, rmcp::model::ErrorCode::RESOURCE_NOT_FOUND);
}

#[tokio::test]
async fn node_add_image_requires_a_path() {
    let dir = temp_document_dir("image");
    let server = server_in(&dir);
    let err = match server
        .node_add(Parameters(NodeAddParams {
            kind: McpNodeKind::Image,
            x: 0.0,
            y: 0.0,
            label: None,
            image_path: None,
        }))
        .await
    {
        Ok(_) => panic!("expected missing image_path"),
        Err(err) => err,
    };
    assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
}

#[tokio::test]
async fn search_finds_nested_nodes_and_navigates_to_them() {
    let dir = temp_document_dir("search");
    let server = nested_server(&dir).await;

    let Json(found) = server
        .search_query(Parameters(SearchQueryParams { query: "chi".into() }))
        .await
        .expect("search.query");
    assert_eq!(found.results.len(), 1);
    let child = &found.results[0];
    assert_eq!(child.node_id, "text-2");
    assert_eq!(child.path, vec!["Root", "Parent"]);
    assert_eq!(child.depth, 1);

    let Json(all) = server
        .search_query(Parameters(SearchQueryParams { query: "  ".into() }))
        .await
        .expect("search.query blank");
    assert_eq!(all.results.len(), 3);

    let Json(navigated) = server.search_navigate(node("text-2")).await.expect("search.navigate");
    assert_eq!(navigated.state.depth, 1);
    assert_eq!(navigated.state.selection.as_deref(), Some("text-2"));

    let err = match server.search_navigate(node("ghost")).await {
        Ok(_) => panic!("expected missing target"),
        Err(err) => err,
    };
    assert_eq!(err.code, rmcp::model::ErrorCode::RESOURCE_NOT_FOUND);
}

#[tokio::test]
async fn save_and_load_round_trip_the_whole_stack() {
    let dir = temp_document_dir("save-load");
    let server = nested_server(&dir).await;
    server.nav_descend(node("node-0")).await.expect("nav.descend");

    let Json(saved) = server
        .document_save(Parameters(DocumentSaveParams { path: None }))
        .await
        .expect("document.save");
    assert!(saved.path.ends_with("graph-data.json"));

    let fresh = server_in(&dir);
    let Json(loaded) = fresh
        .document_load(Parameters(DocumentLoadParams { path: None, text: None }))
        .await
        .expect("document.load");
    assert!(loaded.moved);
    assert_eq!(loaded.state.depth, 1);
    assert_eq!(loaded.state.back_target.as_deref(), Some("Parent"));

    let Json(document) = fresh.document_read().await.expect("document.read");
    assert!(document.text.contains("\"currentGraph\""));
    assert!(document.text.contains("\"graphStack\""));
}

#[tokio::test]
async fn load_rejects_malformed_text_and_keeps_state() {
    let dir = temp_document_dir("bad-load");
    let server = nested_server(&dir).await;

    let err = match server
        .document_load(Parameters(DocumentLoadParams { path: None, text: Some("{".into()) }))
        .await
    {
        Ok(_) => panic!("expected malformed document"),
        Err(err) => err,
    };
    assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);

    let err = match server
        .document_load(Parameters(DocumentLoadParams {
            path: Some("a.json".into()),
            text: Some("{}".into()),
        }))
        .await
    {
        Ok(_) => panic!("expected conflicting sources"),
        Err(err) => err,
    };
    assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);

    let Json(level) = server.level_read().await.expect("level.read");
    assert_eq!(level.nodes.len(), 2);
}

#[test]
fn get_info_lists_every_tool() {
    let dir = temp_document_dir("info");
    let info = server_in(&dir).get_info();
    let instructions = info.instructions.expect("instructions");
    for tool in ["nav.descend", "level.read", "node.update", "search.navigate", "document.load"] {
        assert!(instructions.contains(tool), "missing {tool}");
    }
}
