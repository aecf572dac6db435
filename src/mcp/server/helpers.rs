// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

fn parse_node_id(value: &str) -> Result<NodeId, ErrorData> {
    NodeId::new(value).map_err(|err| {
        ErrorData::invalid_params(
            format!("invalid node_id: {err}"),
            Some(serde_json::json!({ "node_id": value })),
        )
    })
}

fn parse_edge_id(value: &str) -> Result<EdgeId, ErrorData> {
    EdgeId::new(value).map_err(|err| {
        ErrorData::invalid_params(
            format!("invalid edge_id: {err}"),
            Some(serde_json::json!({ "edge_id": value })),
        )
    })
}

fn nav_state_response(editor: &Editor) -> NavStateResponse {
    let navigator = editor.navigator();
    NavStateResponse {
        depth: navigator.depth() as u64,
        level_id: navigator.current().id().to_string(),
        parent_node: navigator.current().parent_node().map(ToString::to_string),
        breadcrumb: navigator
            .breadcrumb()
            .iter()
            .map(|crumb| McpCrumb {
                label: crumb.label.clone(),
                depth: crumb.depth as u64,
                is_current: crumb.is_current,
            })
            .collect(),
        back_target: navigator.back_target().map(str::to_owned),
        selection: editor.surface().selection().map(ToString::to_string),
    }
}

fn edit_response(delta: &Delta, selection: Option<&NodeId>) -> EditResponse {
    EditResponse {
        added: delta.added.iter().map(ToString::to_string).collect(),
        removed: delta.removed.iter().map(ToString::to_string).collect(),
        updated: delta.updated.iter().map(ToString::to_string).collect(),
        removed_levels: delta.removed_levels as u64,
        selection: selection.map(ToString::to_string),
    }
}

fn mcp_node(node: &NodeRecord) -> McpNode {
    let position = node.position();
    let size = node.size();
    McpNode {
        node_id: node.id().to_string(),
        kind: node.kind().to_string(),
        label: node.label().map(str::to_owned),
        x: position.x,
        y: position.y,
        width: size.map(|size| size.width),
        height: size.map(|size| size.height),
        font_size: node.style().font_size(),
        text_color: node.style().text_color().map(str::to_owned),
        has_sub_graph: node.sub_graph().is_some(),
    }
}

fn search_result(entry: &SearchEntry) -> McpSearchResult {
    McpSearchResult {
        node_id: entry.node_id.to_string(),
        label: entry.label.clone(),
        kind: entry.kind.to_string(),
        depth: entry.depth() as u64,
        path: entry.path.clone(),
    }
}

fn map_editor_error(err: EditorError) -> ErrorData {
    match err {
        EditorError::Apply(err) => map_apply_error(err),
        EditorError::Store(StoreError::Io { path, source }) => ErrorData::internal_error(
            format!("failed to access document: {source}"),
            Some(serde_json::json!({ "path": path.display().to_string() })),
        ),
        EditorError::Store(StoreError::Document { path, source }) => ErrorData::invalid_params(
            format!("invalid document: {source}"),
            Some(serde_json::json!({ "path": path.display().to_string() })),
        ),
        EditorError::Document(err) => {
            ErrorData::invalid_params(format!("invalid document: {err}"), None)
        }
        EditorError::Resolve(err) => map_resolve_error(err),
        EditorError::Image { path, source } => ErrorData::invalid_params(
            format!("cannot use image: {source}"),
            Some(serde_json::json!({ "path": path.display().to_string() })),
        ),
    }
}

fn map_apply_error(err: ApplyError) -> ErrorData {
    let message = err.to_string();
    match err {
        ApplyError::AlreadyExists { kind, id } => ErrorData::invalid_params(
            message,
            Some(serde_json::json!({ "kind": kind.to_string(), "id": id })),
        ),
        ApplyError::NotFound { kind, id } => ErrorData::resource_not_found(
            message,
            Some(serde_json::json!({ "kind": kind.to_string(), "id": id })),
        ),
        ApplyError::MissingEndpoint { node_id } | ApplyError::SelfLoop { node_id } => {
            ErrorData::invalid_params(message, Some(serde_json::json!({ "node_id": node_id.as_str() })))
        }
        ApplyError::InvalidStyle { .. } => ErrorData::invalid_params(message, None),
    }
}

fn map_resolve_error(err: ResolveError) -> ErrorData {
    let message = err.to_string();
    match err {
        ResolveError::UnresolvedPathSegment { segment, depth, closest } => {
            ErrorData::resource_not_found(
                message,
                Some(serde_json::json!({ "segment": segment, "depth": depth, "closest": closest })),
            )
        }
        ResolveError::NotDescendable { segment, kind } => ErrorData::invalid_request(
            message,
            Some(serde_json::json!({ "segment": segment, "kind": kind.to_string() })),
        ),
        ResolveError::TargetMissing { node_id } => ErrorData::resource_not_found(
            message,
            Some(serde_json::json!({ "node_id": node_id.as_str() })),
        ),
    }
}
