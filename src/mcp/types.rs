// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpCrumb {
    pub label: String,
    pub depth: u64,
    pub is_current: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavStateResponse {
    pub depth: u64,
    pub level_id: String,
    pub parent_node: Option<String>,
    pub breadcrumb: Vec<McpCrumb>,
    /// Label of the level `nav.back` returns to; absent at the root.
    pub back_target: Option<String>,
    pub selection: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavResponse {
    /// False when the request was ignored (unknown node, leaf, depth out of range).
    pub moved: bool,
    pub state: NavStateResponse,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NodeIdParams {
    pub node_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EdgeIdParams {
    pub edge_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GoToLevelParams {
    pub depth: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpNode {
    pub node_id: String,
    pub kind: String,
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub font_size: Option<f64>,
    pub text_color: Option<String>,
    pub has_sub_graph: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpEdge {
    pub edge_id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LevelReadResponse {
    pub level_id: String,
    pub depth: u64,
    pub nodes: Vec<McpNode>,
    pub edges: Vec<McpEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum McpNodeKind {
    Rectangle,
    Text,
    Image,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NodeAddParams {
    pub kind: McpNodeKind,
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
    /// PNG file to embed; required for `image` nodes.
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NodeUpdateParams {
    pub node_id: String,
    pub label: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub font_size: Option<f64>,
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EdgeAddParams {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EditResponse {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub updated: Vec<String>,
    /// Sub-diagrams discarded together with removed nodes.
    pub removed_levels: u64,
    pub selection: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchQueryParams {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpSearchResult {
    pub node_id: String,
    pub label: Option<String>,
    pub kind: String,
    pub depth: u64,
    pub path: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchQueryResponse {
    pub results: Vec<McpSearchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchNavigateResponse {
    pub target: McpSearchResult,
    pub state: NavStateResponse,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocumentSaveParams {
    /// Writes to this file and makes it the document file; defaults to the current file.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentSaveResponse {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocumentLoadParams {
    pub path: Option<String>,
    /// Document JSON to load instead of a file.
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentReadResponse {
    pub text: String,
}
