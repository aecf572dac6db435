// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};
use tokio::sync::Mutex;
use tracing::debug;

use crate::editor::{Command, Editor, EditorError, Outcome};
use crate::model::{EdgeId, NodeId, NodeRecord, Point, Size};
use crate::ops::{ApplyError, Delta, ItemKind, NodePatch};
use crate::query::{ResolveError, SearchEntry};
use crate::store::StoreError;
use crate::surface::RenderSurface;

use super::types::*;

#[derive(Clone)]
pub struct NestdrawMcp {
    editor: Arc<Mutex<Editor>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl NestdrawMcp {
    pub fn new(editor: Editor) -> Self {
        Self::with_shared_editor(Arc::new(Mutex::new(editor)))
    }

    pub fn with_shared_editor(editor: Arc<Mutex<Editor>>) -> Self {
        Self { editor, tool_router: Self::tool_router() }
    }

    pub fn editor(&self) -> Arc<Mutex<Editor>> {
        self.editor.clone()
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    async fn navigate(&self, command: Command) -> Result<Json<NavResponse>, ErrorData> {
        let mut editor = self.editor.lock().await;
        let moved = match editor.execute(command).map_err(map_editor_error)? {
            Outcome::Navigated { moved } => moved,
            _ => true,
        };
        Ok(Json(NavResponse { moved, state: nav_state_response(&editor) }))
    }

    async fn edit(&self, command: Command) -> Result<Json<EditResponse>, ErrorData> {
        let mut editor = self.editor.lock().await;
        let outcome = editor.execute(command).map_err(map_editor_error)?;
        let Outcome::Edited { delta } = outcome else {
            return Err(ErrorData::internal_error("edit produced no delta", None));
        };
        Ok(Json(edit_response(&delta, editor.surface().selection())))
    }

    /// Report the current depth, breadcrumb, back target and selection.
    #[tool(name = "nav.state")]
    async fn nav_state(&self) -> Result<Json<NavStateResponse>, ErrorData> {
        let editor = self.editor.lock().await;
        Ok(Json(nav_state_response(&editor)))
    }

    /// Enter the sub-diagram of a rectangle node on the current level, creating it when empty.
    #[tool(name = "nav.descend")]
    async fn nav_descend(
        &self,
        params: Parameters<NodeIdParams>,
    ) -> Result<Json<NavResponse>, ErrorData> {
        let node_id = parse_node_id(&params.0.node_id)?;
        self.navigate(Command::Descend { node_id }).await
    }

    /// Return to the enclosing level; ignored at the root.
    #[tool(name = "nav.back")]
    async fn nav_back(&self) -> Result<Json<NavResponse>, ErrorData> {
        self.navigate(Command::GoBack).await
    }

    /// Jump to an ancestor depth (0 is the root), writing every level passed back into its owner.
    #[tool(name = "nav.go_to_level")]
    async fn nav_go_to_level(
        &self,
        params: Parameters<GoToLevelParams>,
    ) -> Result<Json<NavResponse>, ErrorData> {
        let depth = usize::try_from(params.0.depth).unwrap_or(usize::MAX);
        self.navigate(Command::GoToLevel { depth }).await
    }

    /// Read the nodes and edges of the level currently shown.
    #[tool(name = "level.read")]
    async fn level_read(&self) -> Result<Json<LevelReadResponse>, ErrorData> {
        let editor = self.editor.lock().await;
        let surface = editor.surface();
        Ok(Json(LevelReadResponse {
            level_id: editor.navigator().current().id().to_string(),
            depth: editor.navigator().depth() as u64,
            nodes: surface.nodes().iter().map(mcp_node).collect(),
            edges: surface
                .edges()
                .iter()
                .map(|edge| McpEdge {
                    edge_id: edge.id().to_string(),
                    source: edge.source().to_string(),
                    target: edge.target().to_string(),
                })
                .collect(),
        }))
    }

    /// Add a rectangle, text or image node to the current level and select it.
    #[tool(name = "node.add")]
    async fn node_add(&self, params: Parameters<NodeAddParams>) -> Result<Json<EditResponse>, ErrorData> {
        let params = params.0;
        let position = Point::new(params.x, params.y);
        let command = match params.kind {
            McpNodeKind::Rectangle => Command::AddRectangle { position, label: params.label },
            McpNodeKind::Text => Command::AddText { position, label: params.label },
            McpNodeKind::Image => {
                let Some(path) = params.image_path else {
                    return Err(ErrorData::invalid_params("image nodes require image_path", None));
                };
                Command::AddImage { position, path: PathBuf::from(path) }
            }
        };
        self.edit(command).await
    }

    /// Change the label, position, size or label style of a node in one edit.
    #[tool(name = "node.update")]
    async fn node_update(
        &self,
        params: Parameters<NodeUpdateParams>,
    ) -> Result<Json<EditResponse>, ErrorData> {
        let params = params.0;
        let node_id = parse_node_id(&params.node_id)?;
        let mut editor = self.editor.lock().await;
        let Some((position, size)) =
            editor.surface().find_node(&node_id).map(|node| (node.position(), node.size()))
        else {
            return Err(map_apply_error(ApplyError::NotFound {
                kind: ItemKind::Node,
                id: node_id.to_string(),
            }));
        };

        let mut patch = NodePatch {
            label: params.label,
            font_size: params.font_size,
            text_color: params.text_color,
            ..NodePatch::default()
        };
        if params.x.is_some() || params.y.is_some() {
            patch.position =
                Some(Point::new(params.x.unwrap_or(position.x), params.y.unwrap_or(position.y)));
        }
        patch.size = match (params.width, params.height, size) {
            (None, None, _) => None,
            (Some(width), Some(height), _) => Some(Size::new(width, height)),
            (width, height, Some(current)) => Some(Size::new(
                width.unwrap_or(current.width),
                height.unwrap_or(current.height),
            )),
            (_, _, None) => {
                return Err(ErrorData::invalid_params(
                    "node has no size; pass both width and height",
                    Some(serde_json::json!({ "node_id": node_id.as_str() })),
                ));
            }
        };
        if patch.is_empty() {
            return Err(ErrorData::invalid_params(
                "no changes requested",
                Some(serde_json::json!({ "node_id": node_id.as_str() })),
            ));
        }

        let outcome = editor.update_node(node_id, patch).map_err(map_editor_error)?;
        let Outcome::Edited { delta } = outcome else {
            return Err(ErrorData::internal_error("edit produced no delta", None));
        };
        Ok(Json(edit_response(&delta, editor.surface().selection())))
    }

    /// Remove a node, its incident edges and any sub-diagram it owns.
    #[tool(name = "node.remove")]
    async fn node_remove(
        &self,
        params: Parameters<NodeIdParams>,
    ) -> Result<Json<EditResponse>, ErrorData> {
        let node_id = parse_node_id(&params.0.node_id)?;
        self.edit(Command::DeleteNode { node_id }).await
    }

    /// Connect two distinct nodes of the current level.
    #[tool(name = "edge.add")]
    async fn edge_add(&self, params: Parameters<EdgeAddParams>) -> Result<Json<EditResponse>, ErrorData> {
        let source = parse_node_id(&params.0.source)?;
        let target = parse_node_id(&params.0.target)?;
        self.edit(Command::Connect { source, target }).await
    }

    #[tool(name = "edge.remove")]
    async fn edge_remove(
        &self,
        params: Parameters<EdgeIdParams>,
    ) -> Result<Json<EditResponse>, ErrorData> {
        let edge_id = parse_edge_id(&params.0.edge_id)?;
        self.edit(Command::DeleteEdge { edge_id }).await
    }

    /// Case-insensitive label search over every level; a blank query lists every node.
    #[tool(name = "search.query")]
    async fn search_query(
        &self,
        params: Parameters<SearchQueryParams>,
    ) -> Result<Json<SearchQueryResponse>, ErrorData> {
        let mut editor = self.editor.lock().await;
        let index = editor.search_index();
        let results = index.search(&params.0.query).into_iter().map(search_result).collect();
        Ok(Json(SearchQueryResponse { results }))
    }

    /// Navigate to the level holding a node (by id, as returned from `search.query`) and select it.
    #[tool(name = "search.navigate")]
    async fn search_navigate(
        &self,
        params: Parameters<NodeIdParams>,
    ) -> Result<Json<SearchNavigateResponse>, ErrorData> {
        let node_id = parse_node_id(&params.0.node_id)?;
        let mut editor = self.editor.lock().await;
        let entry = editor.navigate_to_node(&node_id).map_err(map_editor_error)?;
        debug!(node_id = %node_id, depth = entry.depth(), "navigated to search result");
        Ok(Json(SearchNavigateResponse {
            target: search_result(&entry),
            state: nav_state_response(&editor),
        }))
    }

    /// Write the whole document, including the level being edited.
    #[tool(name = "document.save")]
    async fn document_save(
        &self,
        params: Parameters<DocumentSaveParams>,
    ) -> Result<Json<DocumentSaveResponse>, ErrorData> {
        let command = match params.0.path {
            Some(path) => Command::SaveAs { path: PathBuf::from(path) },
            None => Command::Save,
        };
        let mut editor = self.editor.lock().await;
        match editor.execute(command).map_err(map_editor_error)? {
            Outcome::Saved { path } => {
                Ok(Json(DocumentSaveResponse { path: path.display().to_string() }))
            }
            _ => Err(ErrorData::internal_error("save produced no path", None)),
        }
    }

    /// Replace the document from a file or from JSON text; the previous state stays on failure.
    #[tool(name = "document.load")]
    async fn document_load(
        &self,
        params: Parameters<DocumentLoadParams>,
    ) -> Result<Json<NavResponse>, ErrorData> {
        let command = match (params.0.path, params.0.text) {
            (Some(_), Some(_)) => {
                return Err(ErrorData::invalid_params("pass either path or text, not both", None));
            }
            (None, Some(text)) => Command::LoadText { text },
            (path, None) => Command::Load { path: path.map(PathBuf::from) },
        };
        self.navigate(command).await
    }

    /// Return the document JSON as it would be saved.
    #[tool(name = "document.read")]
    async fn document_read(&self) -> Result<Json<DocumentReadResponse>, ErrorData> {
        let mut editor = self.editor.lock().await;
        let text = editor.document_text().map_err(map_editor_error)?;
        Ok(Json(DocumentReadResponse { text }))
    }
}

#[tool_handler]
impl ServerHandler for NestdrawMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Nestdraw nested diagram server (tools: nav.state, nav.descend, nav.back, nav.go_to_level, level.read, node.add, node.update, node.remove, edge.add, edge.remove, search.query, search.navigate, document.save, document.load, document.read)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// Response building and error mapping for the tool handlers.
include!("server/helpers.rs");

#[cfg(test)]
mod tests;
