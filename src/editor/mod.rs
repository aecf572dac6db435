// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The editor controller.
//!
//! [`Editor`] owns the only navigation state of a session together with the surface, the id
//! allocator, the search session and the document file. Front-ends translate user input into
//! [`Command`]s and render from the editor afterwards; they never touch the state directly.

mod image_source;

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::model::{
    DiagramLevel, EdgeId, IdAllocator, NodeId, NodeKind, NodeRecord, Point, Size,
    DEFAULT_NODE_LABEL,
};
use crate::nav::Navigator;
use crate::ops::{apply_ops, ApplyError, Delta, ItemKind, NodePatch, Op};
use crate::query::{navigate_to_node, ResolveError, SearchEntry, SearchIndex, SearchSession};
use crate::store::{DocumentError, GraphFile, StoreError};
use crate::surface::{MemorySurface, RenderSurface};

pub use image_source::{image_source_from_bytes, load_image_source, ImageSource};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Descend { node_id: NodeId },
    GoBack,
    GoToLevel { depth: usize },
    Save,
    SaveAs { path: PathBuf },
    Load { path: Option<PathBuf> },
    LoadText { text: String },
    SearchShow,
    SearchQuery { query: String },
    SearchNext,
    SearchPrevious,
    SearchConfirm,
    SearchHide,
    AddRectangle { position: Point, label: Option<String> },
    AddText { position: Point, label: Option<String> },
    AddImage { position: Point, path: PathBuf },
    Connect { source: NodeId, target: NodeId },
    DeleteNode { node_id: NodeId },
    DeleteEdge { edge_id: EdgeId },
    EditLabel { node_id: NodeId, label: String },
    SetFontSize { node_id: NodeId, font_size: f64 },
    SetTextColor { node_id: NodeId, color: String },
    Move { node_id: NodeId, position: Point },
    Resize { node_id: NodeId, size: Size },
    Select { node_id: Option<NodeId> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `moved` is false when the request was ignored (unknown node, leaf, depth out of range).
    Navigated { moved: bool },
    Saved { path: PathBuf },
    Loaded { depth: usize },
    SearchUpdated { results: usize },
    SearchClosed,
    /// `entry` is `None` when the search had no result to confirm.
    Found { entry: Option<SearchEntry> },
    Edited { delta: Delta },
    Selected { node_id: Option<NodeId> },
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Apply(#[from] ApplyError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("cannot use image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug)]
pub struct Editor<S = MemorySurface> {
    navigator: Navigator<S>,
    ids: IdAllocator,
    search: SearchSession,
    file: GraphFile,
    new_node_font_size: Option<f64>,
}

impl Editor<MemorySurface> {
    pub fn new(file: GraphFile) -> Self {
        Self::with_surface(file, MemorySurface::new())
    }
}

impl<S: RenderSurface> Editor<S> {
    pub fn with_surface(file: GraphFile, surface: S) -> Self {
        Self {
            navigator: Navigator::new(surface),
            ids: IdAllocator::new(),
            search: SearchSession::new(),
            file,
            new_node_font_size: None,
        }
    }

    /// Font size given to new rectangle and text nodes. `None` keeps the renderer default.
    pub fn with_new_node_font_size(mut self, font_size: Option<f64>) -> Self {
        self.new_node_font_size = font_size;
        self
    }

    pub fn navigator(&self) -> &Navigator<S> {
        &self.navigator
    }

    pub fn surface(&self) -> &S {
        self.navigator.surface()
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn file(&self) -> &GraphFile {
        &self.file
    }

    /// Loads the document file if it exists; a missing file leaves the empty root in place.
    pub fn open(&mut self) -> Result<bool, EditorError> {
        if !self.file.exists() {
            debug!(path = %self.file.path().display(), "no document yet; starting empty");
            return Ok(false);
        }
        let state = self.file.load_state()?;
        self.navigator.replace_state(state);
        self.after_load();
        Ok(true)
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, EditorError> {
        match command {
            Command::Descend { node_id } => {
                let moved = self.navigator.descend_into(&node_id);
                Ok(Outcome::Navigated { moved })
            }
            Command::GoBack => Ok(Outcome::Navigated { moved: self.navigator.go_back() }),
            Command::GoToLevel { depth } => {
                Ok(Outcome::Navigated { moved: self.navigator.navigate_to_level(depth) })
            }
            Command::Save => self.save(),
            Command::SaveAs { path } => {
                let file = GraphFile::new(path).with_durability(self.file.durability());
                self.navigator.capture_current_level();
                file.save_state(self.navigator.state())?;
                self.file = file;
                Ok(Outcome::Saved { path: self.file.path().to_path_buf() })
            }
            Command::Load { path } => {
                let file = match path {
                    Some(path) => GraphFile::new(path).with_durability(self.file.durability()),
                    None => self.file.clone(),
                };
                let state = file.load_state()?;
                self.navigator.replace_state(state);
                self.file = file;
                self.after_load();
                Ok(Outcome::Loaded { depth: self.navigator.depth() })
            }
            Command::LoadText { text } => {
                self.navigator.deserialize(&text)?;
                self.after_load();
                info!(depth = self.navigator.depth(), "document loaded from text");
                Ok(Outcome::Loaded { depth: self.navigator.depth() })
            }
            Command::SearchShow => {
                self.search.show(&mut self.navigator);
                Ok(Outcome::SearchUpdated { results: self.search.results().len() })
            }
            Command::SearchQuery { query } => {
                self.search.set_query(&mut self.navigator, &query);
                Ok(Outcome::SearchUpdated { results: self.search.results().len() })
            }
            Command::SearchNext => {
                self.search.select_next();
                Ok(Outcome::SearchUpdated { results: self.search.results().len() })
            }
            Command::SearchPrevious => {
                self.search.select_previous();
                Ok(Outcome::SearchUpdated { results: self.search.results().len() })
            }
            Command::SearchConfirm => {
                let entry = self.search.confirm(&mut self.navigator)?;
                Ok(Outcome::Found { entry })
            }
            Command::SearchHide => {
                self.search.hide();
                Ok(Outcome::SearchClosed)
            }
            Command::AddRectangle { position, label } => {
                let id = self.next_node_id(NodeKind::Rectangle);
                let node = self.styled(NodeRecord::rectangle(
                    id,
                    position,
                    label.unwrap_or_else(|| DEFAULT_NODE_LABEL.to_owned()),
                ));
                self.add_node(node)
            }
            Command::AddText { position, label } => {
                let id = self.next_node_id(NodeKind::Text);
                let node = self.styled(NodeRecord::text(
                    id,
                    position,
                    label.unwrap_or_else(|| DEFAULT_NODE_LABEL.to_owned()),
                ));
                self.add_node(node)
            }
            Command::AddImage { position, path } => {
                let source = load_image_source(&path)
                    .map_err(|source| EditorError::Image { path: path.clone(), source })?;
                let id = self.next_node_id(NodeKind::Image);
                self.add_node(NodeRecord::image(id, position, source.size, source.data_url))
            }
            Command::Connect { source, target } => {
                let edge_id = self.ids.edge_id(|candidate| {
                    self.navigator.surface().edges().iter().any(|edge| edge.id().as_str() == candidate)
                });
                self.apply(Op::AddEdge { edge_id, source, target })
            }
            Command::DeleteNode { node_id } => self.apply(Op::RemoveNode { node_id }),
            Command::DeleteEdge { edge_id } => self.apply(Op::RemoveEdge { edge_id }),
            Command::EditLabel { node_id, label } => {
                self.update_node(node_id, NodePatch { label: Some(label), ..NodePatch::default() })
            }
            Command::SetFontSize { node_id, font_size } => self
                .update_node(node_id, NodePatch { font_size: Some(font_size), ..NodePatch::default() }),
            Command::SetTextColor { node_id, color } => {
                self.update_node(node_id, NodePatch { text_color: Some(color), ..NodePatch::default() })
            }
            Command::Move { node_id, position } => {
                self.update_node(node_id, NodePatch { position: Some(position), ..NodePatch::default() })
            }
            Command::Resize { node_id, size } => {
                self.update_node(node_id, NodePatch { size: Some(size), ..NodePatch::default() })
            }
            Command::Select { node_id } => {
                if let Some(id) = &node_id {
                    if self.navigator.surface().find_node(id).is_none() {
                        return Err(ApplyError::NotFound { kind: ItemKind::Node, id: id.to_string() }
                            .into());
                    }
                }
                self.navigator.surface_mut().set_selection(node_id.clone());
                Ok(Outcome::Selected { node_id })
            }
        }
    }

    /// Indexes the live document for label search.
    pub fn search_index(&mut self) -> SearchIndex {
        SearchIndex::build(&mut self.navigator)
    }

    /// Navigates to the first indexed node with id `node_id` and focuses it.
    pub fn navigate_to_node(&mut self, node_id: &NodeId) -> Result<SearchEntry, EditorError> {
        let index = self.search_index();
        let Some(entry) = index.entries().iter().find(|entry| &entry.node_id == node_id) else {
            return Err(ResolveError::TargetMissing { node_id: node_id.clone() }.into());
        };
        navigate_to_node(&mut self.navigator, entry)?;
        Ok(entry.clone())
    }

    /// Applies several node changes as one edit.
    pub fn update_node(&mut self, node_id: NodeId, patch: NodePatch) -> Result<Outcome, EditorError> {
        self.apply(Op::UpdateNode { node_id, patch })
    }

    /// Captures the surface and returns the full document text without writing it.
    pub fn document_text(&mut self) -> Result<String, EditorError> {
        Ok(self.navigator.serialize()?)
    }

    fn save(&mut self) -> Result<Outcome, EditorError> {
        self.navigator.capture_current_level();
        self.file.save_state(self.navigator.state())?;
        Ok(Outcome::Saved { path: self.file.path().to_path_buf() })
    }

    fn after_load(&mut self) {
        self.search.hide();
        self.ids = IdAllocator::new();
        let state = self.navigator.state();
        for level in state.stack().iter().chain(std::iter::once(state.current())) {
            observe_level(&mut self.ids, level);
        }
        debug!(next_id = self.ids.peek(), "id allocator reseeded");
    }

    fn next_node_id(&mut self, kind: NodeKind) -> NodeId {
        let surface = self.navigator.surface();
        self.ids.node_id(kind, |candidate| {
            surface.nodes().iter().any(|node| node.id().as_str() == candidate)
        })
    }

    fn styled(&self, mut node: NodeRecord) -> NodeRecord {
        if let Some(font_size) = self.new_node_font_size {
            node.style_mut().set_font_size(Some(font_size));
        }
        node
    }

    fn add_node(&mut self, node: NodeRecord) -> Result<Outcome, EditorError> {
        let node_id = node.id().clone();
        let outcome = self.apply(Op::AddNode { node })?;
        self.navigator.surface_mut().set_selection(Some(node_id));
        Ok(outcome)
    }

    fn apply(&mut self, op: Op) -> Result<Outcome, EditorError> {
        let result = apply_ops(self.navigator.surface_mut(), std::slice::from_ref(&op))?;
        if result.delta.removed_levels > 0 {
            debug!(levels = result.delta.removed_levels, "owned sub-diagrams deleted");
        }
        Ok(Outcome::Edited { delta: result.delta })
    }
}

fn observe_level(ids: &mut IdAllocator, level: &DiagramLevel) {
    for node in level.nodes() {
        ids.observe(node.id().as_str());
        if let Some(sub_graph) = node.sub_graph() {
            observe_level(ids, sub_graph);
        }
    }
    for edge in level.edges() {
        ids.observe(edge.id().as_str());
    }
}
