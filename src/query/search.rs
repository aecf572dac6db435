// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{DiagramLevel, NodeId, NodeKind};
use crate::nav::linkage::{assemble_root, walk};
use crate::nav::Navigator;
use crate::surface::RenderSurface;

/// Separator used when a path is shown as one string.
pub const PATH_SEPARATOR: &str = " / ";

/// One node of the document together with the labels of the levels leading to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub node_id: NodeId,
    pub label: Option<String>,
    pub kind: NodeKind,
    /// Ancestor labels, starting with `"Root"`.
    pub path: Vec<String>,
}

impl SearchEntry {
    /// Depth of the level holding the node (0 for the root).
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn path_display(&self) -> String {
        self.path.join(PATH_SEPARATOR)
    }

    fn matches(&self, needle: &str) -> bool {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label.to_lowercase().contains(needle),
            _ => false,
        }
    }
}

/// Flat, traversal-ordered list of every node in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    /// Indexes the live document, including edits still pending on the surface.
    pub fn build<S: RenderSurface>(navigator: &mut Navigator<S>) -> Self {
        navigator.capture_current_level();
        let root = assemble_root(navigator.current(), navigator.stack());
        Self::from_root(&root)
    }

    pub fn from_root(root: &DiagramLevel) -> Self {
        let mut entries = Vec::new();
        walk(root, &mut |node, path| {
            entries.push(SearchEntry {
                node_id: node.id().clone(),
                label: node.label().map(str::to_owned),
                kind: node.kind(),
                path: path.to_vec(),
            });
        });
        Self { entries }
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring match on labels, in traversal order.
    ///
    /// A blank query matches every entry, labelled or not. Other queries are matched as typed,
    /// surrounding whitespace included.
    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        if query.trim().is_empty() {
            return self.entries.iter().collect();
        }
        let needle = query.to_lowercase();
        self.entries.iter().filter(|entry| entry.matches(&needle)).collect()
    }
}
