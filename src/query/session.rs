// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::debug;

use super::resolver::{navigate_to_node, ResolveError};
use super::search::{SearchEntry, SearchIndex};
use crate::nav::Navigator;
use crate::surface::RenderSurface;

/// State of the interactive label search.
///
/// Every query change re-indexes the live document, so results always reflect the latest edits.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    visible: bool,
    query: String,
    results: Vec<SearchEntry>,
    selected: usize,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchEntry] {
        &self.results
    }

    /// Index of the highlighted result, if there are any results.
    pub fn selected_index(&self) -> Option<usize> {
        (!self.results.is_empty()).then_some(self.selected)
    }

    pub fn selected(&self) -> Option<&SearchEntry> {
        self.results.get(self.selected)
    }

    /// Opens the search with an empty query, listing every node.
    pub fn show<S: RenderSurface>(&mut self, navigator: &mut Navigator<S>) {
        self.visible = true;
        self.set_query(navigator, "");
    }

    pub fn set_query<S: RenderSurface>(&mut self, navigator: &mut Navigator<S>, query: &str) {
        let index = SearchIndex::build(navigator);
        self.query = query.to_owned();
        self.results = index.search(query).into_iter().cloned().collect();
        self.selected = 0;
        debug!(query, results = self.results.len(), "search updated");
    }

    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1) % self.results.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.results.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.results.len() - 1);
        }
    }

    /// Navigates to the highlighted result and closes the search.
    ///
    /// Returns `Ok(None)` when there is nothing to navigate to.
    pub fn confirm<S: RenderSurface>(
        &mut self,
        navigator: &mut Navigator<S>,
    ) -> Result<Option<SearchEntry>, ResolveError> {
        let Some(entry) = self.selected().cloned() else {
            return Ok(None);
        };
        let result = navigate_to_node(navigator, &entry);
        self.hide();
        result.map(|()| Some(entry))
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.query.clear();
        self.results.clear();
        self.selected = 0;
    }
}
