// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use thiserror::Error;

use super::node::NodeKind;

/// A stable identifier used across the model, the document format and the command surface.
///
/// Ids are opaque strings. The only enforced shape is that they are non-empty and contain no
/// control characters, since they are shown in the terminal UI and written into documents
/// produced by other tools.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id(&value)?;
        Ok(Self { value, _marker: PhantomData })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
    #[error("id must not contain control characters")]
    ContainsControl,
}

fn validate_id(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.chars().any(char::is_control) {
        return Err(IdError::ContainsControl);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeIdTag {}
pub type EdgeId = Id<EdgeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LevelIdTag {}
pub type LevelId = Id<LevelIdTag>;

pub const ROOT_LEVEL_ID: &str = "root";
const SUBGRAPH_PREFIX: &str = "subgraph-";

impl LevelId {
    pub fn root() -> Self {
        Self { value: ROOT_LEVEL_ID.to_owned(), _marker: PhantomData }
    }

    /// The id of the level owned by `owner`.
    pub fn for_owner(owner: &NodeId) -> Self {
        Self { value: format!("{SUBGRAPH_PREFIX}{owner}"), _marker: PhantomData }
    }
}

/// Hands out fresh node and edge ids for one document.
///
/// Ids are `<prefix>-<n>` with a single counter shared by all prefixes. The counter only moves
/// forward; [`IdAllocator::observe`] pushes it past ids that arrived from elsewhere (a loaded
/// document) so freshly allocated ids never repeat an existing suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    pub fn peek(&self) -> u64 {
        self.next
    }

    pub fn observe(&mut self, id: &str) {
        let Some((_, suffix)) = id.rsplit_once('-') else {
            return;
        };
        // A suffix of u64::MAX has no successor; allocation probes past it anyway.
        if let Some(after) = suffix.parse::<u64>().ok().and_then(|n| n.checked_add(1)) {
            self.next = self.next.max(after);
        }
    }

    /// Allocates a node id for `kind`, skipping any id for which `taken` returns true.
    pub fn node_id(&mut self, kind: NodeKind, taken: impl Fn(&str) -> bool) -> NodeId {
        let value = self.allocate(node_prefix(kind), taken);
        NodeId { value, _marker: PhantomData }
    }

    pub fn edge_id(&mut self, taken: impl Fn(&str) -> bool) -> EdgeId {
        let value = self.allocate("edge", taken);
        EdgeId { value, _marker: PhantomData }
    }

    /// The counter wraps at `u64::MAX`, so probing ends as long as some id is free.
    fn allocate(&mut self, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let candidate = format!("{prefix}-{}", self.next);
            self.next = self.next.wrapping_add(1);
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}

fn node_prefix(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Rectangle => "node",
        NodeKind::Text => "text",
        NodeKind::Image => "image",
    }
}

#[cfg(test)]
mod tests {
    use super::{Id, IdAllocator, IdError, LevelId, NodeId};
    use crate::model::NodeKind;

    #[test]
    fn id_rejects_empty() {
        let result: Result<Id<()>, _> = Id::new("");
        assert_eq!(result, Err(IdError::Empty));
    }

    #[test]
    fn id_rejects_control_characters() {
        let result: Result<Id<()>, _> = Id::new("a\nb");
        assert_eq!(result, Err(IdError::ContainsControl));
    }

    #[test]
    fn level_id_for_owner_uses_subgraph_prefix() {
        let owner = NodeId::new("n1").expect("node id");
        assert_eq!(LevelId::for_owner(&owner).as_str(), "subgraph-n1");
        assert_eq!(LevelId::root().as_str(), "root");
    }

    #[test]
    fn allocator_moves_past_observed_suffixes() {
        let mut ids = IdAllocator::new();
        ids.observe("node-41");
        ids.observe("edge-7");
        ids.observe("not-a-number");
        ids.observe("plain");

        let id = ids.node_id(NodeKind::Rectangle, |_| false);
        assert_eq!(id.as_str(), "node-42");
        assert_eq!(ids.edge_id(|_| false).as_str(), "edge-43");
    }

    #[test]
    fn allocator_skips_taken_ids() {
        let mut ids = IdAllocator::new();
        let id = ids.node_id(NodeKind::Text, |candidate| candidate == "text-0");
        assert_eq!(id.as_str(), "text-1");
    }

    #[test]
    fn observe_never_moves_counter_backwards() {
        let mut ids = IdAllocator::starting_at(100);
        ids.observe("image-3");
        assert_eq!(ids.peek(), 100);
    }

    #[test]
    fn observe_ignores_a_suffix_without_successor() {
        let mut ids = IdAllocator::starting_at(5);
        ids.observe(&format!("node-{}", u64::MAX));
        assert_eq!(ids.peek(), 5);
    }

    #[test]
    fn allocator_wraps_instead_of_repeating_a_taken_id() {
        let mut ids = IdAllocator::starting_at(u64::MAX);
        let last = format!("node-{}", u64::MAX);
        let id = ids.node_id(NodeKind::Rectangle, |candidate| candidate == last);
        assert_eq!(id.as_str(), "node-0");
        assert_eq!(ids.peek(), 1);
    }
}
