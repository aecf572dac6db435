// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::ids::{EdgeId, NodeId};

/// A directed connection between two nodes of the same level.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    extra: BTreeMap<String, serde_json::Value>,
}

impl EdgeRecord {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self { id, source, target, extra: BTreeMap::new() }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }

    pub fn extra(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut BTreeMap<String, serde_json::Value> {
        &mut self.extra
    }
}
