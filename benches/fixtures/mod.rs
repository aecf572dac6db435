// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use nestdraw::model::{DiagramLevel, EdgeId, EdgeRecord, LevelId, NodeId, NodeRecord, Point};
use nestdraw::nav::NavigationState;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("nestdraw_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// 6 nodes per level, 3 levels deep (258 nodes).
    Small,
    /// 8 nodes per level, 4 levels deep (4680 nodes).
    Medium,
}

impl Case {
    fn shape(self) -> (usize, usize) {
        match self {
            Self::Small => (6, 3),
            Self::Medium => (8, 4),
        }
    }
}

/// A document where every node above the last level is a rectangle owning a full sub-diagram,
/// with siblings chained by edges. Node ids encode their path (`n-3-0-5`).
pub fn document(case: Case) -> NavigationState {
    let (fanout, depth) = case.shape();
    let mut root = build_level(DiagramLevel::root(), "n", fanout, depth);
    root.set_label(Some("Root"));
    NavigationState::from_parts(root, Vec::new())
}

fn build_level(
    mut level: DiagramLevel,
    prefix: &str,
    fanout: usize,
    depth_left: usize,
) -> DiagramLevel {
    let mut ids = Vec::with_capacity(fanout);
    for i in 0..fanout {
        let node_id = NodeId::new(format!("{prefix}-{i}")).expect("node id");
        let position = Point::new(i as f64 * 200.0, 100.0 + (i % 2) as f64 * 120.0);
        let label = format!("Task {node_id}");
        let node = if depth_left > 1 {
            let mut node = NodeRecord::rectangle(node_id.clone(), position, label);
            let child = DiagramLevel::new(LevelId::for_owner(&node_id), None);
            let child = build_level(child, node_id.as_str(), fanout, depth_left - 1);
            node.set_sub_graph(child).expect("rectangle owns sub-diagram");
            node
        } else {
            NodeRecord::text(node_id.clone(), position, label)
        };
        level.nodes_mut().push(node);
        ids.push(node_id);
    }
    for (i, pair) in ids.windows(2).enumerate() {
        let edge_id = EdgeId::new(format!("{prefix}-e{i}")).expect("edge id");
        level.edges_mut().push(EdgeRecord::new(edge_id, pair[0].clone(), pair[1].clone()));
    }
    level
}

/// Id of the last node on the deepest level.
pub fn deepest_node_id(case: Case) -> NodeId {
    let (fanout, depth) = case.shape();
    let mut value = String::from("n");
    for _ in 0..depth {
        value.push_str(&format!("-{}", fanout - 1));
    }
    NodeId::new(value).expect("node id")
}
