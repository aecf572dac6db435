// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::edge::EdgeRecord;
use super::ids::{EdgeId, NodeId};
use super::level::DiagramLevel;
use super::node::{NodeRecord, Point};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

pub(crate) fn rect(id: &str, label: &str) -> NodeRecord {
    NodeRecord::rectangle(nid(id), Point::new(0.0, 0.0), label)
}

pub(crate) fn text(id: &str, label: &str) -> NodeRecord {
    NodeRecord::text(nid(id), Point::new(0.0, 0.0), label)
}

pub(crate) fn edge(id: &str, source: &str, target: &str) -> EdgeRecord {
    EdgeRecord::new(eid(id), nid(source), nid(target))
}

/// Root with `A -> B`; `A` owns a sub-diagram holding `C`, and `C` owns one holding `D`.
pub(crate) fn nested_tree() -> DiagramLevel {
    let mut inner = DiagramLevel::new(super::LevelId::for_owner(&nid("c")), None);
    inner.nodes_mut().push(text("d", "D"));

    let mut c = rect("c", "C");
    c.set_sub_graph(inner).expect("rectangle");

    let mut middle = DiagramLevel::new(super::LevelId::for_owner(&nid("a")), None);
    middle.nodes_mut().push(c);

    let mut a = rect("a", "A");
    a.set_sub_graph(middle).expect("rectangle");

    let mut root = DiagramLevel::root();
    root.nodes_mut().push(a);
    root.nodes_mut().push(rect("b", "B"));
    root.edges_mut().push(edge("e1", "a", "b"));
    root
}
