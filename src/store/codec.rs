// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON document format.
//!
//! A document is `{ "currentGraph": Level, "graphStack": [Level, ...] }` where every level embeds
//! the sub-diagrams of its nodes. Decoding validates the whole document before anything is
//! handed back, so a rejected document never replaces a live state.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    DiagramLevel, EdgeId, EdgeRecord, IdError, LevelId, NodeId, NodeKind, NodeRecord, Point, Size,
};
use crate::nav::NavigationState;

const TYPE_RECTANGLE: &str = "rectangle-node";
const TYPE_TEXT: &str = "text-only";
const TYPE_IMAGE: &str = "image-node";
// Built-in renderer shape the original editor gives plain rectangles.
const TYPE_RECT_SHAPE: &str = "rect";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field} '{value}': {source}")]
    InvalidId {
        field: &'static str,
        value: String,
        #[source]
        source: IdError,
    },
    #[error("unknown node type '{value}' on node {node_id}")]
    UnknownNodeType { node_id: String, value: String },
    #[error("duplicate node id {node_id} in level {level}")]
    DuplicateNode { level: String, node_id: String },
    #[error("duplicate edge id {edge_id} in level {level}")]
    DuplicateEdge { level: String, edge_id: String },
    #[error("edge {edge_id} in level {level} references missing node {node_id}")]
    DanglingEdge { level: String, edge_id: String, node_id: String },
    #[error("{kind} node {node_id} cannot own a sub-diagram")]
    LeafOwnsSubgraph { node_id: String, kind: NodeKind },
    #[error("sub-diagram of node {node_id} names {found} as its owner")]
    OwnerMismatch { node_id: String, found: String },
    #[error("root level must not have a parent node (found {parent})")]
    RootHasParent { parent: String },
    #[error("level at depth {depth} is not owned by a rectangle of the level above")]
    BrokenStack { depth: usize },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentJson {
    current_graph: LevelJson,
    graph_stack: Vec<LevelJson>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LevelJson {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default)]
    parent_node: Option<String>,
    nodes: Vec<NodeJson>,
    edges: Vec<EdgeJson>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeJson {
    id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<SizeJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label_cfg: Option<LabelCfgJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_graph: Option<Box<LevelJson>>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

/// Sizes are written as `[width, height]`; a single number means a square.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum SizeJson {
    Pair([f64; 2]),
    Square(f64),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LabelCfgJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<LabelStyleJson>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LabelStyleJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fill: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EdgeJson {
    id: String,
    source: String,
    target: String,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

/// Encodes `state` as a pretty-printed document (two-space indentation).
pub fn encode_state(state: &NavigationState) -> Result<String, DocumentError> {
    let doc = DocumentJson {
        current_graph: level_to_json(state.current()),
        graph_stack: state.stack().iter().map(level_to_json).collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parses and validates a document into a fresh navigation state.
pub fn decode_state(text: &str) -> Result<NavigationState, DocumentError> {
    let doc: DocumentJson = serde_json::from_str(text)?;

    let stack = doc
        .graph_stack
        .into_iter()
        .map(|level| level_from_json(level, None))
        .collect::<Result<Vec<_>, _>>()?;
    let current = level_from_json(doc.current_graph, None)?;

    validate_chain(&current, &stack)?;
    Ok(NavigationState::from_parts(current, stack))
}

fn validate_chain(current: &DiagramLevel, stack: &[DiagramLevel]) -> Result<(), DocumentError> {
    let top = stack.first().unwrap_or(current);
    if let Some(parent) = top.parent_node() {
        return Err(DocumentError::RootHasParent { parent: parent.to_string() });
    }

    let chain = stack.iter().chain(std::iter::once(current)).collect::<Vec<_>>();
    for (depth, pair) in chain.windows(2).enumerate() {
        let [shallow, deep] = pair else {
            continue;
        };
        let owned = deep
            .parent_node()
            .and_then(|owner| shallow.node(owner))
            .is_some_and(|owner| owner.kind().can_own_subgraph());
        if !owned {
            return Err(DocumentError::BrokenStack { depth: depth + 1 });
        }
    }
    Ok(())
}

fn level_to_json(level: &DiagramLevel) -> LevelJson {
    LevelJson {
        id: Some(level.id().to_string()),
        label: level.label().map(str::to_owned),
        parent_node: level.parent_node().map(ToString::to_string),
        nodes: level.nodes().iter().map(node_to_json).collect(),
        edges: level.edges().iter().map(edge_to_json).collect(),
        extra: level.extra().clone(),
    }
}

fn node_to_json(node: &NodeRecord) -> NodeJson {
    let kind = node.shape().unwrap_or(match node.kind() {
        NodeKind::Rectangle => TYPE_RECTANGLE,
        NodeKind::Text => TYPE_TEXT,
        NodeKind::Image => TYPE_IMAGE,
    });
    let style = node.style();
    let has_style =
        style.font_size().is_some() || style.text_color().is_some() || !style.extra().is_empty();
    let label_cfg = (!style.is_empty()).then(|| LabelCfgJson {
        style: has_style.then(|| LabelStyleJson {
            font_size: style.font_size(),
            fill: style.text_color().map(str::to_owned),
            extra: style.extra().clone(),
        }),
        extra: style.config_extra().clone(),
    });

    NodeJson {
        id: node.id().to_string(),
        kind: Some(kind.to_owned()),
        x: node.position().x,
        y: node.position().y,
        size: node.size().map(|size| SizeJson::Pair([size.width, size.height])),
        label: node.label().map(str::to_owned),
        label_cfg,
        img: node.image_source().map(str::to_owned),
        sub_graph: node.sub_graph().map(|level| Box::new(level_to_json(level))),
        extra: node.extra().clone(),
    }
}

fn edge_to_json(edge: &EdgeRecord) -> EdgeJson {
    EdgeJson {
        id: edge.id().to_string(),
        source: edge.source().to_string(),
        target: edge.target().to_string(),
        extra: edge.extra().clone(),
    }
}

/// `owner` is the node a nested level belongs to; `None` for root and stack levels.
fn level_from_json(json: LevelJson, owner: Option<&NodeId>) -> Result<DiagramLevel, DocumentError> {
    let parent_node = json.parent_node.map(|raw| parse_id("parentNode", raw)).transpose()?;
    if let (Some(owner), Some(found)) = (owner, parent_node.as_ref()) {
        if owner != found {
            return Err(DocumentError::OwnerMismatch {
                node_id: owner.to_string(),
                found: found.to_string(),
            });
        }
    }
    let parent_node = parent_node.or_else(|| owner.cloned());

    let id = match json.id {
        Some(raw) => parse_id("level id", raw)?,
        None => match &parent_node {
            Some(parent) => LevelId::for_owner(parent),
            None => LevelId::root(),
        },
    };

    let mut level = DiagramLevel::new(id, json.label);
    level.set_parent_node(parent_node);
    *level.extra_mut() = json.extra;

    let mut node_ids = BTreeSet::new();
    for node_json in json.nodes {
        let node = node_from_json(node_json)?;
        if !node_ids.insert(node.id().clone()) {
            return Err(DocumentError::DuplicateNode {
                level: level.id().to_string(),
                node_id: node.id().to_string(),
            });
        }
        level.nodes_mut().push(node);
    }

    let mut edge_ids = BTreeSet::new();
    for edge_json in json.edges {
        let edge = edge_from_json(edge_json)?;
        if !edge_ids.insert(edge.id().clone()) {
            return Err(DocumentError::DuplicateEdge {
                level: level.id().to_string(),
                edge_id: edge.id().to_string(),
            });
        }
        for endpoint in [edge.source(), edge.target()] {
            if !node_ids.contains(endpoint) {
                return Err(DocumentError::DanglingEdge {
                    level: level.id().to_string(),
                    edge_id: edge.id().to_string(),
                    node_id: endpoint.to_string(),
                });
            }
        }
        level.edges_mut().push(edge);
    }

    Ok(level)
}

fn node_from_json(json: NodeJson) -> Result<NodeRecord, DocumentError> {
    let id: NodeId = parse_id("node id", json.id)?;
    let (kind, shape) = match json.kind.as_deref() {
        None | Some(TYPE_RECTANGLE) => (NodeKind::Rectangle, None),
        Some(TYPE_RECT_SHAPE) => (NodeKind::Rectangle, Some(TYPE_RECT_SHAPE)),
        Some(TYPE_TEXT) => (NodeKind::Text, None),
        Some(TYPE_IMAGE) => (NodeKind::Image, None),
        Some(other) => {
            return Err(DocumentError::UnknownNodeType {
                node_id: id.to_string(),
                value: other.to_owned(),
            })
        }
    };

    let mut node = NodeRecord::new(id, kind, Point::new(json.x, json.y));
    node.set_shape(shape);
    node.set_size(json.size.map(|size| match size {
        SizeJson::Pair([width, height]) => Size::new(width, height),
        SizeJson::Square(side) => Size::new(side, side),
    }));
    node.set_label(json.label);
    node.set_image_source(json.img);
    if let Some(cfg) = json.label_cfg {
        let target = node.style_mut();
        if let Some(style) = cfg.style {
            target.set_font_size(style.font_size);
            target.set_text_color(style.fill);
            *target.extra_mut() = style.extra;
        }
        *target.config_extra_mut() = cfg.extra;
    }
    *node.extra_mut() = json.extra;

    if let Some(sub_graph) = json.sub_graph {
        let level = level_from_json(*sub_graph, Some(node.id()))?;
        node.set_sub_graph(level).map_err(|err| DocumentError::LeafOwnsSubgraph {
            node_id: err.node_id.to_string(),
            kind: err.kind,
        })?;
    }
    Ok(node)
}

fn edge_from_json(json: EdgeJson) -> Result<EdgeRecord, DocumentError> {
    let id: EdgeId = parse_id("edge id", json.id)?;
    let source: NodeId = parse_id("edge source", json.source)?;
    let target: NodeId = parse_id("edge target", json.target)?;
    let mut edge = EdgeRecord::new(id, source, target);
    *edge.extra_mut() = json.extra;
    Ok(edge)
}

fn parse_id<T>(field: &'static str, value: String) -> Result<crate::model::Id<T>, DocumentError> {
    crate::model::Id::new(value.clone())
        .map_err(|source| DocumentError::InvalidId { field, value, source })
}
