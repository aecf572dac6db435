// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use super::ids::{LevelId, NodeId};
use super::level::DiagramLevel;

pub const DEFAULT_NODE_LABEL: &str = "Right click to edit";
pub const UNNAMED_LABEL: &str = "Unnamed";
pub const DEFAULT_RECTANGLE_SIZE: Size = Size { width: 160.0, height: 80.0 };
pub const MIN_NODE_SIZE: f64 = 30.0;
pub const MAX_IMAGE_SIZE: f64 = 200.0;

/// Font sizes offered by the editor, smallest first.
pub const FONT_SIZES: [f64; 4] = [12.0, 16.0, 30.0, 40.0];
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Named text colors offered by the editor.
pub const TEXT_COLORS: [(&str, &str); 6] = [
    ("Black", "#333333"),
    ("Blue", "#1890ff"),
    ("Green", "#52c41a"),
    ("Red", "#f5222d"),
    ("Purple", "#722ed1"),
    ("Orange", "#faad14"),
];

/// The visual kind of a node. Only rectangles may own a sub-diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Rectangle,
    Text,
    Image,
}

impl NodeKind {
    pub fn can_own_subgraph(self) -> bool {
        matches!(self, Self::Rectangle)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamps both sides to the minimum node size.
    pub fn clamped(self) -> Self {
        Self { width: self.width.max(MIN_NODE_SIZE), height: self.height.max(MIN_NODE_SIZE) }
    }

    /// Scales down so the longer side fits `max`, keeping the aspect ratio.
    pub fn fit_within(self, max: f64) -> Self {
        let Self { mut width, mut height } = self;
        if width > height {
            if width > max {
                height *= max / width;
                width = max;
            }
        } else if height > max {
            width *= max / height;
            height = max;
        }
        Self { width, height }
    }
}

/// Per-node label overrides. Unset fields fall back to the editor defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelStyle {
    font_size: Option<f64>,
    text_color: Option<String>,
    extra: BTreeMap<String, serde_json::Value>,
    config_extra: BTreeMap<String, serde_json::Value>,
}

impl LabelStyle {
    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    pub fn set_font_size(&mut self, font_size: Option<f64>) {
        self.font_size = font_size;
    }

    pub fn text_color(&self) -> Option<&str> {
        self.text_color.as_deref()
    }

    pub fn set_text_color<T: Into<String>>(&mut self, text_color: Option<T>) {
        self.text_color = text_color.map(Into::into);
    }

    /// Style attributes such as `fontFamily` that are kept but not interpreted.
    pub fn extra(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut BTreeMap<String, serde_json::Value> {
        &mut self.extra
    }

    /// Label settings outside the style block, such as `position` or `offset`.
    pub fn config_extra(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.config_extra
    }

    pub fn config_extra_mut(&mut self) -> &mut BTreeMap<String, serde_json::Value> {
        &mut self.config_extra
    }

    pub fn is_empty(&self) -> bool {
        self.font_size.is_none()
            && self.text_color.is_none()
            && self.extra.is_empty()
            && self.config_extra.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} node {node_id} cannot own a sub-diagram")]
pub struct LeafOwnershipError {
    pub node_id: NodeId,
    pub kind: NodeKind,
}

/// One visual node of a level.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    id: NodeId,
    kind: NodeKind,
    shape: Option<String>,
    position: Point,
    size: Option<Size>,
    label: Option<String>,
    style: LabelStyle,
    image_source: Option<String>,
    sub_graph: Option<Box<DiagramLevel>>,
    extra: BTreeMap<String, serde_json::Value>,
}

impl NodeRecord {
    pub fn new(id: NodeId, kind: NodeKind, position: Point) -> Self {
        Self {
            id,
            kind,
            shape: None,
            position,
            size: None,
            label: None,
            style: LabelStyle::default(),
            image_source: None,
            sub_graph: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn rectangle(id: NodeId, position: Point, label: impl Into<String>) -> Self {
        let mut node = Self::new(id, NodeKind::Rectangle, position);
        node.size = Some(DEFAULT_RECTANGLE_SIZE);
        node.label = Some(label.into());
        node
    }

    pub fn text(id: NodeId, position: Point, label: impl Into<String>) -> Self {
        let mut node = Self::new(id, NodeKind::Text, position);
        node.label = Some(label.into());
        node
    }

    pub fn image(id: NodeId, position: Point, size: Size, source: impl Into<String>) -> Self {
        let mut node = Self::new(id, NodeKind::Image, position);
        node.size = Some(size);
        node.image_source = Some(source.into());
        node
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Renderer shape name the node was loaded with (`rect` for example). `None` means the
    /// editor's own name for the kind.
    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    pub fn set_shape<T: Into<String>>(&mut self, shape: Option<T>) {
        self.shape = shape.map(Into::into);
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn set_size(&mut self, size: Option<Size>) {
        self.size = size;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    /// The label as shown in breadcrumbs and search paths.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => UNNAMED_LABEL,
        }
    }

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut LabelStyle {
        &mut self.style
    }

    pub fn image_source(&self) -> Option<&str> {
        self.image_source.as_deref()
    }

    pub fn set_image_source<T: Into<String>>(&mut self, source: Option<T>) {
        self.image_source = source.map(Into::into);
    }

    pub fn sub_graph(&self) -> Option<&DiagramLevel> {
        self.sub_graph.as_deref()
    }

    pub fn sub_graph_mut(&mut self) -> Option<&mut DiagramLevel> {
        self.sub_graph.as_deref_mut()
    }

    /// Installs `level` as this node's sub-diagram, rewriting its owner link to this node.
    pub fn set_sub_graph(&mut self, mut level: DiagramLevel) -> Result<(), LeafOwnershipError> {
        if !self.kind.can_own_subgraph() {
            return Err(LeafOwnershipError { node_id: self.id.clone(), kind: self.kind });
        }
        level.set_parent_node(Some(self.id.clone()));
        self.sub_graph = Some(Box::new(level));
        Ok(())
    }

    pub fn take_sub_graph(&mut self) -> Option<DiagramLevel> {
        self.sub_graph.take().map(|level| *level)
    }

    /// Returns the sub-diagram, creating an empty one first if this node was never entered.
    pub fn ensure_sub_graph(&mut self) -> Result<&mut DiagramLevel, LeafOwnershipError> {
        if self.sub_graph.is_none() {
            let level = DiagramLevel::new(LevelId::for_owner(&self.id), None);
            self.set_sub_graph(level)?;
        }
        match self.sub_graph.as_deref_mut() {
            Some(level) => Ok(level),
            None => unreachable!("sub-diagram was just installed"),
        }
    }

    /// Attributes this crate does not interpret, kept so documents round-trip.
    pub fn extra(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut BTreeMap<String, serde_json::Value> {
        &mut self.extra
    }
}
