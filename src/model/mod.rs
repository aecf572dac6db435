// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A document is a tree of diagram levels: every level holds nodes and edges, and a rectangle
//! node may own one nested level (its sub-diagram).

pub mod edge;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod level;
pub mod node;

pub use edge::EdgeRecord;
pub use ids::{EdgeId, Id, IdAllocator, IdError, LevelId, NodeId, ROOT_LEVEL_ID};
pub use level::{DiagramLevel, ROOT_LABEL};
pub use node::{
    LabelStyle, LeafOwnershipError, NodeKind, NodeRecord, Point, Size, DEFAULT_FONT_SIZE,
    DEFAULT_NODE_LABEL, DEFAULT_RECTANGLE_SIZE, FONT_SIZES, MAX_IMAGE_SIZE, MIN_NODE_SIZE,
    TEXT_COLORS, UNNAMED_LABEL,
};
