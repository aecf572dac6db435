// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Nestdraw: a node-and-edge diagram editor where any rectangle can open into a diagram of its
//! own.
//!
//! The document is a tree of levels. [`nav`] keeps the root-to-current stack and the breadcrumb,
//! [`ops`] edits the level on the [`surface`], [`store`] reads and writes the JSON document,
//! and [`query`] searches labels across every level. [`editor`] ties them into one command
//! interface shared by the terminal UI ([`tui`]) and the MCP server ([`mcp`]).

pub mod config;
pub mod editor;
pub mod logging;
pub mod mcp;
pub mod model;
pub mod nav;
pub mod ops;
pub mod query;
pub mod store;
pub mod surface;
pub mod tui;
