// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! The MCP layer drives the same [`crate::editor::Editor`] the terminal UI uses: navigation,
//! level edits, label search and document persistence, one request at a time.

mod server;
mod types;

pub use server::NestdrawMcp;
