// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for documents on disk.
//!
//! [`codec`] turns a navigation state into the JSON document format and back; [`graph_file`]
//! reads and atomically writes the document file used by both the TUI and the MCP server.

pub mod codec;
pub mod graph_file;

pub use codec::{decode_state, encode_state, DocumentError};
pub use graph_file::{GraphFile, StoreError, WriteDurability, DEFAULT_FILE_NAME};
