// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Label search and path navigation across the whole level hierarchy.

pub mod resolver;
pub mod search;
pub mod session;

pub use resolver::{navigate_to_node, ResolveError};
pub use search::{SearchEntry, SearchIndex, PATH_SEPARATOR};
pub use session::SearchSession;
