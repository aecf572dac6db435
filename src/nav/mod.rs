// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Hierarchical navigation.
//!
//! One surface shows one level at a time. [`Navigator`] keeps the current level and the stack of
//! ancestor snapshots, swaps sub-diagrams in on descent and writes them back into their owning
//! node on ascent. [`linkage`] holds the tree helpers used by search and deletion.

pub mod linkage;
mod navigator;

pub use navigator::{Crumb, NavigationState, Navigator, PARENT_FALLBACK_LABEL};
