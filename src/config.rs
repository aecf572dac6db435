// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User configuration.
//!
//! Location: `<config dir>/nestdraw/config.toml` (for example `~/.config/nestdraw/config.toml`).
//! Every field is optional; a missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::{WriteDurability, DEFAULT_FILE_NAME};

const APP_DIR: &str = "nestdraw";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document opened when no file is given on the command line.
    pub file: PathBuf,
    pub durability: WriteDurability,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_filter: String,
    /// Where the terminal UI writes its log. The TUI logs nothing without it.
    pub log_file: Option<PathBuf>,
    /// Font size for new rectangle and text nodes.
    pub font_size: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_FILE_NAME),
            durability: WriteDurability::default(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_file: None,
            font_size: None,
        }
    }
}

impl Config {
    /// Default config file path.
    pub fn path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().context("Could not determine config directory")?.join(APP_DIR);
        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Loads from `path`, or from [`Config::path`] when `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::path()?, false),
        };
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
