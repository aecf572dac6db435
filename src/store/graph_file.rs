// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::codec::{decode_state, encode_state, DocumentError};
use crate::nav::NavigationState;

pub const DEFAULT_FILE_NAME: &str = "graph-data.json";
const DEFAULT_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("document error at {path:?}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Also flushes the file contents and the rename to stable storage where the platform
    /// allows it.
    Durable,
}

/// The document file the editor saves to and loads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl Default for GraphFile {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl GraphFile {
    /// A path without an extension gets `.json` appended.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: with_default_extension(path.into()), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load_text(&self) -> Result<String, StoreError> {
        fs::read_to_string(&self.path).map_err(|source| self.io_error(source))
    }

    pub fn save_text(&self, contents: &str) -> Result<(), StoreError> {
        write_atomic(&self.path, contents.as_bytes(), self.durability)
    }

    pub fn save_state(&self, state: &NavigationState) -> Result<(), StoreError> {
        let contents = encode_state(state).map_err(|source| self.document_error(source))?;
        self.save_text(&contents)?;
        info!(path = %self.path.display(), bytes = contents.len(), "document saved");
        Ok(())
    }

    pub fn load_state(&self) -> Result<NavigationState, StoreError> {
        let contents = self.load_text()?;
        let state = decode_state(&contents).map_err(|source| self.document_error(source))?;
        info!(path = %self.path.display(), depth = state.depth(), "document loaded");
        Ok(state)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    fn document_error(&self, source: DocumentError) -> StoreError {
        StoreError::Document { path: self.path.clone(), source }
    }
}

fn with_default_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() && path.file_name().is_some() {
        path.set_extension(DEFAULT_EXTENSION);
    }
    path
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    let io_err = |path: &Path, source| StoreError::Io { path: path.to_path_buf(), source };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(io_err(path, io::Error::other("path has no file name")));
    };
    fs::create_dir_all(&parent).map_err(|source| io_err(&parent, source))?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.is_dir() => {
            return Err(io_err(path, io::Error::other("path is a directory")));
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(io_err(path, source)),
    }

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path =
        parent.join(format!(".nestdraw.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| io_err(&tmp_path, source))?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(&tmp_path, source));
    }

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| io_err(&tmp_path, source))?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(path, source));
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(&parent).map_err(|source| io_err(&parent, source))?;
            dir.sync_all().map_err(|source| io_err(&parent, source))?;
        }
    }

    Ok(())
}
