//! CLI subcommand modules.
//!
//! This module contains the implementations for all equilens CLI subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use equilens::{EngineConfig, SeriesStore, Session};

pub(crate) mod bands;
pub(crate) mod breakdown;
pub(crate) mod export;
pub(crate) mod summary;
pub(crate) mod zoom;

/// Load a dashboard document.
pub(crate) fn load_store(path: &Path) -> Result<SeriesStore> {
    SeriesStore::from_path(path).with_context(|| format!("loading {}", path.display()))
}

/// Load a document and open a session over it.
pub(crate) fn open_session(path: &Path, config: EngineConfig) -> Result<Session> {
    Ok(Session::new(load_store(path)?, config))
}
