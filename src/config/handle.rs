//! Shared config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! A request takes one snapshot up front and keeps reading it until it
//! finishes, so a reload never changes config under a running request.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                ConfigHandle (ArcSwap)                       │
//! │                                                             │
//! │  ┌─────────────┐     ┌─────────────┐     ┌─────────────┐    │
//! │  │  Request 1  │     │  Request 2  │     │  Deployer   │    │
//! │  └──────┬──────┘     └──────┬──────┘     └──────┬──────┘    │
//! │         │                   │                   │           │
//! │         ▼                   ▼                   ▼           │
//! │     snapshot()          snapshot()           reload()       │
//! │    (lock-free)         (lock-free)      (atomic replace)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let handle = ConfigHandle::load(Path::new("wiki.toml"))?;
//! let config = handle.snapshot();
//! let ctx = assembler.assemble(&request, config, VERSION);
//! ```

use super::SiteConfig;
use crate::{log, utils::hash};
use anyhow::Result;
use arc_swap::ArcSwap;
use std::{
    fs,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// Injectable, read-only view of the current [`SiteConfig`].
///
/// Constructed explicitly and handed to whatever needs config, instead of
/// a module-level global.
pub struct ConfigHandle {
    current: ArcSwap<SiteConfig>,
    /// Hash of the config file content last loaded (0 = not file-backed).
    content_hash: AtomicU64,
}

impl ConfigHandle {
    /// Wrap an already loaded config. [`reload`](Self::reload) re-reads
    /// `config.config_path` when it points at a file.
    pub fn new(config: SiteConfig) -> Self {
        let content_hash = fs::read(&config.config_path)
            .map(|content| hash::compute(&content))
            .unwrap_or_default();

        Self {
            current: ArcSwap::from_pointee(config),
            content_hash: AtomicU64::new(content_hash),
        }
    }

    /// Load and validate config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let config = SiteConfig::from_path(path)?;
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Get the current config as `Arc<SiteConfig>`.
    ///
    /// Thread-safe and wait-free. The returned snapshot is unaffected by
    /// later reloads.
    #[inline]
    pub fn snapshot(&self) -> Arc<SiteConfig> {
        self.current.load_full()
    }

    /// Replace config atomically if the backing file changed.
    ///
    /// Returns `true` if config was actually updated, `false` if content
    /// matches the last load.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated. The
    /// current snapshot is kept in that case.
    pub fn reload(&self) -> Result<bool> {
        let path = self.snapshot().config_path.clone();
        let content = fs::read(&path)?;

        let new_hash = hash::compute(&content);
        if new_hash == self.content_hash.load(Ordering::Relaxed) {
            return Ok(false);
        }

        let new_config = SiteConfig::from_path(&path)?;
        new_config.validate()?;

        self.current.store(Arc::new(new_config));
        self.content_hash.store(new_hash, Ordering::Relaxed);

        log!("config"; "reloaded {}", path.display());
        Ok(true)
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(SiteConfig::default())
    }
}
