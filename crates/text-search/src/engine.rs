// text-search/src/engine.rs
//! 索引生命周期 - creating, reopening and dropping indexes

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tantivy::Index;

use crate::config::{EngineConfig, IndexConfig};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::logging;
use crate::registry::{IndexRegistry, RegistrySlot};
use crate::schema::{build_schema, derive_schema, IndexSchema};

/// File holding the mapping an index was created with.
pub const MAPPINGS_FILE_NAME: &str = "mappings.json";

/// File Tantivy writes into every index directory.
const META_FILE_NAME: &str = "meta.json";

/// Entry point of the library.
///
/// An `Engine` carries the configuration every index is opened with and
/// remembers which directories have a live [`Context`]. Clones share that
/// state.
#[derive(Clone)]
pub struct Engine {
    config: Arc<EngineConfig>,
    registry: IndexRegistry,
}

impl Engine {
    /// Validates `config` and installs the log subscriber.
    pub fn init(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        logging::init(&config.log_filter)?;
        tracing::debug!("text search engine initialized: {:?}", config);
        Ok(Self {
            config: Arc::new(config),
            registry: IndexRegistry::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Creates an empty index in `path`.
    ///
    /// Fails with `AlreadyExists` when a context holds `path` or an index is
    /// already stored there.
    pub fn create_index(&self, path: impl AsRef<Path>, config: &IndexConfig) -> Result<Context> {
        let path = path.as_ref();
        let definitions = derive_schema(&config.mappings)?;
        let schema = build_schema(&definitions);

        let (dir, slot) = self.acquire(path)?;
        if dir.join(META_FILE_NAME).exists() {
            return Err(Error::AlreadyExists(path.to_path_buf()));
        }

        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join(MAPPINGS_FILE_NAME), &config.mappings)?;
        let index = Index::create_in_dir(&dir, schema.clone())?;
        tracing::info!("created text search index at {}", dir.display());

        let schema = IndexSchema::resolve(definitions, schema)?;
        Context::open(display_name(path), Some(dir), index, schema, Some(slot), &self.config)
    }

    /// Reopens an index created by [`Engine::create_index`].
    pub fn open_index(&self, path: impl AsRef<Path>) -> Result<Context> {
        let path = path.as_ref();
        let (dir, slot) = self.acquire(path)?;

        let mappings = std::fs::read_to_string(dir.join(MAPPINGS_FILE_NAME))?;
        let definitions = derive_schema(&mappings)?;
        let index = Index::open_in_dir(&dir)?;
        let schema = IndexSchema::resolve(definitions, index.schema())?;

        Context::open(display_name(path), Some(dir), index, schema, Some(slot), &self.config)
    }

    /// Creates an index that lives in memory only.
    pub fn create_in_memory(&self, name: &str, config: &IndexConfig) -> Result<Context> {
        let schema = IndexSchema::from_mappings(&config.mappings)?;
        let index = Index::create_in_ram(schema.tantivy_schema().clone());
        Context::open(name.to_string(), None, index, schema, None, &self.config)
    }

    /// Closes `context` and deletes its directory.
    ///
    /// Taking the context by value means no other thread can still be adding
    /// documents to it; uncommitted documents are discarded.
    pub fn drop_index(&self, context: Context) -> Result<()> {
        context.close()?;
        let name = context.name().to_string();
        let dir = context.path().map(Path::to_path_buf);
        drop(context);

        if let Some(dir) = dir {
            std::fs::remove_dir_all(&dir)?;
        }
        tracing::info!("dropped text search index \"{}\"", name);
        Ok(())
    }

    /// Deletes the index stored in `path`.
    ///
    /// Fails with `InUse` while a context holds the directory. A directory
    /// that holds no index is left untouched.
    pub fn drop_index_at(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = index_dir(path)?;
        let Some(_slot) = self.registry.try_acquire(&dir) else {
            return Err(Error::InUse(path.to_path_buf()));
        };

        if !dir.join(META_FILE_NAME).exists() && !dir.join(MAPPINGS_FILE_NAME).exists() {
            tracing::debug!("no text search index at {}, nothing to drop", dir.display());
            return Ok(());
        }

        std::fs::remove_dir_all(&dir)?;
        tracing::info!("dropped text search index at {}", dir.display());
        Ok(())
    }

    /// Number of directories currently held by a context.
    pub fn live_indexes(&self) -> usize {
        self.registry.live_count()
    }

    fn acquire(&self, path: &Path) -> Result<(PathBuf, RegistrySlot)> {
        let dir = index_dir(path)?;
        let slot = self
            .registry
            .try_acquire(&dir)
            .ok_or_else(|| Error::AlreadyExists(path.to_path_buf()))?;
        Ok((dir, slot))
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("live_indexes", &self.live_indexes())
            .finish()
    }
}

/// Canonical form of an index directory, so that every spelling of a path
/// (`..`, symlinks, relative) claims the same registry slot. A directory that
/// does not exist yet is resolved through its parent.
fn index_dir(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    if absolute.exists() {
        return Ok(std::fs::canonicalize(&absolute)?);
    }
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) if parent.exists() => {
            Ok(std::fs::canonicalize(parent)?.join(name))
        }
        _ => Ok(absolute),
    }
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
