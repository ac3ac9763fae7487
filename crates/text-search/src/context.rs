// text-search/src/context.rs
//! Live handle to an open index.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{RwLock, RwLockWriteGuard};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::registry::RegistrySlot;
use crate::schema::{register_tokenizers, FieldDefinition, IndexSchema};

/// An open index: schema, writer and reader.
///
/// `Context` is `Send + Sync`; share it between writer threads with `Arc` or
/// scoped threads. Dropping it releases the writer (discarding uncommitted
/// documents) and the directory claim.
pub struct Context {
    name: String,
    path: Option<PathBuf>,
    schema: IndexSchema,
    pub(crate) index: Index,
    /// `None` only once the context has been closed.
    writer: RwLock<Option<IndexWriter>>,
    pub(crate) reader: IndexReader,
    /// Documents added since the last commit.
    pending: AtomicU64,
    /// Commit opstamp the reader was last reloaded at.
    visible_opstamp: AtomicU64,
    search_limit: usize,
    // dropped last, after writer and reader
    _slot: Option<RegistrySlot>,
}

impl Context {
    pub(crate) fn open(
        name: String,
        path: Option<PathBuf>,
        index: Index,
        schema: IndexSchema,
        slot: Option<RegistrySlot>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let definitions: Vec<FieldDefinition> = schema.definitions().cloned().collect();
        register_tokenizers(&index, &definitions);

        let writer: IndexWriter = if config.writer_threads > 0 {
            index.writer_with_num_threads(config.writer_threads, config.writer_memory)?
        } else {
            index.writer(config.writer_memory)?
        };
        writer.set_merge_policy(config.merge.policy());
        let committed = writer.commit_opstamp();

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        tracing::info!(
            "opened text search index \"{}\" ({} fields, {} segments)",
            name,
            definitions.len(),
            index.searchable_segment_ids()?.len()
        );

        Ok(Self {
            name,
            path,
            schema,
            index,
            writer: RwLock::new(Some(writer)),
            reader,
            pending: AtomicU64::new(0),
            visible_opstamp: AtomicU64::new(committed),
            search_limit: config.search_limit,
            _slot: slot,
        })
    }

    /// Name used in error messages: the path as given, or the in-memory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index directory, `None` for in-memory indexes.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.schema.definitions()
    }

    /// Committed documents visible to searches.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Documents added but not yet committed.
    pub fn pending_docs(&self) -> u64 {
        self.pending.load(Ordering::Acquire)
    }

    /// Segments in the current reader snapshot.
    pub fn segment_count(&self) -> usize {
        self.reader.searcher().segment_readers().len()
    }

    pub(crate) fn default_limit(&self) -> usize {
        self.search_limit
    }

    pub(crate) fn writer_read(&self) -> parking_lot::RwLockReadGuard<'_, Option<IndexWriter>> {
        self.writer.read()
    }

    pub(crate) fn writer_write(&self) -> RwLockWriteGuard<'_, Option<IndexWriter>> {
        self.writer.write()
    }

    pub(crate) fn pending_counter(&self) -> &AtomicU64 {
        &self.pending
    }

    /// Whether commits up to `opstamp` are not yet visible to searches.
    pub(crate) fn is_stale(&self, opstamp: u64) -> bool {
        opstamp > self.visible_opstamp.load(Ordering::Acquire)
    }

    /// Reloads the reader so searches observe the commit at `opstamp`.
    pub(crate) fn reload_at(&self, opstamp: u64) -> Result<()> {
        self.reader.reload()?;
        self.visible_opstamp.fetch_max(opstamp, Ordering::AcqRel);
        Ok(())
    }

    pub(crate) fn closed_error(&self) -> Error {
        Error::Engine(tantivy::TantivyError::InvalidArgument(format!(
            "index writer of \"{}\" has been released",
            self.name
        )))
    }

    /// Releases the writer and waits for its merge threads.
    pub(crate) fn close(&self) -> Result<()> {
        let writer = self.writer.write().take();
        if let Some(writer) = writer {
            let discarded = self.pending.swap(0, Ordering::AcqRel);
            if discarded > 0 {
                tracing::warn!(
                    "closing \"{}\" with {} uncommitted documents",
                    self.name,
                    discarded
                );
            }
            writer.wait_merging_threads()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("pending", &self.pending_docs())
            .finish_non_exhaustive()
    }
}
