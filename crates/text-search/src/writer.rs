// text-search/src/writer.rs
//! 写入模块 - document ingestion, commit and segment merging
//!
//! Adds hold the writer lock in shared mode, Tantivy's `add_document` is
//! itself thread safe, so concurrent adds proceed in parallel. `commit` and
//! `merge_segments` take the lock exclusively: a commit therefore waits for
//! adds already in flight and covers exactly the documents buffered before it.

use std::sync::atomic::Ordering;
use std::time::Duration;

use tantivy::TantivyError;

use crate::context::Context;
use crate::error::Result;
use crate::models::DocumentInput;
use crate::schema::to_document;

const MERGE_ATTEMPTS: u32 = 5;
const MERGE_BACKOFF: Duration = Duration::from_millis(20);

impl Context {
    /// Validates and buffers one document.
    ///
    /// With `defer_commit == false` the document is committed before this call
    /// returns. Otherwise it stays invisible until the next [`Context::commit`].
    pub fn add_document(&self, input: &DocumentInput, defer_commit: bool) -> Result<()> {
        let document = to_document(self.schema(), &input.data)?;

        {
            let guard = self.writer_read();
            let writer = guard.as_ref().ok_or_else(|| self.closed_error())?;
            let opstamp = writer.add_document(document)?;
            self.pending_counter().fetch_add(1, Ordering::AcqRel);
            tracing::trace!("buffered document into \"{}\" (opstamp {})", self.name(), opstamp);
        }

        if !defer_commit {
            self.commit()?;
        }
        Ok(())
    }

    /// Makes every buffered document visible.
    ///
    /// Returns once readers on any thread observe the new documents. A commit
    /// with nothing buffered does nothing, unless an earlier commit reached
    /// the index but failed to reload the reader; that reload is retried.
    pub fn commit(&self) -> Result<()> {
        let mut guard = self.writer_write();
        let writer = guard.as_mut().ok_or_else(|| self.closed_error())?;

        let pending = self.pending_counter().load(Ordering::Acquire);
        if pending == 0 {
            let committed = writer.commit_opstamp();
            if self.is_stale(committed) {
                self.reload_at(committed)?;
                tracing::debug!("reloaded \"{}\" at opstamp {}", self.name(), committed);
            } else {
                tracing::debug!("nothing to commit in \"{}\"", self.name());
            }
            return Ok(());
        }

        let opstamp = writer.commit()?;
        self.reload_at(opstamp)?;
        self.pending_counter().store(0, Ordering::Release);

        tracing::debug!(
            "committed {} documents to \"{}\" (opstamp {})",
            pending,
            self.name(),
            opstamp
        );
        Ok(())
    }

    /// Merges every searchable segment into one and waits for the merge.
    ///
    /// Search results are unchanged; only the segment layout is. Documents
    /// added concurrently are not blocked beyond scheduling the merge.
    ///
    /// A background merge may claim or replace segments between listing them
    /// and starting the merge, in which case Tantivy rejects the batch. The
    /// merge is then retried on a fresh listing and finally left to the merge
    /// policy; neither case is an error.
    pub fn merge_segments(&self) -> Result<()> {
        for attempt in 1..=MERGE_ATTEMPTS {
            let (segments, merge) = {
                let mut guard = self.writer_write();
                let writer = guard.as_mut().ok_or_else(|| self.closed_error())?;
                let segment_ids = self.index.searchable_segment_ids()?;
                if segment_ids.len() < 2 {
                    return Ok(());
                }
                (segment_ids.len(), writer.merge(&segment_ids))
            };

            match merge.wait() {
                Ok(_) => {
                    self.reader.reload()?;
                    tracing::info!("merged {} segments of \"{}\"", segments, self.name());
                    return Ok(());
                }
                Err(TantivyError::InvalidArgument(reason)) => {
                    tracing::debug!(
                        "merge of \"{}\" rejected (attempt {}): {}",
                        self.name(),
                        attempt,
                        reason
                    );
                    std::thread::sleep(MERGE_BACKOFF * attempt);
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.reader.reload()?;
        tracing::debug!(
            "segments of \"{}\" are busy merging, leaving them to the merge policy",
            self.name()
        );
        Ok(())
    }
}
