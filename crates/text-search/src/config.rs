// text-search/src/config.rs
//! 配置模块

use std::path::Path;

use serde::{Deserialize, Serialize};
use tantivy::merge_policy::{LogMergePolicy, MergePolicy, NoMergePolicy};

use crate::error::{Error, Result};

/// Smallest writer arena Tantivy accepts per indexing thread.
pub const MIN_WRITER_MEMORY_PER_THREAD: usize = 15_000_000;

/// Largest writer arena Tantivy accepts per indexing thread.
pub const MAX_WRITER_MEMORY_PER_THREAD: usize = 4_000_000_000;

/// Process-level engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_filter: String,
    /// Total indexing arena of one writer, in bytes.
    pub writer_memory: usize,
    /// Indexing threads per writer, 0 lets Tantivy decide.
    pub writer_threads: usize,
    /// Result limit when a search does not carry one.
    pub search_limit: usize,
    pub merge: MergeConfig,
}

/// Background segment merge settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub enabled: bool,
    /// Segments of a level that trigger a merge.
    pub min_num_segments: usize,
    /// Segments above this many documents are left alone.
    pub max_docs_before_merge: usize,
}

/// Index creation settings: the JSON mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndexConfig {
    pub mappings: String,
}

impl IndexConfig {
    pub fn new(mappings: impl Into<String>) -> Self {
        Self {
            mappings: mappings.into(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            writer_memory: 50_000_000,
            writer_threads: 0,
            search_limit: 1000,
            merge: MergeConfig::default(),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_num_segments: 8,
            max_docs_before_merge: 10_000_000,
        }
    }
}

impl MergeConfig {
    pub fn policy(&self) -> Box<dyn MergePolicy> {
        if !self.enabled {
            return Box::new(NoMergePolicy);
        }
        let mut policy = LogMergePolicy::default();
        policy.set_min_num_segments(self.min_num_segments);
        policy.set_max_docs_before_merge(self.max_docs_before_merge);
        Box::new(policy)
    }
}

impl EngineConfig {
    /// 从 TOML 文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 尝试加载配置，失败则使用默认值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("ignoring configuration file: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let threads = self.writer_threads.max(1);
        let per_thread = self.writer_memory / threads;
        if per_thread < MIN_WRITER_MEMORY_PER_THREAD {
            return Err(Error::Config(format!(
                "writer_memory must be at least {} bytes per writer thread, got {} for {} thread(s)",
                MIN_WRITER_MEMORY_PER_THREAD, self.writer_memory, threads
            )));
        }
        if per_thread > MAX_WRITER_MEMORY_PER_THREAD {
            return Err(Error::Config(format!(
                "writer_memory must not exceed {} bytes per writer thread",
                MAX_WRITER_MEMORY_PER_THREAD
            )));
        }
        if self.search_limit == 0 {
            return Err(Error::Config("search_limit must be greater than 0".to_string()));
        }
        if self.merge.enabled && self.merge.min_num_segments < 2 {
            return Err(Error::Config(
                "merge.min_num_segments must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}
