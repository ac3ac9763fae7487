use std::path::PathBuf;

use text_search::Engine;

use super::{resolve_index, Command};
use crate::error::{error, Result, WrapErr};

pub struct CountCommand {
    engine: Engine,
    index: PathBuf,
}

impl CountCommand {
    pub fn new(engine: Engine, index: PathBuf) -> Self {
        Self { engine, index }
    }
}

impl Command for CountCommand {
    fn execute(&self) -> Result<()> {
        let path = resolve_index(&self.index);
        let context = self
            .engine
            .open_index(&path)
            .with_context(|| format!("Open index {}", path.display()))?;
        println!("{}", context.num_docs());
        Ok(())
    }
}

pub struct MergeCommand {
    engine: Engine,
    index: PathBuf,
}

impl MergeCommand {
    pub fn new(engine: Engine, index: PathBuf) -> Self {
        Self { engine, index }
    }
}

impl Command for MergeCommand {
    fn execute(&self) -> Result<()> {
        let path = resolve_index(&self.index);
        let context = self
            .engine
            .open_index(&path)
            .with_context(|| format!("Open index {}", path.display()))?;

        let before = context.segment_count();
        context.merge_segments().context("Merge segments")?;
        println!("{} -> {} segments", before, context.segment_count());
        Ok(())
    }
}

pub struct DropCommand {
    engine: Engine,
    index: PathBuf,
}

impl DropCommand {
    pub fn new(engine: Engine, index: PathBuf) -> Self {
        Self { engine, index }
    }
}

impl Command for DropCommand {
    fn execute(&self) -> Result<()> {
        let path = resolve_index(&self.index);
        if !path.exists() {
            return Err(error!("no index at {}", path.display()));
        }
        self.engine
            .drop_index_at(&path)
            .with_context(|| format!("Drop index {}", path.display()))?;
        println!("dropped {}", path.display());
        Ok(())
    }
}
