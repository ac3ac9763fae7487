use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use text_search::{DocumentInput, Engine};

use super::{resolve_index, Command};
use crate::error::{Result, WrapErr};

pub struct AddCommand {
    engine: Engine,
    index: PathBuf,
    input: Option<PathBuf>,
    defer: bool,
}

impl AddCommand {
    pub fn new(engine: Engine, index: PathBuf, input: Option<PathBuf>, defer: bool) -> Self {
        Self {
            engine,
            index,
            input,
            defer,
        }
    }

    fn reader(&self) -> Result<Box<dyn BufRead>> {
        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Open documents file {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            None => Ok(Box::new(std::io::stdin().lock())),
        }
    }
}

impl Command for AddCommand {
    fn execute(&self) -> Result<()> {
        let path = resolve_index(&self.index);
        let context = self
            .engine
            .open_index(&path)
            .with_context(|| format!("Open index {}", path.display()))?;

        let mut added = 0u64;
        for (line_no, line) in self.reader()?.lines().enumerate() {
            let line = line.context("Read documents")?;
            if line.trim().is_empty() {
                continue;
            }
            context
                .add_document(&DocumentInput::new(line), self.defer)
                .with_context(|| format!("Add document on line {}", line_no + 1))?;
            added += 1;
        }
        context.commit().context("Commit documents")?;

        tracing::info!("added {} documents to {}", added, path.display());
        println!("added {added} documents, {} in index", context.num_docs());
        Ok(())
    }
}
