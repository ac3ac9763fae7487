use std::io::Read;
use std::path::PathBuf;

use text_search::{Engine, IndexConfig};

use super::{resolve_index, Command};
use crate::error::{Result, WrapErr};

pub struct CreateCommand {
    engine: Engine,
    index: PathBuf,
    mappings: PathBuf,
}

impl CreateCommand {
    pub fn new(engine: Engine, index: PathBuf, mappings: PathBuf) -> Self {
        Self {
            engine,
            index,
            mappings,
        }
    }

    fn read_mappings(&self) -> Result<String> {
        if self.mappings.as_os_str() == "-" {
            let mut mappings = String::new();
            std::io::stdin()
                .read_to_string(&mut mappings)
                .context("Read mapping from standard input")?;
            return Ok(mappings);
        }
        std::fs::read_to_string(&self.mappings)
            .with_context(|| format!("Read mapping file {}", self.mappings.display()))
    }
}

impl Command for CreateCommand {
    fn execute(&self) -> Result<()> {
        let mappings = self.read_mappings()?;
        let path = resolve_index(&self.index);
        let context = self
            .engine
            .create_index(&path, &IndexConfig::new(mappings))
            .with_context(|| format!("Create index {}", path.display()))?;

        println!("created {}", path.display());
        for field in context.fields() {
            println!("  {:<20} {}", field.name, field.field_type.as_str());
        }
        Ok(())
    }
}
