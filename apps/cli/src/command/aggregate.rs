use std::path::PathBuf;

use text_search::{Engine, SearchInput};

use super::{resolve_index, Command};
use crate::error::{Result, WrapErr};

pub struct AggregateCommand {
    engine: Engine,
    index: PathBuf,
    request: String,
    query: String,
    fields: Vec<String>,
}

impl AggregateCommand {
    pub fn new(
        engine: Engine,
        index: PathBuf,
        request: String,
        query: String,
        fields: Vec<String>,
    ) -> Self {
        Self {
            engine,
            index,
            request,
            query,
            fields,
        }
    }
}

impl Command for AggregateCommand {
    fn execute(&self) -> Result<()> {
        let path = resolve_index(&self.index);
        let context = self
            .engine
            .open_index(&path)
            .with_context(|| format!("Open index {}", path.display()))?;

        let input = SearchInput::query(self.query.as_str())
            .with_search_fields(&self.fields)
            .with_aggregation(self.request.as_str());
        let output = context.aggregate(&input).context("Run aggregation")?;

        println!("{}", serde_json::to_string_pretty(&output.data)?);
        Ok(())
    }
}
