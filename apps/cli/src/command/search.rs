use text_search::{Engine, SearchInput, SearchOutput};

use super::{resolve_index, Command};
use crate::cli::SearchArgs;
use crate::error::{Result, WrapErr};

/// `search` and `find`: both print one JSON object per matched document.
pub struct SearchCommand {
    engine: Engine,
    args: SearchArgs,
    exact: bool,
}

impl SearchCommand {
    pub fn new(engine: Engine, args: SearchArgs, exact: bool) -> Self {
        Self {
            engine,
            args,
            exact,
        }
    }

    fn input(&self) -> SearchInput {
        let mut input = SearchInput::query(self.args.query.as_str())
            .with_search_fields(&self.args.fields)
            .with_return_fields(&self.args.returns);
        input.limit = self.args.limit;
        input
    }
}

impl Command for SearchCommand {
    fn execute(&self) -> Result<()> {
        let path = resolve_index(&self.args.index);
        let context = self
            .engine
            .open_index(&path)
            .with_context(|| format!("Open index {}", path.display()))?;

        let input = self.input();
        let result = if self.exact {
            context.find(&input)
        } else {
            context.search(&input)
        };
        let output: SearchOutput =
            result.with_context(|| format!("Query '{}'", self.args.query))?;

        for doc in &output.docs {
            println!("{:.3}\t{}", doc.score, doc.to_json());
        }
        tracing::debug!("{} documents matched", output.len());
        Ok(())
    }
}
