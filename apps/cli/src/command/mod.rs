pub mod add;
pub mod aggregate;
pub mod create;
pub mod maintenance;
pub mod search;

use std::path::{Component, Path, PathBuf};

use crate::error::Result;

pub use add::AddCommand;
pub use aggregate::AggregateCommand;
pub use create::CreateCommand;
pub use maintenance::{CountCommand, DropCommand, MergeCommand};
pub use search::SearchCommand;

pub trait Command {
    fn execute(&self) -> Result<()>;
}

/// A bare name such as `notes` lives under the data directory; anything that
/// looks like a path is used as given.
pub fn resolve_index(index: &Path) -> PathBuf {
    let mut components = index.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => config::data_dir().join(index),
        _ => index.to_path_buf(),
    }
}
