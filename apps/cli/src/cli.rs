use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Log filter requested with `-v`, overriding the configuration file.
    pub fn log_filter(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty index from a JSON mapping
    Create {
        /// Index directory, or a name under the data directory
        index: PathBuf,
        /// Mapping file, `-` reads standard input
        mappings: PathBuf,
    },
    /// Add JSON documents, one per line
    Add {
        index: PathBuf,
        /// JSON lines file, standard input when omitted
        input: Option<PathBuf>,
        /// Commit once after the last document instead of after each one
        #[arg(long)]
        defer: bool,
    },
    /// Full-text search
    Search(SearchArgs),
    /// Exact value lookup
    Find(SearchArgs),
    /// Run an Elasticsearch-style aggregation request
    Aggregate {
        index: PathBuf,
        /// Aggregation request as JSON
        request: String,
        /// Restrict the aggregated documents, all documents when empty
        #[arg(short, long, default_value = "")]
        query: String,
        /// Fields searched by unqualified query terms
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },
    /// Print the number of committed documents
    Count { index: PathBuf },
    /// Merge all segments into one
    Merge { index: PathBuf },
    /// Delete an index
    Drop { index: PathBuf },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub index: PathBuf,
    pub query: String,
    /// Fields searched by unqualified query terms
    #[arg(short, long = "field")]
    pub fields: Vec<String>,
    /// Stored fields to print, all stored fields when omitted
    #[arg(short, long = "return")]
    pub returns: Vec<String>,
    #[arg(short, long)]
    pub limit: Option<usize>,
}
