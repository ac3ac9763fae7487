mod cli;
mod command;
mod error;

use error::WrapErr;

use clap::Parser;

fn main() -> error::Result<()> {
    color_eyre::install()?;

    let command_line = cli::Cli::parse();
    let config_path = command_line
        .config
        .clone()
        .unwrap_or_else(config::config_file_path);
    let mut engine_config = text_search::EngineConfig::load_or_default(&config_path);
    if let Some(filter) = command_line.log_filter() {
        engine_config.log_filter = filter.to_string();
    }
    let engine = text_search::Engine::init(engine_config).context("Initialize text search engine")?;
    tracing::debug!("configuration file: {}", config_path.display());

    let cmd: Box<dyn command::Command> = match command_line.command {
        cli::Commands::Create { index, mappings } => {
            Box::new(command::CreateCommand::new(engine, index, mappings))
        }
        cli::Commands::Add { index, input, defer } => {
            Box::new(command::AddCommand::new(engine, index, input, defer))
        }
        cli::Commands::Search(args) => Box::new(command::SearchCommand::new(engine, args, false)),
        cli::Commands::Find(args) => Box::new(command::SearchCommand::new(engine, args, true)),
        cli::Commands::Aggregate { index, request, query, fields } => Box::new(
            command::AggregateCommand::new(engine, index, request, query, fields),
        ),
        cli::Commands::Count { index } => Box::new(command::CountCommand::new(engine, index)),
        cli::Commands::Merge { index } => Box::new(command::MergeCommand::new(engine, index)),
        cli::Commands::Drop { index } => Box::new(command::DropCommand::new(engine, index)),
    };
    cmd.execute()
}
