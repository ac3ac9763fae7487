// config/src/lib.rs
//! 目录解析 - where the tools look for configuration and keep indexes

pub mod constants;

pub use etcetera::AppStrategy;
use etcetera::{AppStrategyArgs, choose_app_strategy};

use std::env;
use std::path::PathBuf;

pub fn create_strategy() -> std::result::Result<impl AppStrategy, etcetera::HomeDirError> {
    choose_app_strategy(AppStrategyArgs {
        top_level_domain: constants::TOP_LEVEL_DOMAIN.to_string(),
        author: constants::AUTHOR.to_string(),
        app_name: constants::APP_NAME.to_string(),
    })
}

/// `env_key` if set, else the directory `strategy_fn` picks, else a
/// directory under the system temp dir.
pub fn resolve_dir<S, F>(env_key: &str, strategy: &S, strategy_fn: F) -> PathBuf
where
    S: AppStrategy,
    F: FnOnce(&S) -> Option<PathBuf>,
{
    env::var_os(env_key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| strategy_fn(strategy))
        .unwrap_or_else(|| env::temp_dir().join(constants::APP_NAME))
}

/// Location of the engine configuration file.
pub fn config_file_path() -> PathBuf {
    let dir = match create_strategy() {
        Ok(strategy) => resolve_dir(constants::CONFIG_DIR_ENV, &strategy, |s| {
            Some(s.config_dir())
        }),
        Err(_) => fallback_dir(constants::CONFIG_DIR_ENV),
    };
    dir.join(constants::CONFIG_FILE_NAME)
}

/// Base directory of indexes given by name rather than by path.
pub fn data_dir() -> PathBuf {
    match create_strategy() {
        Ok(strategy) => resolve_dir(constants::DATA_DIR_ENV, &strategy, |s| Some(s.data_dir())),
        Err(_) => fallback_dir(constants::DATA_DIR_ENV),
    }
}

// no home directory
fn fallback_dir(env_key: &str) -> PathBuf {
    env::var_os(env_key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join(constants::APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_uses_the_tool_file_name() {
        let path = config_file_path();
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some(constants::CONFIG_FILE_NAME)
        );
    }
}
