// config/src/constants.rs
//! 常量定义

pub const TOP_LEVEL_DOMAIN: &str = "org";
pub const AUTHOR: &str = "text-search";
pub const APP_NAME: &str = "tsctl";

pub const CONFIG_FILE_NAME: &str = "tsctl.toml";

/// Overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "TEXT_SEARCH_CONFIG_DIR";

/// Overrides the directory relative index names resolve against.
pub const DATA_DIR_ENV: &str = "TEXT_SEARCH_DATA_DIR";
