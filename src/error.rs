//! 错误类型
//!
//! 存储层与配置层各自的错误枚举，保留底层错误作为 source

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 备忘录存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read memo store {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write memo store {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to parse memo store {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize memo store: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 配置文件错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write config file: {0}")]
    Write(#[source] io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
