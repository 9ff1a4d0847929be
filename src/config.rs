//! 用户配置
//!
//! 存放于 `~/.config/talkie/config.toml`，缺失时写入默认值

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 备忘录数据文件，未设置时使用数据目录下的 memos.toml
    pub data_file: Option<PathBuf>,
    /// 远程变更轮询间隔（毫秒）
    pub remote_poll_interval_ms: u64,
    /// 日志级别，RUST_LOG 优先
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            remote_poll_interval_ms: 1000,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// 默认配置文件路径
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("talkie")
            .join("config.toml")
    }

    /// 从文件加载配置，文件不存在时写入默认配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                config.save(path)?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::Read(e)),
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(ConfigError::Write)
    }

    /// 解析数据文件路径
    pub fn resolve_data_file(&self, data_dir: &Path) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| data_dir.join("memos.toml"))
    }
}
