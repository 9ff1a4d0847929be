//! Talkie：语音备忘录终端查看器
//!
//! 从本地 TOML 存储读取备忘录，列表 + 详情展示，并在外部同步进程修改数据文件时刷新同步状态。

pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod ui;
