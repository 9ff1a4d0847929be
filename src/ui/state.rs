//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::models::VoiceMemo;

/// 应用状态
pub struct App {
    pub memos: Vec<VoiceMemo>, // 最近一次订阅快照，已排序
    pub cursor: usize,
    pub selection: Selection,
    pub sync_status: SyncStatus,
    pub mode: AppMode,
    pub config: Config,
    pub data_path: PathBuf,
    pub message: Option<String>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Settings,
}

/// 当前选中的备忘录
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(String), // memo id
}

/// 同步状态（仅存在于视图中）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncStatus {
    pub last_sync: Option<DateTime<Local>>,
    pub synced_count: usize,
}

impl SyncStatus {
    pub fn refresh(&mut self, now: DateTime<Local>, count: usize) {
        self.last_sync = Some(now);
        self.synced_count = count;
    }
}

impl App {
    /// 创建新的应用实例，视图出现即刷新一次同步状态
    pub fn new(
        config: Config,
        data_path: PathBuf,
        memos: Vec<VoiceMemo>,
        now: DateTime<Local>,
    ) -> Self {
        let mut app = Self {
            memos,
            cursor: 0,
            selection: Selection::None,
            sync_status: SyncStatus::default(),
            mode: AppMode::Normal,
            config,
            data_path,
            message: None,
        };
        app.sync_status.refresh(now, app.memos.len());
        app
    }

    /// 光标所在的备忘录
    pub fn memo_under_cursor(&self) -> Option<&VoiceMemo> {
        self.memos.get(self.cursor)
    }

    /// 获取当前选中的备忘录
    pub fn selected_memo(&self) -> Option<&VoiceMemo> {
        match &self.selection {
            Selection::Selected(id) => self.memos.iter().find(|m| &m.id == id),
            Selection::None => None,
        }
    }

    pub fn is_selected(&self, memo: &VoiceMemo) -> bool {
        matches!(&self.selection, Selection::Selected(id) if *id == memo.id)
    }
}
