//! 业务逻辑处理 (Update/Dispatch)
//!
//! 所有状态修改都经由 dispatch，在 UI 线程上按到达顺序执行

use chrono::{DateTime, Local};

use super::actions::Action;
use super::state::{App, AppMode, Selection};
use crate::models::VoiceMemo;

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveCursorUp => self.move_up(),
            Action::MoveCursorDown => self.move_down(),

            Action::SelectCurrent => self.select_current(),
            Action::ClearSelection => self.clear_selection(),

            Action::OpenSettings => self.mode = AppMode::Settings,
            Action::CloseSettings => self.mode = AppMode::Normal,

            Action::RecordsChanged(memos) => self.apply_records(memos),
            Action::RemoteChanged(now) => self.on_remote_change(now),
        }
        false
    }

    // ============ 导航相关 ============

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.memos.len() {
            self.cursor += 1;
        }
    }

    // ============ 选择相关 ============

    pub fn select_current(&mut self) {
        if let Some(memo) = self.memo_under_cursor() {
            self.selection = Selection::Selected(memo.id.clone());
            self.message = None;
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
        self.message = None;
    }

    // ============ 存储事件 ============

    /// 替换快照；选中项消失则清除选择
    pub fn apply_records(&mut self, memos: Vec<VoiceMemo>) {
        self.memos = memos;

        if let Selection::Selected(id) = &self.selection {
            if !self.memos.iter().any(|m| &m.id == id) {
                log::debug!("Selected memo {} no longer present", id);
                self.selection = Selection::None;
                self.message = Some("Selected memo was removed".to_string());
            }
        }

        if self.memos.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.memos.len() {
            self.cursor = self.memos.len() - 1;
        }
    }

    /// 远程变更：只刷新时间和计数，不做差异比较
    pub fn on_remote_change(&mut self, now: DateTime<Local>) {
        self.sync_status.refresh(now, self.memos.len());
        log::debug!("Sync status refreshed: {} memos", self.sync_status.synced_count);
    }
}
