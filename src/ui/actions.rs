//! Action 枚举定义 (Intent)
//!
//! 用户交互和存储事件转化为明确的语义化 Action

use chrono::{DateTime, Local};

use crate::models::VoiceMemo;

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveCursorUp,
    MoveCursorDown,

    SelectCurrent,  // Enter
    ClearSelection, // Esc

    OpenSettings,
    CloseSettings,

    // 来自存储
    RecordsChanged(Vec<VoiceMemo>),
    RemoteChanged(DateTime<Local>), // 在 UI 线程上接收的时间
}
