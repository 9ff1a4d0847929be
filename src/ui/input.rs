//! 事件映射 (Input -> Action)
//!
//! 将按键事件和存储事件转换为 Action

use chrono::{DateTime, Local};
use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};
use crate::storage::StoreEvent;

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveCursorDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveCursorUp),
            KeyCode::Enter => Some(Action::SelectCurrent),
            KeyCode::Esc => Some(Action::ClearSelection),
            KeyCode::Char('s') => Some(Action::OpenSettings),
            _ => None,
        },
        AppMode::Settings => match key {
            KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q') => Some(Action::CloseSettings),
            _ => None,
        },
    }
}

/// 存储事件 -> Action，`now` 为 UI 线程取出事件的时间
pub fn store_action(event: StoreEvent, now: DateTime<Local>) -> Action {
    match event {
        StoreEvent::RecordsChanged(memos) => Action::RecordsChanged(memos),
        StoreEvent::RemoteChange => Action::RemoteChanged(now),
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match get_action(&app.mode, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_mode_keys() {
        let mode = AppMode::Normal;
        assert_eq!(get_action(&mode, KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(get_action(&mode, KeyCode::Down), Some(Action::MoveCursorDown));
        assert_eq!(get_action(&mode, KeyCode::Char('k')), Some(Action::MoveCursorUp));
        assert_eq!(get_action(&mode, KeyCode::Enter), Some(Action::SelectCurrent));
        assert_eq!(get_action(&mode, KeyCode::Esc), Some(Action::ClearSelection));
        assert_eq!(get_action(&mode, KeyCode::Char('s')), Some(Action::OpenSettings));
        assert_eq!(get_action(&mode, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_settings_mode_only_closes() {
        let mode = AppMode::Settings;
        assert_eq!(get_action(&mode, KeyCode::Esc), Some(Action::CloseSettings));
        assert_eq!(get_action(&mode, KeyCode::Char('q')), Some(Action::CloseSettings));
        assert_eq!(get_action(&mode, KeyCode::Enter), None);
        assert_eq!(get_action(&mode, KeyCode::Char('j')), None);
    }

    #[test]
    fn test_store_action() {
        let now = Local::now();
        assert_eq!(
            store_action(StoreEvent::RemoteChange, now),
            Action::RemoteChanged(now)
        );
        assert_eq!(
            store_action(StoreEvent::RecordsChanged(Vec::new()), now),
            Action::RecordsChanged(Vec::new())
        );
    }
}
