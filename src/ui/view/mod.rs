//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::format::sync_label;
use super::state::{App, AppMode, Selection};
use components::{
    memo_row, render_dialog_framework, render_empty_state, render_memo_detail, render_placeholder,
};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(8),    // 列表 + 详情
            Constraint::Length(3), // 状态栏
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_title(frame, chunks[0]);
    render_memo_list(frame, app, body[0]);
    render_detail(frame, app, body[1]);
    render_status_bar(frame, app, chunks[2]);

    if app.mode == AppMode::Settings {
        render_settings_dialog(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("🎙 Talkie")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_memo_list(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("Memos ({})", app.memos.len());

    if app.memos.is_empty() {
        render_empty_state(frame, area, &title);
        return;
    }

    let items: Vec<ListItem> = app
        .memos
        .iter()
        .map(|memo| memo_row(memo, app.is_selected(memo)))
        .collect();

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.cursor));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    match &app.selection {
        Selection::Selected(_) => match app.selected_memo() {
            Some(memo) => render_memo_detail(frame, area, memo),
            None => render_placeholder(frame, area),
        },
        Selection::None => render_placeholder(frame, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = &app.sync_status;
    let label = sync_label(Local::now(), status.last_sync);
    let indicator_color = if status.last_sync.is_some() {
        Color::Green
    } else {
        Color::DarkGray
    };

    let help = match app.mode {
        AppMode::Normal => "[j/k] navigate  [Enter] open  [Esc] close  [s] settings  [q] quit",
        AppMode::Settings => "[Esc] close settings",
    };

    let mut spans = vec![
        Span::styled("● ", Style::default().fg(indicator_color)),
        Span::raw(format!("{} MEMOS  ", status.synced_count)),
        Span::styled(
            format!("SYNCED {}", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  |  {}", help), Style::default().fg(Color::Gray)),
    ];
    if let Some(message) = &app.message {
        spans.push(Span::styled(
            format!("  |  {}", message),
            Style::default().fg(Color::Yellow),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(bar, area);
}

fn render_settings_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 40, frame.area());
    let inner = render_dialog_framework(frame, area, "Settings");

    let lines = vec![
        Line::from(format!("Data file:      {}", app.data_path.display())),
        Line::from(format!(
            "Poll interval:  {} ms",
            app.config.remote_poll_interval_ms
        )),
        Line::from(format!("Log level:      {}", app.config.log_level)),
        Line::from(""),
        Line::from(Span::styled(
            "Edit ~/.config/talkie/config.toml to change these",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
