//! 通用 UI 组件
//!
//! 弹窗框架、列表行、详情面板与空状态

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListItem, Paragraph, Wrap},
};

use crate::models::VoiceMemo;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 列表行
pub fn memo_row(memo: &VoiceMemo, is_selected: bool) -> ListItem<'static> {
    let marker = if is_selected { "▶ " } else { "  " };
    let title = if memo.title.is_empty() {
        "Untitled".to_string()
    } else {
        memo.title.clone()
    };

    let title_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    ListItem::new(Line::from(vec![
        Span::styled(format!("{}{}", marker, title), title_style),
        Span::styled(
            format!("  {}  {}", memo.duration_label(), memo.created_at.format("%m-%d %H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

/// [组件] 详情面板
pub fn render_memo_detail(frame: &mut Frame, area: Rect, memo: &VoiceMemo) {
    let block = Block::default().title("Detail").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(inner);

    let header = vec![
        Line::from(Span::styled(
            memo.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Recorded {}  ·  {}",
            memo.created_at.format("%Y-%m-%d %H:%M"),
            memo.duration_label()
        )),
        Line::from(format!(
            "Audio: {}",
            memo.audio_file.as_deref().unwrap_or("(none)")
        )),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let transcript = if memo.transcript.is_empty() {
        Paragraph::new("No transcript").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(memo.transcript.as_str()).wrap(Wrap { trim: true })
    };
    frame.render_widget(
        transcript.block(Block::default().title("Transcript").borders(Borders::TOP)),
        chunks[1],
    );
}

/// [组件] 空列表提示：图标 + 两行说明
pub fn render_empty_state(frame: &mut Frame, area: Rect, title: &str) {
    let lines = vec![
        Line::from(""),
        Line::from("🎙"),
        Line::from(""),
        Line::from(Span::styled(
            "No voice memos yet",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Recordings appear here once they sync",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(panel, area);
}

/// [组件] 未选中时的占位提示
pub fn render_placeholder(frame: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new("Select a memo to view its details")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().title("Detail").borders(Borders::ALL));
    frame.render_widget(placeholder, area);
}
