//! Single-screen terminal UI: timer, coin total, available actions, notices.

use crate::build_info;
use crate::game_session::GameSession;
use crate::notices::NoticeLog;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, session: &GameSession, notices: &NoticeLog) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // timer
            Constraint::Length(3), // coins
            Constraint::Length(3), // actions
            Constraint::Min(3),    // notices
            Constraint::Length(1), // footer
        ])
        .split(frame.size());

    let timer_line = if session.is_over() {
        Line::from(Span::styled(
            "You Lose!",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ))
    } else if session.is_paused() {
        Line::from(vec![
            Span::raw(format!("seconds remaining: {}", session.time_remaining())),
            Span::styled(" (paused)", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(format!("seconds remaining: {}", session.time_remaining()))
    };
    let timer = Paragraph::new(timer_line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" coindrop "));
    frame.render_widget(timer, chunks[0]);

    let coins = Paragraph::new(Line::from(Span::styled(
        format!("Coins: {}", session.coin_count()),
        Style::default().fg(Color::Yellow),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(coins, chunks[1]);

    let mut actions: Vec<Span> = Vec::new();
    if session.retry_available() {
        actions.push(Span::styled("[R] Retry", Style::default().fg(Color::Green)));
        actions.push(Span::raw("   "));
    }
    if session.watch_ad_available() {
        actions.push(Span::styled(
            "[W] Watch video",
            Style::default().fg(Color::Cyan),
        ));
        actions.push(Span::raw("   "));
    }
    actions.push(Span::styled(
        "[Q] Quit",
        Style::default().fg(Color::DarkGray),
    ));
    let actions = Paragraph::new(Line::from(actions))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Actions "));
    frame.render_widget(actions, chunks[2]);

    let notice_lines: Vec<Line> = notices
        .iter()
        .map(|notice| {
            Line::from(vec![
                Span::styled(
                    notice.at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(notice.text.clone()),
            ])
        })
        .collect();
    let notices_panel = Paragraph::new(notice_lines)
        .block(Block::default().borders(Borders::ALL).title(" Notices "));
    frame.render_widget(notices_panel, chunks[3]);

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(
            "coindrop {} ({})",
            build_info::BUILD_COMMIT,
            build_info::BUILD_DATE
        ),
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(footer, chunks[4]);
}
