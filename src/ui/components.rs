//! Shared UI components (header, status bar, layout helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, KeyAction, Presentation, Screen, ScreenKind};

/// Render the top header with the active screen name.
pub fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let title = match app.screen.kind() {
        ScreenKind::Listing => "Dashboard",
        ScreenKind::AddUser => "Add User",
    };
    let p = Paragraph::new(Line::from(vec![
        Span::styled("user-dashboard  ", Style::default().fg(app.theme.muted)),
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

/// Render the bottom status bar with screen state and key hints.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let km = &app.keymap;
    let keys = |a: KeyAction| km.keys_for(a).join("/");
    let msg = match &app.screen {
        Screen::Listing(listing) => {
            let state = match listing.presentation() {
                Presentation::Loading => "loading".to_string(),
                Presentation::Error(_) => "error".to_string(),
                Presentation::Table => {
                    format!("users:{}  shown:{}", listing.users().len(), listing.filtered_len())
                }
            };
            format!(
                "{state}  type to search  {}: clear  {}: add user  {}: quit",
                keys(KeyAction::BackToDashboard),
                keys(KeyAction::NewUser),
                keys(KeyAction::Quit),
            )
        }
        Screen::AddUser(wizard) => format!(
            "step {}/3  {}: next/submit  {}: back  {}: field  {}: dashboard  {}: quit",
            wizard.step().number(),
            keys(KeyAction::Confirm),
            keys(KeyAction::PreviousStep),
            keys(KeyAction::MoveDown),
            keys(KeyAction::BackToDashboard),
            keys(KeyAction::Quit),
        ),
    };
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Rect of at most `width` x `height` centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
