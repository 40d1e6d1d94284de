//! Add-user wizard panel.
//!
//! Steps one and two show their inputs with inline error lines; step three shows
//! the read-only summary and, once submitted, a success line.
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{Field, Step, Theme, Wizard};
use crate::ui::components::centered_rect;

const SUMMARY_FIELDS: [Field; 5] = [Field::Name, Field::Email, Field::Street, Field::City, Field::Zip];

pub fn render_wizard(f: &mut Frame, area: Rect, wizard: &Wizard, theme: &Theme) {
    let lines = wizard_lines(wizard, theme);
    let height = (lines.len() as u16 + 2).min(area.height);
    let width = 60u16.min(area.width);
    let rect = centered_rect(width, height, area);

    let title = format!("Add User - Step {}", wizard.step().number());
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(title, Style::default().fg(theme.title).add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

fn wizard_lines<'a>(wizard: &'a Wizard, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let form = wizard.form();
    match wizard.step() {
        Step::Identity | Step::Address => {
            let focused = wizard.focused_field();
            for &field in wizard.step().fields() {
                let is_focused = focused == Some(field);
                let marker = if is_focused { "▶ " } else { "  " };
                let label_style = if is_focused {
                    Style::default().fg(theme.highlight_fg).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                let cursor = if is_focused { "_" } else { "" };
                lines.push(Line::from(vec![
                    Span::styled(format!("{marker}{:<7}", field.label()), label_style),
                    Span::styled(format!("{}{cursor}", form.get(field)), Style::default().fg(theme.text)),
                ]));
                if let Some(msg) = wizard.errors().get(field) {
                    lines.push(Line::from(Span::styled(
                        format!("  {msg}"),
                        Style::default().fg(theme.error),
                    )));
                }
            }
        }
        Step::Review => {
            for field in SUMMARY_FIELDS {
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", field.label()), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(form.get(field), Style::default().fg(theme.text)),
                ]));
            }
            if wizard.submitted() {
                lines.push(Line::raw(""));
                lines.push(Line::from(Span::styled(
                    "Form submitted! ✅",
                    Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
                )));
            }
        }
    }

    lines.push(Line::raw(""));
    let mut buttons = Vec::new();
    if wizard.step().prev().is_some() {
        buttons.push(Span::styled("[Back] ", Style::default().fg(theme.muted)));
    }
    let primary = if wizard.step() == Step::Review { "[Submit]" } else { "[Next]" };
    buttons.push(Span::styled(primary, Style::default().fg(theme.highlight_fg)));
    lines.push(Line::from(buttons));
    lines.push(Line::from(Span::styled(
        "Back to Dashboard",
        Style::default().fg(theme.header_fg).add_modifier(Modifier::UNDERLINED),
    )));
    lines
}
