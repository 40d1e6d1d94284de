use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::{ListingState, Presentation, Theme};

pub fn render_listing(f: &mut Frame, area: Rect, listing: &mut ListingState, theme: &Theme) {
    match listing.presentation() {
        Presentation::Loading => {
            let p = Paragraph::new("Loading users...")
                .style(Style::default().fg(theme.text))
                .block(panel("Users", theme));
            f.render_widget(p, area);
        }
        Presentation::Error(msg) => {
            let p = Paragraph::new(msg.to_string())
                .style(Style::default().fg(theme.error))
                .block(panel("Users", theme));
            f.render_widget(p, area);
        }
        Presentation::Table => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(3)].as_ref())
                .split(area);
            render_search_box(f, parts[0], listing, theme);
            render_users_table(f, parts[1], listing, theme);
        }
    }
}

fn render_search_box(f: &mut Frame, area: Rect, listing: &ListingState, theme: &Theme) {
    let query = listing.search_query();
    let p = if query.is_empty() {
        Paragraph::new("Search by name or city").style(Style::default().fg(theme.muted))
    } else {
        Paragraph::new(format!("{query}_")).style(Style::default().fg(theme.text))
    };
    f.render_widget(p.block(panel("Search", theme)), area);
}

pub fn render_users_table(f: &mut Frame, area: Rect, listing: &mut ListingState, theme: &Theme) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        listing.rows_per_page = body_height;
    }
    let rpp = listing.rows_per_page.max(1);
    let selected = listing.selected_index;
    let start = (selected / rpp) * rpp;

    let rows = listing
        .filtered_view()
        .enumerate()
        .skip(start)
        .take(rpp)
        .map(|(idx, u)| {
            let style = if idx == selected {
                Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Row::new(vec![
                Cell::from(u.name.clone()),
                Cell::from(u.email.clone()),
                Cell::from(u.phone.clone()),
                Cell::from(u.address.city.clone()),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(30),
        Constraint::Percentage(25),
        Constraint::Percentage(20),
    ];

    let header = Row::new(vec!["Name", "Email", "Phone", "City"])
        .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel("Users", theme))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
}
