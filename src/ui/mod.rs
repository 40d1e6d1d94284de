pub mod components;
pub mod listing;
pub mod wizard;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::{AppState, Screen};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    components::render_header(f, root[0], app);

    let theme = app.theme;
    match &mut app.screen {
        Screen::Listing(state) => listing::render_listing(f, root[1], state, &theme),
        Screen::AddUser(state) => wizard::render_wizard(f, root[1], state, &theme),
    }

    components::render_status_bar(f, root[2], app);
}
