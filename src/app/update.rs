use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::app::{AppState, KeyAction, ListingState, Screen, Step, Wizard};
use crate::ui;

/// Screen change requested by a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Transition {
    Stay,
    OpenListing,
    OpenAddUser,
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    while !app.should_quit {
        if let Screen::Listing(listing) = &mut app.screen {
            listing.poll();
        }

        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key).map_err(|e| anyhow::anyhow!(e))?;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press to the app.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> crate::error::Result<()> {
    let action = app.keymap.resolve(&key);
    if action == Some(KeyAction::Quit) {
        app.should_quit = true;
        return Ok(());
    }

    let transition = match &mut app.screen {
        Screen::Listing(listing) => handle_listing_key(listing, action, key),
        Screen::AddUser(wizard) => handle_wizard_key(wizard, action, key),
    };

    match transition {
        Transition::Stay => {}
        Transition::OpenListing => app.open_listing()?,
        Transition::OpenAddUser => app.open_add_user(),
    }
    Ok(())
}

fn handle_listing_key(listing: &mut ListingState, action: Option<KeyAction>, key: KeyEvent) -> Transition {
    match action {
        Some(KeyAction::NewUser) => return Transition::OpenAddUser,
        Some(KeyAction::BackToDashboard) => listing.set_search_query(""),
        Some(KeyAction::MoveDown) => listing.select_next(),
        Some(KeyAction::MoveUp) => listing.select_prev(),
        Some(KeyAction::PageDown) => listing.page_down(),
        Some(KeyAction::PageUp) => listing.page_up(),
        Some(KeyAction::Confirm | KeyAction::PreviousStep | KeyAction::Ignore | KeyAction::Quit) => {}
        None => match text_input(&key) {
            Some(TextEdit::Push(c)) => listing.push_search_char(c),
            Some(TextEdit::Pop) => listing.pop_search_char(),
            None => {}
        },
    }
    Transition::Stay
}

fn handle_wizard_key(wizard: &mut Wizard, action: Option<KeyAction>, key: KeyEvent) -> Transition {
    match action {
        Some(KeyAction::BackToDashboard) => return Transition::OpenListing,
        Some(KeyAction::Confirm) => {
            if wizard.step() == Step::Review {
                wizard.submit();
            } else {
                wizard.advance();
            }
        }
        Some(KeyAction::PreviousStep) => wizard.retreat(),
        Some(KeyAction::MoveDown) => wizard.focus_next(),
        Some(KeyAction::MoveUp) => wizard.focus_prev(),
        Some(KeyAction::NewUser | KeyAction::PageUp | KeyAction::PageDown | KeyAction::Ignore | KeyAction::Quit) => {}
        None => match text_input(&key) {
            Some(TextEdit::Push(c)) => wizard.push_char(c),
            Some(TextEdit::Pop) => wizard.pop_char(),
            None => {}
        },
    }
    Transition::Stay
}

enum TextEdit {
    Push(char),
    Pop,
}

/// Interpret an unbound key as a text edit.
///
/// A lone Ctrl or Alt marks a chord and is not typed. Ctrl+Alt together is how
/// some platforms report AltGr, so those characters are text.
fn text_input(key: &KeyEvent) -> Option<TextEdit> {
    let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
    if key.modifiers.intersects(altgr) && !key.modifiers.contains(altgr) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(TextEdit::Push(c)),
        KeyCode::Backspace => Some(TextEdit::Pop),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Field, Keymap, Settings, Theme};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new_with_kind(KeyCode::Char(c), KeyModifiers::CONTROL, KeyEventKind::Press)
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_key(app, press(KeyCode::Char(c))).unwrap();
        }
    }

    fn wizard_app() -> AppState {
        AppState::with_screen(
            Screen::AddUser(Wizard::new()),
            Settings::default(),
            Theme::default(),
            Keymap::default(),
        )
    }

    fn wizard(app: &AppState) -> &Wizard {
        match &app.screen {
            Screen::AddUser(w) => w,
            Screen::Listing(_) => panic!("expected wizard"),
        }
    }

    #[test]
    fn keyboard_walkthrough_reaches_submit() {
        let mut app = wizard_app();
        handle_key(&mut app, press(KeyCode::Enter)).unwrap();
        assert_eq!(wizard(&app).step(), Step::Identity);
        assert_eq!(wizard(&app).errors().len(), 2);

        type_str(&mut app, "Jane Doe");
        handle_key(&mut app, press(KeyCode::Tab)).unwrap();
        type_str(&mut app, "jane@example.com");
        handle_key(&mut app, press(KeyCode::Enter)).unwrap();
        assert_eq!(wizard(&app).step(), Step::Address);

        type_str(&mut app, "1 Main St");
        handle_key(&mut app, press(KeyCode::Down)).unwrap();
        type_str(&mut app, "Springfield");
        handle_key(&mut app, press(KeyCode::Tab)).unwrap();
        type_str(&mut app, "12345");
        handle_key(&mut app, press(KeyCode::Enter)).unwrap();
        assert_eq!(wizard(&app).step(), Step::Review);
        assert!(!wizard(&app).submitted());

        handle_key(&mut app, press(KeyCode::Enter)).unwrap();
        assert!(wizard(&app).submitted());
        assert_eq!(wizard(&app).form().city, "Springfield");
    }

    #[test]
    fn ctrl_b_steps_back_and_backspace_edits() {
        let mut app = wizard_app();
        type_str(&mut app, "Al");
        handle_key(&mut app, press(KeyCode::Backspace)).unwrap();
        assert_eq!(wizard(&app).form().get(Field::Name), "A");
        handle_key(&mut app, press(KeyCode::BackTab)).unwrap();
        type_str(&mut app, "a@b.co");
        handle_key(&mut app, press(KeyCode::Enter)).unwrap();
        assert_eq!(wizard(&app).step(), Step::Address);
        handle_key(&mut app, ctrl('b')).unwrap();
        assert_eq!(wizard(&app).step(), Step::Identity);
        // ctrl chords never reach the field
        assert_eq!(wizard(&app).form().get(Field::Name), "A");
    }

    #[test]
    fn altgr_characters_are_typed() {
        let mut app = wizard_app();
        handle_key(&mut app, press(KeyCode::Tab)).unwrap();
        type_str(&mut app, "jane");
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        handle_key(&mut app, KeyEvent::new_with_kind(KeyCode::Char('@'), altgr, KeyEventKind::Press)).unwrap();
        type_str(&mut app, "example.com");
        assert_eq!(wizard(&app).form().get(Field::Email), "jane@example.com");

        // plain alt chords still stay out of the field
        handle_key(&mut app, KeyEvent::new_with_kind(KeyCode::Char('x'), KeyModifiers::ALT, KeyEventKind::Press)).unwrap();
        assert_eq!(wizard(&app).form().get(Field::Email), "jane@example.com");
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = wizard_app();
        handle_key(&mut app, ctrl('q')).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn new_user_from_listing_mounts_empty_wizard() {
        let mut app = AppState::with_screen(
            Screen::Listing(ListingState::new()),
            Settings::default(),
            Theme::default(),
            Keymap::default(),
        );
        type_str(&mut app, "lon");
        match &app.screen {
            Screen::Listing(l) => assert_eq!(l.search_query(), "lon"),
            Screen::AddUser(_) => panic!("expected listing"),
        }
        handle_key(&mut app, press(KeyCode::Esc)).unwrap();
        match &app.screen {
            Screen::Listing(l) => assert_eq!(l.search_query(), ""),
            Screen::AddUser(_) => panic!("expected listing"),
        }
        handle_key(&mut app, ctrl('n')).unwrap();
        assert_eq!(wizard(&app).step(), Step::Identity);
        assert_eq!(wizard(&app).form(), Wizard::new().form());
    }
}
