//! Physical keys to dispatcher commands. The same key means different things
//! depending on whether a text buffer has focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{core::Key, model::InputMode};

pub fn key_for(event: KeyEvent, mode: InputMode) -> Option<Key> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

    match mode {
        InputMode::Command => command_key(event.code, ctrl),
        InputMode::Text => text_key(event.code, ctrl),
        InputMode::Payload => payload_key(event.code, ctrl),
    }
}

fn command_key(code: KeyCode, ctrl: bool) -> Option<Key> {
    let key = match code {
        KeyCode::Char('c') if ctrl => Key::Quit,
        KeyCode::Enter if ctrl => Key::Execute,
        KeyCode::Char('q') => Key::Quit,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Esc | KeyCode::Char('-') => Key::Back,
        KeyCode::Up | KeyCode::Char('k') => Key::NavigateUp,
        KeyCode::Down | KeyCode::Char('j') => Key::NavigateDown,
        KeyCode::Home | KeyCode::Char('g') => Key::JumpTop,
        KeyCode::End | KeyCode::Char('G') => Key::JumpBottom,
        KeyCode::Right | KeyCode::Char('l') => Key::PageForward,
        KeyCode::Left | KeyCode::Char('h') => Key::PageBackward,
        KeyCode::PageUp => Key::ScrollUp,
        KeyCode::PageDown => Key::ScrollDown,
        KeyCode::Char('/') => Key::ActivateSearch,
        KeyCode::Char('i') => Key::ToggleInputMode,
        KeyCode::Char('?') => Key::Help,
        KeyCode::F(5) => Key::Execute,
        _ => return None,
    };
    Some(key)
}

fn text_key(code: KeyCode, ctrl: bool) -> Option<Key> {
    let key = match code {
        KeyCode::Char('c') if ctrl => Key::Quit,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::SubmitText,
        KeyCode::Esc => Key::Back,
        KeyCode::Up => Key::NavigateUp,
        KeyCode::Down => Key::NavigateDown,
        KeyCode::Home => Key::JumpTop,
        KeyCode::End => Key::JumpBottom,
        KeyCode::Right => Key::PageForward,
        KeyCode::Left => Key::PageBackward,
        _ => return None,
    };
    Some(key)
}

fn payload_key(code: KeyCode, ctrl: bool) -> Option<Key> {
    let key = match code {
        KeyCode::Esc => Key::ToggleInputMode,
        KeyCode::Char('c') if ctrl => Key::ToggleInputMode,
        KeyCode::Enter if ctrl => Key::Execute,
        KeyCode::F(5) => Key::Execute,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Tab => Key::Char(' '),
        KeyCode::Enter => Key::SubmitText,
        KeyCode::Backspace => Key::Backspace,
        _ => return None,
    };
    Some(key)
}
