//! Key translation
//!
//! Turns crossterm key events into session [`Command`]s. Ctrl plays the role
//! of the handheld's Fn key for administrative commands.

use crate::interpreter::engine::Direction;
use crate::session::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the app should do with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Quit,
    Ignore,
}

/// Map one key press to an action
pub fn translate(key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => return KeyAction::Quit,
        KeyCode::Char('s') if ctrl => Command::Save,
        KeyCode::Char('l') if ctrl => Command::Load,
        KeyCode::Char('x') if ctrl => Command::ClearProgram,
        KeyCode::Char('k') if ctrl => Command::ClearStack,
        KeyCode::Char('r') if ctrl => Command::Reset,
        KeyCode::Char('h') if ctrl => Command::Help,
        KeyCode::Char(_) if ctrl => return KeyAction::Ignore,
        KeyCode::F(1) => Command::Help,
        KeyCode::Esc => Command::Dismiss,
        KeyCode::Right => Command::Navigate(Direction::Right),
        KeyCode::Left => Command::Navigate(Direction::Left),
        KeyCode::Up => Command::Navigate(Direction::Up),
        KeyCode::Down => Command::Navigate(Direction::Down),
        KeyCode::Tab => Command::Step,
        KeyCode::Enter => Command::Run,
        KeyCode::Char(c) => match Command::write(c) {
            Some(command) => command,
            None => return KeyAction::Ignore,
        },
        _ => return KeyAction::Ignore,
    };

    KeyAction::Command(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            translate(key(KeyCode::Left)),
            KeyAction::Command(Command::Navigate(Direction::Left))
        );
        assert_eq!(
            translate(key(KeyCode::Down)),
            KeyAction::Command(Command::Navigate(Direction::Down))
        );
    }

    #[test]
    fn test_run_and_step() {
        assert_eq!(translate(key(KeyCode::Tab)), KeyAction::Command(Command::Step));
        assert_eq!(translate(key(KeyCode::Enter)), KeyAction::Command(Command::Run));
    }

    #[test]
    fn test_ctrl_commands() {
        assert_eq!(translate(ctrl('s')), KeyAction::Command(Command::Save));
        assert_eq!(translate(ctrl('l')), KeyAction::Command(Command::Load));
        assert_eq!(translate(ctrl('x')), KeyAction::Command(Command::ClearProgram));
        assert_eq!(translate(ctrl('k')), KeyAction::Command(Command::ClearStack));
        assert_eq!(translate(ctrl('q')), KeyAction::Quit);
        assert_eq!(translate(ctrl('z')), KeyAction::Ignore);
    }

    #[test]
    fn test_printable_keys_write() {
        assert_eq!(
            translate(key(KeyCode::Char('v'))),
            KeyAction::Command(Command::Write('v'))
        );
        assert_eq!(
            translate(KeyEvent::new(KeyCode::Char('"'), KeyModifiers::SHIFT)),
            KeyAction::Command(Command::Write('"'))
        );
        assert_eq!(translate(key(KeyCode::Char('ß'))), KeyAction::Ignore);
    }
}
