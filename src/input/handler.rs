use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, GameMode, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    TogglePause,
    /// Confirm a restart after the game is over
    Confirm,
    Restart,
    SelectLevel(Level),
    CycleLevel,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Translate a key press into an action for the current mode.
    /// Once the game is over only restarting, level selection and quitting
    /// get through.
    pub fn handle_key_event(&self, key: KeyEvent, mode: GameMode) -> KeyAction {
        let action = self.map_key(key);
        match (mode, action) {
            (GameMode::Over, KeyAction::Turn(_) | KeyAction::TogglePause) => KeyAction::None,
            (GameMode::Running | GameMode::Paused, KeyAction::Confirm) => KeyAction::None,
            _ => action,
        }
    }

    fn map_key(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::TogglePause,
            KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            // Levels
            KeyCode::Char('1') => KeyAction::SelectLevel(Level::Easy),
            KeyCode::Char('2') => KeyAction::SelectLevel(Level::Medium),
            KeyCode::Char('3') => KeyAction::SelectLevel(Level::Hard),
            KeyCode::Char('l') | KeyCode::Char('L') => KeyAction::CycleLevel,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ];
        for (code, dir) in cases {
            assert_eq!(
                handler.handle_key_event(press(code), GameMode::Running),
                KeyAction::Turn(dir)
            );
        }
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('w')), GameMode::Running),
            KeyAction::Turn(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('a')), GameMode::Running),
            KeyAction::Turn(Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('s')), GameMode::Running),
            KeyAction::Turn(Direction::Down)
        );

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(d_upper, GameMode::Running),
            KeyAction::Turn(Direction::Right)
        );
    }

    #[test]
    fn test_turns_allowed_while_paused() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up), GameMode::Paused),
            KeyAction::Turn(Direction::Up)
        );
    }

    #[test]
    fn test_pause_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' ')), GameMode::Running),
            KeyAction::TogglePause
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('p')), GameMode::Paused),
            KeyAction::TogglePause
        );
    }

    #[test]
    fn test_over_mode_only_accepts_restart_level_and_quit() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up), GameMode::Over),
            KeyAction::None
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' ')), GameMode::Over),
            KeyAction::None
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Enter), GameMode::Over),
            KeyAction::Confirm
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('r')), GameMode::Over),
            KeyAction::Restart
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('3')), GameMode::Over),
            KeyAction::SelectLevel(Level::Hard)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Esc), GameMode::Over),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_confirm_ignored_while_playing() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Enter), GameMode::Running),
            KeyAction::None
        );
    }

    #[test]
    fn test_level_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('1')), GameMode::Running),
            KeyAction::SelectLevel(Level::Easy)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('2')), GameMode::Paused),
            KeyAction::SelectLevel(Level::Medium)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('l')), GameMode::Running),
            KeyAction::CycleLevel
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        let q_upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(q_upper, GameMode::Running),
            KeyAction::Quit
        );

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            handler.handle_key_event(ctrl_c, GameMode::Running),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('x')), GameMode::Running),
            KeyAction::None
        );
    }
}
