use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::gesture;
use crate::game::Direction;

/// What an input event asks the screen to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Queue a direction change for the next tick
    Steer(Direction),
    /// Start a game from Idle or GameOver
    Start,
    Restart,
    Quit,
    None,
}

/// Maps terminal events to commands.
///
/// Mouse presses are remembered so a later release can be read as a swipe.
pub struct InputHandler {
    drag_origin: Option<(i32, i32)>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self { drag_origin: None }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> Command {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Command::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Command::Steer(Direction::Up),
            KeyCode::Down => Command::Steer(Direction::Down),
            KeyCode::Left => Command::Steer(Direction::Left),
            KeyCode::Right => Command::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Command::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Command::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Command::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Command::Steer(Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Enter => Command::Start,
            KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,

            _ => Command::None,
        }
    }

    /// Track left-button press/release pairs and turn long drags into
    /// steering commands
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent, min_swipe_distance: i32) -> Command {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_origin = Some((mouse.column as i32, mouse.row as i32));
                Command::None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let end = (mouse.column as i32, mouse.row as i32);
                match self.drag_origin.take() {
                    Some(origin) => gesture::interpret_swipe(origin, end, min_swipe_distance)
                        .map(Command::Steer)
                        .unwrap_or(Command::None),
                    None => Command::None,
                }
            }
            _ => Command::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
