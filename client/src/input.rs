//! Keyboard sampling with edge detection, mapped to outbound commands

use macroquad::prelude::{is_key_down, KeyCode};
use shared::{Direction, Packet};

/// What a key transition asks the client to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Direction { direction: Direction, pressed: bool },
    Quit,
}

impl InputEvent {
    /// The packet this event sends to the server.
    pub fn to_packet(self) -> Packet {
        match self {
            InputEvent::Direction { direction, pressed } => {
                Packet::SetDirection { direction, pressed }
            }
            InputEvent::Quit => Packet::Disconnect,
        }
    }
}

/// Static key to action table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub directions: [(KeyCode, Direction); 4],
    pub quit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            directions: [
                (KeyCode::Up, Direction::Up),
                (KeyCode::Down, Direction::Down),
                (KeyCode::Left, Direction::Left),
                (KeyCode::Right, Direction::Right),
            ],
            quit: KeyCode::Q,
        }
    }
}

/// Turns sampled key states into press/release events.
pub struct InputManager {
    bindings: KeyBindings,

    // Previous sample, for edge detection
    prev_directions: [bool; 4],
    prev_quit: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::default())
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            prev_directions: [false; 4],
            prev_quit: false,
        }
    }

    /// Samples the window's keyboard.
    pub fn poll(&mut self) -> Vec<InputEvent> {
        self.update(is_key_down)
    }

    /// Compares `is_down` against the previous sample.
    ///
    /// Arrow keys report both the press and the release; quit fires when
    /// the key comes back up.
    pub fn update<F>(&mut self, is_down: F) -> Vec<InputEvent>
    where
        F: Fn(KeyCode) -> bool,
    {
        let mut events = Vec::new();

        for (i, &(key, direction)) in self.bindings.directions.iter().enumerate() {
            let down = is_down(key);
            if down != self.prev_directions[i] {
                events.push(InputEvent::Direction {
                    direction,
                    pressed: down,
                });
            }
            self.prev_directions[i] = down;
        }

        let quit = is_down(self.bindings.quit);
        if self.prev_quit && !quit {
            events.push(InputEvent::Quit);
        }
        self.prev_quit = quit;

        events
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
