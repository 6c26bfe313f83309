//! Types shared by the chase server and client: the packet protocol, game
//! phases, settings, wire framing and the fixed-cadence ticker.

pub mod render;
pub mod schedule;
pub mod settings;
pub mod transport;
pub mod wire;

use serde::{Deserialize, Serialize};

pub use settings::{Settings, SettingsError};
pub use transport::{Duplex, PacketSender, TransportError};

/// Protocol version carried by `RegisterClient`.
pub const CLIENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const BLUE: Color = Color(0, 0, 255);
    pub const GREEN: Color = Color(0, 255, 0);
    pub const READY: Color = Color(64, 64, 64);
    pub const PLAY: Color = Color(0, 0, 0);
    pub const WIN: Color = Color(255, 215, 0);
}

/// Discrete game state. Only ever advances `Ready -> Play -> Win`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Ready,
    Play,
    Win,
}

impl Phase {
    /// Background color displayed while in this phase.
    pub fn background(self) -> Color {
        match self {
            Phase::Ready => Color::READY,
            Phase::Play => Color::PLAY,
            Phase::Win => Color::WIN,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// Sign of the velocity this direction contributes on its axis.
    /// Screen coordinates: y grows downwards.
    pub fn sign(self) -> i8 {
        match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Packet {
    // Client -> server
    SetDirection { direction: Direction, pressed: bool },
    RegisterClient { client_version: u32 },

    // Server -> client
    PushPhase { phase: Phase },

    // Either side
    Disconnect,
}
