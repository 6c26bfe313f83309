//! # Chase Game Client Library
//!
//! The client side of the chase game. It holds no simulation state of its
//! own: the server decides where every piece is and which phase the game is
//! in. The client sends arrow-key transitions and paints the window in the
//! background color of whatever phase the server last pushed.
//!
//! ## Architecture Overview
//!
//! ### Window Loop
//! All client state lives on the window thread. Each frame the
//! [`network::Client`] drains pushed packets, samples the keyboard when its
//! 120Hz input ticker is due, and fills the window.
//!
//! ### Network Thread
//! [`network::connect`] opens the TCP stream on its own tokio runtime thread
//! and hands the window loop a channel-backed `Duplex`. Sends never block the
//! frame; a failed send ends the session and the client stops sending.
//!
//! ## Module Organization
//!
//! ### Game Module (`game`)
//! Mirror of the server's phase and the background it implies.
//!
//! ### Input Module (`input`)
//! Static key bindings and edge detection:
//! - Arrow keys send a command on press and again on release
//! - `Q` sends `Disconnect` and closes the window
//!
//! ### Network Module (`network`)
//! Registration, packet intake and command sending.
//!
//! ### Rendering Module (`rendering`)
//! Window configuration and the background fill.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::{connect, Client};
//! use shared::render::Canvas;
//! use shared::Settings;
//! use std::time::Instant;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::default();
//!     let connection = connect("127.0.0.1:8080".to_string())?;
//!     let mut client = Client::new(connection, &settings, Instant::now());
//!
//!     while client.is_running() {
//!         client.update(Instant::now(), macroquad::prelude::is_key_down);
//!         client.render(&mut Canvas);
//!     }
//!     Ok(())
//! }
//! ```

pub mod game;
pub mod input;
pub mod network;
pub mod rendering;
