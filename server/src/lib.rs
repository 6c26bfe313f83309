//! # Chase Game Server Library
//!
//! This library holds the authoritative side of a small two-process game: a
//! player circle steered by a remote client chases a goal circle. The server
//! owns every piece of simulation state; the client only mirrors the current
//! phase and sends arrow-key commands.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Simulation
//! The server integrates the player's motion, bounces it off the screen
//! edges, detects contact with the goal and advances the game phase. Nothing
//! the client sends can move a piece directly; it can only change which
//! arrow keys the server believes are held.
//!
//! ### Phase Machine
//! The game moves strictly through `Ready -> Play -> Win`. The first
//! directional command starts the round, touching the goal ends it. Each
//! transition is pushed to the registered client so its background follows.
//!
//! ### Client Endpoint
//! Exactly one client registers per server run. Its endpoint is stored on
//! registration and released when the connection goes away; pushes to a
//! missing or closed endpoint are skipped with a log line.
//!
//! ## Architecture Design
//!
//! ### Single-Threaded Game Loop
//! All game state is mutated on the window thread. The [`engine::Engine`] is
//! polled once per frame and fires its own fixed-cadence tickers: physics at
//! 60Hz and command intake at 120Hz. A slow frame catches up by running the
//! missed ticks in one go.
//!
//! ### Network Thread
//! TCP accept and framing run on a separate tokio runtime thread (see
//! [`network::spawn`]). Connections are turned into
//! [`network::ServerMessage`]s and queued for the engine, which drains them
//! on its command tick.
//!
//! ## Module Organization
//!
//! ### Entity Module (`entity`)
//! Circular pieces with bounded, reflecting motion and the contact test.
//!
//! ### Placement Module (`placement`)
//! Picks a goal position at a random distance and angle from the player,
//! mirroring each axis through the player when the naive spot falls off
//! screen.
//!
//! ### Controller Module (`controller`)
//! Tracks the four held arrow keys and rebuilds the player's velocity.
//!
//! ### Game Module (`game`)
//! The phase state machine, its timestamps and the client endpoint.
//!
//! ### Engine Module (`engine`)
//! Ties the pieces, controller and phase machine to the tick schedule and
//! the queue of network messages.
//!
//! ### Network Module (`network`)
//! TCP listener, per-connection tasks and the message types they emit.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::engine::Engine;
//! use shared::Settings;
//! use std::time::Instant;
//! use tokio::sync::mpsc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::default();
//!     let (server_tx, server_rx) = mpsc::unbounded_channel();
//!     server::network::spawn("127.0.0.1:8080".to_string(), server_tx)?;
//!
//!     let mut engine = Engine::new(settings, server_rx, &mut rand::thread_rng(), Instant::now())?;
//!     while engine.is_running() {
//!         engine.update(Instant::now());
//!         // render with engine.render(&mut surface)
//!     }
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod engine;
pub mod entity;
pub mod game;
pub mod network;
pub mod placement;
