//! Server engine: owns the pieces, the phase machine and the controller, and
//! runs physics and command intake on their own fixed cadences.

use crate::controller::Controller;
use crate::entity::{is_touching, Goal, Player};
use crate::game::{GameEvent, GameState};
use crate::network::ServerMessage;
use log::{debug, error, info, warn};
use rand::Rng;
use shared::render::{Drawable, Surface};
use shared::schedule::Ticker;
use shared::{Packet, PacketSender, Settings, SettingsError, CLIENT_VERSION};
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::mpsc::{self, error::TryRecvError};

pub struct Engine {
    settings: Settings,
    player: Player,
    goal: Goal,
    game_state: GameState,
    controller: Controller,

    connections: HashMap<u32, PacketSender>,
    client_connection: Option<u32>,
    server_rx: mpsc::UnboundedReceiver<ServerMessage>,

    physics: Ticker,
    commands: Ticker,
    running: bool,
}

impl Engine {
    /// Spawns the player, places the goal and starts both tickers at `now`.
    pub fn new<R: Rng + ?Sized>(
        settings: Settings,
        server_rx: mpsc::UnboundedReceiver<ServerMessage>,
        rng: &mut R,
        now: Instant,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;

        let player = Player::spawn(&settings, rng);
        let goal = Goal::place(&player, &settings, rng);
        info!(
            "Player at ({}, {}), goal at ({:.1}, {:.1})",
            player.piece.x, player.piece.y, goal.piece.x, goal.piece.y
        );

        Ok(Self::with_pieces(settings, player, goal, server_rx, now))
    }

    /// Builds an engine around already positioned pieces.
    pub fn with_pieces(
        settings: Settings,
        player: Player,
        goal: Goal,
        server_rx: mpsc::UnboundedReceiver<ServerMessage>,
        now: Instant,
    ) -> Self {
        let physics = Ticker::new(settings.physics_interval(), now);
        let commands = Ticker::new(settings.command_interval(), now);

        Self {
            settings,
            player,
            goal,
            game_state: GameState::new(),
            controller: Controller::new(),
            connections: HashMap::new(),
            client_connection: None,
            server_rx,
            physics,
            commands,
            running: true,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("Engine stopping");
        }
        self.running = false;
    }

    /// Runs whatever command drains and physics ticks are due at `now`.
    ///
    /// Commands are drained first so a command that arrived before this
    /// frame's physics tick is integrated by it.
    pub fn update(&mut self, now: Instant) {
        if self.commands.poll(now) > 0 {
            self.drain_commands(now);
        }

        let ticks = self.physics.poll(now);
        if ticks > 0 {
            self.physics_tick(ticks, now);
        }
    }

    /// Moves the player by `ticks` steps and checks for the win.
    pub fn physics_tick(&mut self, ticks: u32, now: Instant) {
        self.player.piece.advance(ticks);

        if self.game_state.phase() == shared::Phase::Play
            && is_touching(&self.player.piece, &self.goal.piece)
        {
            info!(
                "Player touched goal at ({}, {})",
                self.player.piece.x, self.player.piece.y
            );
            self.game_state.advance(GameEvent::GoalTouched, now);
        }

        let fired = self.physics.fired();
        if fired > 0 && fired % 60 == 0 {
            debug!(
                "Tick {}: player ({}, {}) velocity ({}, {}), phase {:?}",
                fired,
                self.player.piece.x,
                self.player.piece.y,
                self.player.piece.dx,
                self.player.piece.dy,
                self.game_state.phase()
            );
        }
    }

    /// Handles every message the network layer queued since the last drain.
    pub fn drain_commands(&mut self, now: Instant) {
        loop {
            match self.server_rx.try_recv() {
                Ok(message) => self.handle_message(message, now),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.running {
                        error!("Network layer stopped, shutting down");
                    }
                    self.stop();
                    break;
                }
            }
        }
    }

    pub fn handle_message(&mut self, message: ServerMessage, now: Instant) {
        match message {
            ServerMessage::Connected {
                connection_id,
                endpoint,
            } => {
                info!("Connection {} opened", connection_id);
                self.connections.insert(connection_id, endpoint);
            }
            ServerMessage::PacketReceived {
                connection_id,
                packet,
            } => {
                self.handle_packet(connection_id, packet, now);
            }
            ServerMessage::Disconnected { connection_id } => {
                info!("Connection {} closed", connection_id);
                self.connections.remove(&connection_id);
                self.release_client(connection_id);
            }
        }
    }

    fn handle_packet(&mut self, connection_id: u32, packet: Packet, now: Instant) {
        match packet {
            Packet::SetDirection { direction, pressed } => {
                debug!(
                    "Connection {}: {:?} {}",
                    connection_id,
                    direction,
                    if pressed { "pressed" } else { "released" }
                );
                self.controller
                    .set_direction(direction, pressed, &mut self.player);
                self.game_state.advance(GameEvent::DirectionCommand, now);
            }

            Packet::RegisterClient { client_version } => {
                self.register_client(connection_id, client_version);
            }

            Packet::Disconnect => {
                info!("Connection {} asked to disconnect", connection_id);
                self.release_client(connection_id);
            }

            Packet::PushPhase { .. } => {
                warn!("Unexpected packet type from connection {}", connection_id);
            }
        }
    }

    fn register_client(&mut self, connection_id: u32, client_version: u32) {
        let Some(endpoint) = self.connections.get(&connection_id) else {
            warn!("Registration from unknown connection {}", connection_id);
            return;
        };

        if client_version != CLIENT_VERSION {
            warn!(
                "Connection {} uses client version {}, expected {}",
                connection_id, client_version, CLIENT_VERSION
            );
            if let Err(e) = endpoint.send(Packet::Disconnect) {
                debug!("Could not refuse connection {}: {}", connection_id, e);
            }
            return;
        }

        if self.game_state.register_client(endpoint.clone()) {
            info!("Connection {} registered as client", connection_id);
            self.client_connection = Some(connection_id);
        }
    }

    fn release_client(&mut self, connection_id: u32) {
        if self.client_connection == Some(connection_id) {
            warn!("Registered client on connection {} is gone", connection_id);
            self.client_connection = None;
            self.game_state.drop_client();
        }
    }

    /// Drawn in order: goal first, player on top.
    pub fn drawables(&self) -> [&dyn Drawable; 2] {
        [&self.goal.piece, &self.player.piece]
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill(self.game_state.background());
        for drawable in self.drawables() {
            drawable.draw(surface);
        }
    }
}
