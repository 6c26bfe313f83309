//! Game phase state machine.
//!
//! Deciding a transition is a pure function of the current phase and an
//! event; the side effects it implies (timestamps, pushing the new phase to
//! the client) come back as an explicit list that `GameState::advance` runs.

use log::{debug, info, warn};
use shared::{Color, Packet, PacketSender, Phase};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A directional command arrived.
    DirectionCommand,
    /// The physics tick found the player touching the goal.
    GoalTouched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RecordStart,
    RecordEnd,
    PushPhase(Phase),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub phase: Phase,
    pub effects: Vec<Effect>,
}

pub fn transition(phase: Phase, event: GameEvent) -> Option<Transition> {
    match (phase, event) {
        (Phase::Ready, GameEvent::DirectionCommand) => Some(Transition {
            phase: Phase::Play,
            effects: vec![Effect::RecordStart, Effect::PushPhase(Phase::Play)],
        }),
        (Phase::Play, GameEvent::GoalTouched) => Some(Transition {
            phase: Phase::Win,
            effects: vec![Effect::RecordEnd, Effect::PushPhase(Phase::Win)],
        }),
        _ => None,
    }
}

/// Outcome of pushing a phase to the client endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Sent,
    /// No client has registered yet; the phase goes out on registration.
    NoClient,
    /// The endpoint's connection is gone; the endpoint was dropped.
    Stale,
}

#[derive(Debug)]
pub struct GameState {
    phase: Phase,
    background: Color,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    client: Option<PacketSender>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Ready,
            background: Phase::Ready.background(),
            started_at: None,
            ended_at: None,
            client: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<Instant> {
        self.ended_at
    }

    /// Time from entering PLAY to entering WIN, once both happened.
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Stores the client endpoint and sends it the current phase.
    ///
    /// Registration is accepted once; later attempts are refused.
    pub fn register_client(&mut self, endpoint: PacketSender) -> bool {
        if self.client.is_some() {
            warn!("Client already registered, ignoring second registration");
            return false;
        }

        info!("Client registered");
        self.client = Some(endpoint);
        self.push(self.phase);
        true
    }

    pub fn drop_client(&mut self) {
        if self.client.take().is_some() {
            info!("Client endpoint released");
        }
    }

    /// Feeds an event through the state machine and runs its effects.
    /// Returns the new phase when a transition happened.
    pub fn advance(&mut self, event: GameEvent, now: Instant) -> Option<Phase> {
        let Transition { phase, effects } = transition(self.phase, event)?;

        info!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.background = phase.background();

        for effect in effects {
            match effect {
                Effect::RecordStart => self.started_at = Some(now),
                Effect::RecordEnd => {
                    self.ended_at = Some(now);
                    if let Some(elapsed) = self.elapsed() {
                        info!("Goal reached in {:.3}s", elapsed.as_secs_f64());
                    }
                }
                Effect::PushPhase(phase) => {
                    self.push(phase);
                }
            }
        }

        Some(phase)
    }

    fn push(&mut self, phase: Phase) -> PushOutcome {
        let Some(client) = &self.client else {
            debug!("No client registered, phase {:?} not pushed", phase);
            return PushOutcome::NoClient;
        };

        match client.send(Packet::PushPhase { phase }) {
            Ok(()) => PushOutcome::Sent,
            Err(e) => {
                warn!("Failed to push phase {:?} to client: {}", phase, e);
                self.client = None;
                PushOutcome::Stale
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
