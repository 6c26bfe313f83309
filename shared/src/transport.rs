//! Channel-backed duplex connection carrying `Packet`s.
//!
//! Game loops only ever see a `Duplex`: in production one end is pumped over
//! TCP by [`crate::wire::bridge`], in tests two ends are linked in memory with
//! [`Duplex::pair`].

use crate::Packet;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TryRecvError};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection closed")]
    Closed,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("frame of {0} bytes exceeds the maximum frame size")]
    FrameTooLarge(usize),
}

/// Cloneable, fire-and-forget handle for sending packets to one peer.
#[derive(Debug, Clone)]
pub struct PacketSender {
    tx: mpsc::UnboundedSender<Packet>,
}

impl PacketSender {
    /// Queues a packet without waiting for delivery. Fails only when the
    /// connection behind this handle is gone.
    pub fn send(&self, packet: Packet) -> Result<(), TransportError> {
        self.tx.send(packet).map_err(|_| TransportError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
pub struct Duplex {
    outbound: PacketSender,
    inbound: mpsc::UnboundedReceiver<Packet>,
}

impl Duplex {
    pub fn from_channels(
        outbound: mpsc::UnboundedSender<Packet>,
        inbound: mpsc::UnboundedReceiver<Packet>,
    ) -> Self {
        Self {
            outbound: PacketSender { tx: outbound },
            inbound,
        }
    }

    /// Two in-memory ends: whatever one sends, the other receives.
    pub fn pair() -> (Duplex, Duplex) {
        let (a_tx, b_rx) = mpsc::unbounded_channel();
        let (b_tx, a_rx) = mpsc::unbounded_channel();
        (
            Duplex::from_channels(a_tx, a_rx),
            Duplex::from_channels(b_tx, b_rx),
        )
    }

    pub fn send(&self, packet: Packet) -> Result<(), TransportError> {
        self.outbound.send(packet)
    }

    pub fn sender(&self) -> PacketSender {
        self.outbound.clone()
    }

    /// Non-blocking receive for use inside a frame loop.
    pub fn try_recv(&mut self) -> Result<Option<Packet>, TransportError> {
        match self.inbound.try_recv() {
            Ok(packet) => Ok(Some(packet)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TransportError::Closed),
        }
    }

    pub async fn recv(&mut self) -> Option<Packet> {
        self.inbound.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Phase};
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_pair_delivers_in_order() {
        let (client, mut server) = Duplex::pair();

        assert_ok!(client.send(Packet::RegisterClient { client_version: 1 }));
        assert_ok!(client.send(Packet::SetDirection {
            direction: Direction::Up,
            pressed: true,
        }));

        assert_eq!(
            server.try_recv().unwrap(),
            Some(Packet::RegisterClient { client_version: 1 })
        );
        assert_eq!(
            server.try_recv().unwrap(),
            Some(Packet::SetDirection {
                direction: Direction::Up,
                pressed: true,
            })
        );
        assert_eq!(server.try_recv().unwrap(), None);
    }

    #[test]
    fn test_sender_handle_reaches_peer() {
        let (mut client, server) = Duplex::pair();
        let endpoint = server.sender();

        assert_ok!(endpoint.send(Packet::PushPhase { phase: Phase::Play }));
        assert_eq!(
            client.try_recv().unwrap(),
            Some(Packet::PushPhase { phase: Phase::Play })
        );
    }

    #[test]
    fn test_dropped_peer_is_closed() {
        let (mut client, server) = Duplex::pair();
        let endpoint = client.sender();
        drop(server);

        assert!(endpoint.is_closed());
        assert_err!(client.send(Packet::Disconnect));
        assert!(matches!(client.try_recv(), Err(TransportError::Closed)));
    }
}
