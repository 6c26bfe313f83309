//! Length-prefixed bincode framing for `Packet`s on a byte stream.

use crate::transport::{Duplex, TransportError};
use crate::Packet;
use bincode::{deserialize, serialize};
use log::{debug, error, warn};
use std::future::Future;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

/// Largest frame body accepted from the peer.
pub const MAX_FRAME_LEN: usize = 2048;

pub async fn write_packet<W>(writer: &mut W, packet: &Packet) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    let data = serialize(packet)?;
    if data.len() > MAX_FRAME_LEN {
        return Err(TransportError::FrameTooLarge(data.len()));
    }

    writer.write_u32(data.len() as u32).await?;
    writer.write_all(&data).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads one frame. A clean end of stream before a length prefix yields
/// `Ok(None)`.
pub async fn read_packet<R>(reader: &mut R) -> Result<Option<Packet>, TransportError>
where
    R: AsyncRead + Unpin,
{
    let len = match reader.read_u32().await {
        Ok(len) => len as usize,
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if len > MAX_FRAME_LEN {
        return Err(TransportError::FrameTooLarge(len));
    }

    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer).await?;
    Ok(Some(deserialize(&buffer)?))
}

/// Connects a TCP stream to a channel-backed `Duplex`.
///
/// The returned future pumps frames in both directions and completes once
/// either half stops: the peer closes, a frame fails to decode, or every
/// sender for the outbound side is dropped. It has to be driven (awaited or
/// spawned) on a tokio runtime.
pub fn bridge(stream: TcpStream) -> (Duplex, impl Future<Output = ()>) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown peer".to_string());
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Packet>();
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<Packet>();
    let duplex = Duplex::from_channels(outbound_tx, inbound_rx);

    let pump = async move {
        let (mut reader, mut writer) = stream.into_split();

        let read_half = async {
            loop {
                match read_packet(&mut reader).await {
                    Ok(Some(packet)) => {
                        if inbound_tx.send(packet).is_err() {
                            debug!("Inbound receiver for {} dropped", peer);
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!("Connection to {} closed by peer", peer);
                        break;
                    }
                    Err(e) => {
                        warn!("Failed to read packet from {}: {}", peer, e);
                        break;
                    }
                }
            }
        };

        let write_half = async {
            while let Some(packet) = outbound_rx.recv().await {
                if let Err(e) = write_packet(&mut writer, &packet).await {
                    error!("Failed to send packet to {}: {}", peer, e);
                    break;
                }
            }
            let _ = writer.shutdown().await;
        };

        tokio::select! {
            _ = read_half => {},
            _ = write_half => {},
        }
    };

    (duplex, pump)
}
