//! TCP front end: accepts connections and forwards their packets to the
//! engine as `ServerMessage`s.

use log::{error, info, warn};
use shared::{wire, Packet, PacketSender};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};

/// Messages sent from network tasks to the engine.
#[derive(Debug)]
pub enum ServerMessage {
    Connected {
        connection_id: u32,
        endpoint: PacketSender,
    },
    PacketReceived {
        connection_id: u32,
        packet: Packet,
    },
    Disconnected {
        connection_id: u32,
    },
}

pub struct NetworkServer {
    listener: TcpListener,
    server_tx: mpsc::UnboundedSender<ServerMessage>,
    next_connection_id: u32,
}

impl NetworkServer {
    pub async fn bind(
        addr: &str,
        server_tx: mpsc::UnboundedSender<ServerMessage>,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            server_tx,
            next_connection_id: 1,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the engine goes away.
    pub async fn run(mut self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    if !self.spawn_connection(stream, addr) {
                        info!("Engine gone, network layer stopping");
                        break;
                    }
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            }
        }
    }

    fn spawn_connection(&mut self, stream: TcpStream, addr: SocketAddr) -> bool {
        let connection_id = self.next_connection_id;
        self.next_connection_id += 1;
        info!("Connection {} from {}", connection_id, addr);

        if let Err(e) = stream.set_nodelay(true) {
            warn!("Could not disable Nagle on {}: {}", addr, e);
        }

        let (mut duplex, pump) = wire::bridge(stream);
        let connected = ServerMessage::Connected {
            connection_id,
            endpoint: duplex.sender(),
        };
        if self.server_tx.send(connected).is_err() {
            return false;
        }

        tokio::spawn(pump);

        let server_tx = self.server_tx.clone();
        tokio::spawn(async move {
            while let Some(packet) = duplex.recv().await {
                let message = ServerMessage::PacketReceived {
                    connection_id,
                    packet,
                };
                if let Err(e) = server_tx.send(message) {
                    error!("Failed to send packet to engine: {}", e);
                    return;
                }
            }
            let _ = server_tx.send(ServerMessage::Disconnected { connection_id });
        });

        true
    }
}

/// Binds `addr` and runs the accept loop on a dedicated runtime thread.
///
/// Returns once the listener is bound, so a bind failure surfaces here.
pub fn spawn(
    addr: String,
    server_tx: mpsc::UnboundedSender<ServerMessage>,
) -> io::Result<SocketAddr> {
    let (ready_tx, ready_rx) = oneshot::channel::<io::Result<SocketAddr>>();

    std::thread::Builder::new()
        .name("network".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            runtime.block_on(async move {
                match NetworkServer::bind(&addr, server_tx).await {
                    Ok(server) => {
                        let bound = server.local_addr();
                        let ok = bound.is_ok();
                        let _ = ready_tx.send(bound);
                        if ok {
                            server.run().await;
                        }
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                    }
                }
            });
        })?;

    ready_rx
        .blocking_recv()
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "network thread exited early"))?
}
