use crate::game::ClientState;
use crate::input::{InputEvent, InputManager};
use crate::rendering::Renderer;
use log::{debug, error, info, warn};
use macroquad::prelude::KeyCode;
use shared::render::Surface;
use shared::schedule::Ticker;
use shared::{wire, Duplex, Packet, Settings, TransportError, CLIENT_VERSION};
use std::io;
use std::time::Instant;
use tokio::net::TcpStream;
use tokio::sync::oneshot;

pub struct Client {
    connection: Duplex,
    connected: bool,
    quit: bool,

    state: ClientState,
    input_manager: InputManager,
    input_ticker: Ticker,
    renderer: Renderer,
}

impl Client {
    /// Wraps an open connection and registers with the server right away.
    pub fn new(connection: Duplex, settings: &Settings, now: Instant) -> Self {
        let mut client = Client {
            connection,
            connected: true,
            quit: false,
            state: ClientState::new(),
            input_manager: InputManager::new(),
            input_ticker: Ticker::new(settings.input_interval(), now),
            renderer: Renderer::new(settings),
        };

        info!("Registering with server (client version {})", CLIENT_VERSION);
        client.send_packet(Packet::RegisterClient {
            client_version: CLIENT_VERSION,
        });

        client
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// False once the player asked to quit.
    pub fn is_running(&self) -> bool {
        !self.quit
    }

    /// Fire and forget. A failed send is logged and ends the session.
    fn send_packet(&mut self, packet: Packet) {
        if !self.connected {
            debug!("Not connected, dropping {:?}", packet);
            return;
        }

        if let Err(e) = self.connection.send(packet) {
            error!("Error sending to server: {}", e);
            self.connected = false;
        }
    }

    fn handle_packet(&mut self, packet: Packet) {
        match packet {
            Packet::PushPhase { phase } => {
                self.state.set_phase(phase);
            }

            Packet::Disconnect => {
                warn!("Server ended the session");
                self.connected = false;
            }

            _ => {
                warn!("Unexpected packet type");
            }
        }
    }

    /// Applies everything the server pushed since the last call.
    pub fn poll_server(&mut self) {
        loop {
            match self.connection.try_recv() {
                Ok(Some(packet)) => self.handle_packet(packet),
                Ok(None) => break,
                Err(TransportError::Closed) => {
                    if self.connected {
                        warn!("Connection to server lost");
                    }
                    self.connected = false;
                    break;
                }
                Err(e) => {
                    error!("Error receiving from server: {}", e);
                    self.connected = false;
                    break;
                }
            }
        }
    }

    pub fn handle_input(&mut self, events: Vec<InputEvent>) {
        for event in events {
            if event == InputEvent::Quit {
                info!("Quit requested");
                self.quit = true;
            }
            self.send_packet(event.to_packet());
        }
    }

    /// One frame of client work: drain pushes, then sample input if due.
    pub fn update<F>(&mut self, now: Instant, is_down: F)
    where
        F: Fn(KeyCode) -> bool,
    {
        self.poll_server();

        if self.input_ticker.poll(now) > 0 {
            let events = self.input_manager.update(is_down);
            self.handle_input(events);
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.renderer.render(&self.state, surface);
    }
}

/// Connects to `addr` on a dedicated runtime thread and hands back the
/// channel end of the TCP bridge.
pub fn connect(addr: String) -> io::Result<Duplex> {
    let (ready_tx, ready_rx) = oneshot::channel::<io::Result<Duplex>>();

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
                info!("Connecting to server at {}...", addr);
                match TcpStream::connect(&addr).await {
                    Ok(stream) => {
                        if let Err(e) = stream.set_nodelay(true) {
                            warn!("Could not disable Nagle: {}", e);
                        }
                        let (duplex, pump) = wire::bridge(stream);
                        if ready_tx.send(Ok(duplex)).is_ok() {
                            pump.await;
                            info!("Connection to {} closed", addr);
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
