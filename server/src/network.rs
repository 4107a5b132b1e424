//! Server network layer: accepting connections and driving the dispatcher

use crate::client_manager::{Client, ClientId};
use crate::config::{ServerConfig, MAX_QUEUE};
use crate::dictionary::{Dictionary, WordSource};
use crate::dispatcher::{ClientEvent, Dispatcher};
use crate::error::ServerError;
use log::{debug, error, info, warn};
use shared::LINE_BUFFER_CAPACITY;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{lookup_host, TcpListener, TcpSocket, TcpStream};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Word game server
///
/// Every connection gets a reader task and a writer task. Readers forward raw
/// bytes as [`ClientEvent`]s; the run loop owns the [`Dispatcher`] and is the
/// only place game state is touched.
pub struct Server {
    listener: TcpListener,
    dispatcher: Dispatcher,
    event_tx: mpsc::UnboundedSender<ClientEvent>,
    event_rx: mpsc::UnboundedReceiver<ClientEvent>,
}

impl Server {
    /// Binds the listening socket and picks the first word
    pub async fn bind(
        config: &ServerConfig,
        words: Box<dyn WordSource>,
    ) -> Result<Self, ServerError> {
        let address = config.address();
        let addr = lookup_host(&address)
            .await?
            .next()
            .ok_or_else(|| ServerError::Resolve(address.clone()))?;

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.set_reuseaddr(true)?;
        socket.bind(addr)?;
        let listener = socket.listen(MAX_QUEUE)?;
        info!("Listening on {}", listener.local_addr()?);

        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Ok(Server {
            listener,
            dispatcher: Dispatcher::new(words, config.max_guesses),
            event_tx,
            event_rx,
        })
    }

    /// Loads the word list named in `config` and binds with it.
    ///
    /// This is what the server binary runs on startup; an unreadable or
    /// unusable word list is reported as [`ServerError::Dictionary`] before
    /// any socket is opened.
    pub async fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
        let words = Dictionary::load(&config.dictionary)?;
        info!("Dictionary has {} entries", words.len());
        Self::bind(config, Box::new(words)).await
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Spawns the task that forwards a connection's input to the run loop
    fn spawn_reader(
        id: ClientId,
        mut reader: OwnedReadHalf,
        events: mpsc::UnboundedSender<ClientEvent>,
    ) -> AbortHandle {
        tokio::spawn(async move {
            let mut buffer = [0u8; LINE_BUFFER_CAPACITY];

            loop {
                let event = match reader.read(&mut buffer).await {
                    Ok(0) => ClientEvent::Closed { id },
                    Ok(len) => ClientEvent::Data {
                        id,
                        bytes: buffer[..len].to_vec(),
                    },
                    Err(e) => {
                        debug!("Read from client {} failed: {}", id, e);
                        ClientEvent::Closed { id }
                    }
                };

                let closed = matches!(event, ClientEvent::Closed { .. });
                if events.send(event).is_err() || closed {
                    break;
                }
            }
        })
        .abort_handle()
    }

    /// Spawns the task that writes queued messages to the socket.
    ///
    /// The queue closes when the session is dropped; a failed write ends the
    /// task early and reports the connection as closed.
    fn spawn_writer(
        id: ClientId,
        mut writer: OwnedWriteHalf,
        events: mpsc::UnboundedSender<ClientEvent>,
    ) -> mpsc::UnboundedSender<String> {
        let (outbox, mut queue) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            while let Some(message) = queue.recv().await {
                if let Err(e) = writer.write_all(message.as_bytes()).await {
                    warn!("Write to client {} failed: {}", id, e);
                    let _ = events.send(ClientEvent::Closed { id });
                    return;
                }
            }
            let _ = writer.shutdown().await;
        });

        outbox
    }

    fn accept_client(&mut self, stream: TcpStream, addr: SocketAddr) {
        info!("A new client is connecting from {}", addr);
        if let Err(e) = stream.set_nodelay(true) {
            debug!("Could not set TCP_NODELAY for {}: {}", addr, e);
        }

        let id = self.dispatcher.next_client_id();
        let (read_half, write_half) = stream.into_split();
        let outbox = Self::spawn_writer(id, write_half, self.event_tx.clone());
        let reader = Self::spawn_reader(id, read_half, self.event_tx.clone());

        self.dispatcher
            .client_connected(Client::new(id, addr, outbox).with_reader(reader));
    }

    /// Main server loop.
    ///
    /// Each pass waits until the listener or at least one connection has
    /// something, then services the listener first and the pending connection
    /// events in ascending client order.
    pub async fn run(mut self) -> Result<(), ServerError> {
        info!("Server started successfully");

        loop {
            let mut ready = Vec::new();

            tokio::select! {
                biased;

                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => self.accept_client(stream, addr),
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                },

                event = self.event_rx.recv() => match event {
                    Some(event) => ready.push(event),
                    None => {
                        info!("Server shutting down");
                        return Ok(());
                    }
                },
            }

            while let Ok(event) = self.event_rx.try_recv() {
                ready.push(event);
            }
            // Stable, so events from one client keep their arrival order.
            ready.sort_by_key(ClientEvent::client_id);

            for event in ready {
                self.dispatcher.handle_event(event);
            }
        }
    }
}
