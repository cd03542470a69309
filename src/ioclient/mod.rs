//! Asynchronous gateway clients.
//!
//! A client owns one [`Decoder`], one [`Encoder`], one unbounded message
//! queue, and two background tasks: the receive loop (transport → decoder →
//! queue) and the dispatch loop (queue → user callback). Connection life
//! cycle is a three-state machine: DISCONNECTED → CONNECTED on a successful
//! handshake, back to DISCONNECTED (with a scheduled reconnect) on any
//! transport error, and CLOSED as the terminal state.
//!
//! Received messages are delivered to the callback in wire-arrival order;
//! sends are fire-and-forget from the caller's perspective. The client is
//! single-writer: interleaved Fast Packet sends from concurrent callers
//! would interleave sequence counters.
mod serial;
mod tcp;

use crate::core::Message;
use crate::error::{ConfigError, SendError, TransportError};
use crate::protocol::decoder::{Decoder, DecoderOptions};
use crate::protocol::encoder::Encoder;
use crate::protocol::messages;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Reconnect backoff: initial delay, doubling, capped; no attempt limit.
const BACKOFF_INITIAL: Duration = Duration::from_millis(500);
const BACKOFF_CAP: Duration = Duration::from_secs(10);
/// Cool-down after the gateway refuses the connection outright.
const REFUSAL_BACKOFF: Duration = Duration::from_secs(30);
/// Delay before and between network-map seed requests.
const SEED_SPACING: Duration = Duration::from_secs(2);
/// PGNs requested to seed the network map: address claims, product
/// information, configuration information.
const SEED_PGNS: [u32; 3] = [60928, 126996, 126998];

type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;
type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

//==================================================================================STATE

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayState {
    Disconnected,
    Connected,
    /// Terminal: the client never reconnects after an explicit close.
    Closed,
}

/// Wire dialect spoken by a TCP gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcpDialect {
    /// Fixed 13-byte binary frames (EByte/ECAN converters).
    EByte,
    /// Newline-terminated Actisense ASCII.
    Actisense,
    /// `<id> <bytes>\r\n` Yacht Devices ASCII.
    YachtDevices,
}

#[derive(Debug, Clone)]
enum Endpoint {
    Tcp {
        host: String,
        port: u16,
        dialect: TcpDialect,
    },
    Serial {
        path: String,
    },
}

//==================================================================================CALLBACK

/// User callback invoked by the dispatch loop for every received message.
/// Errors are logged and never stop the loop.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn on_message(
        &self,
        message: Message,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

//==================================================================================CLIENT

struct Shared {
    endpoint: Endpoint,
    state: StdMutex<GatewayState>,
    /// Serializes connect attempts; the receive loop and the connect loop
    /// never run their handshakes concurrently.
    connect_lock: Mutex<()>,
    decoder: Mutex<Decoder>,
    encoder: Mutex<Encoder>,
    writer: Mutex<Option<BoxedWriter>>,
    queue_tx: mpsc::UnboundedSender<Message>,
    queue_rx: Mutex<Option<mpsc::UnboundedReceiver<Message>>>,
    handler: StdMutex<Option<Arc<dyn MessageHandler>>>,
    receive_task: StdMutex<Option<JoinHandle<()>>>,
    dispatch_task: StdMutex<Option<JoinHandle<()>>>,
    seed_task: StdMutex<Option<JoinHandle<()>>>,
    seed_network_map: bool,
}

/// Gateway client handle; cheap to clone, all clones drive the same
/// connection.
#[derive(Clone)]
pub struct GatewayClient {
    shared: Arc<Shared>,
}

impl GatewayClient {
    /// TCP gateway client (EByte binary, Actisense ASCII, or Yacht Devices
    /// ASCII dialect).
    pub fn tcp(
        host: impl Into<String>,
        port: u16,
        dialect: TcpDialect,
        options: DecoderOptions,
    ) -> Result<Self, ConfigError> {
        Self::new(
            Endpoint::Tcp {
                host: host.into(),
                port,
                dialect,
            },
            options,
        )
    }

    /// Serial gateway client (WaveShare-style adapters).
    pub fn serial(path: impl Into<String>, options: DecoderOptions) -> Result<Self, ConfigError> {
        Self::new(Endpoint::Serial { path: path.into() }, options)
    }

    fn new(endpoint: Endpoint, options: DecoderOptions) -> Result<Self, ConfigError> {
        let seed_network_map = options.build_network_map;
        let decoder = Decoder::new(options)?;
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        Ok(Self {
            shared: Arc::new(Shared {
                endpoint,
                state: StdMutex::new(GatewayState::Disconnected),
                connect_lock: Mutex::new(()),
                decoder: Mutex::new(decoder),
                encoder: Mutex::new(Encoder::new()),
                writer: Mutex::new(None),
                queue_tx,
                queue_rx: Mutex::new(Some(queue_rx)),
                handler: StdMutex::new(None),
                receive_task: StdMutex::new(None),
                dispatch_task: StdMutex::new(None),
                seed_task: StdMutex::new(None),
                seed_network_map,
            }),
        })
    }

    /// Register the callback executed for every received message.
    pub fn set_receive_callback(&self, handler: Arc<dyn MessageHandler>) {
        *lock(&self.shared.handler) = Some(handler);
    }

    pub fn state(&self) -> GatewayState {
        *lock(&self.shared.state)
    }

    fn set_state(&self, state: GatewayState) {
        let mut guard = lock(&self.shared.state);
        // CLOSED is terminal.
        if *guard != GatewayState::Closed {
            *guard = state;
        }
    }

    //==================================================================================CONNECT

    /// Establish the connection, retrying with exponential backoff until the
    /// handshake succeeds or the client is closed. Idempotent: returns
    /// immediately when already CONNECTED or CLOSED; concurrent calls are
    /// serialized by a mutex.
    pub async fn connect(&self) -> Result<(), TransportError> {
        if self.state() != GatewayState::Disconnected {
            return Ok(());
        }
        let _guard = self.shared.connect_lock.lock().await;
        if self.state() != GatewayState::Disconnected {
            return Ok(());
        }

        let mut delay = BACKOFF_INITIAL;
        loop {
            if self.state() == GatewayState::Closed {
                return Ok(());
            }
            match self.open_transport().await {
                Ok((reader, writer)) => {
                    *self.shared.writer.lock().await = Some(writer);
                    self.set_state(GatewayState::Connected);
                    info!(endpoint = ?self.shared.endpoint, "connected");

                    // Replace any lingering receive task. Abandoning a
                    // partial Fast Packet reassembly is fine; the table is
                    // an accelerator, not durable state.
                    let client = self.clone();
                    let new_task = tokio::spawn(async move { client.receive_loop(reader).await });
                    if let Some(old) = lock(&self.shared.receive_task).replace(new_task) {
                        old.abort();
                    }

                    self.ensure_dispatch_loop();

                    if self.shared.seed_network_map {
                        let client = self.clone();
                        let seed = tokio::spawn(async move { client.seed_network_map().await });
                        if let Some(old) = lock(&self.shared.seed_task).replace(seed) {
                            old.abort();
                        }
                    }
                    return Ok(());
                }
                Err(error) => {
                    warn!(%error, ?delay, "connection attempt failed; retrying");
                    sleep(delay).await;
                    delay = (delay * 2).min(BACKOFF_CAP);
                }
            }
        }
    }

    /// Boxes `connect`'s future so that `send`'s reconnect-on-demand path
    /// doesn't tie its own `Send`-ness to `connect`'s, which would
    /// otherwise create an unresolvable cycle (`connect` spawns the seed
    /// task, which calls `send`, which calls `connect`).
    fn connect_boxed(&self) -> Pin<Box<dyn Future<Output = Result<(), TransportError>> + Send + '_>> {
        Box::pin(self.connect())
    }

    async fn open_transport(&self) -> Result<(BoxedReader, BoxedWriter), TransportError> {
        match &self.shared.endpoint {
            Endpoint::Tcp { host, port, .. } => {
                info!(%host, port, "connecting");
                let (reader, writer) = tcp::open(host, *port).await?;
                Ok((Box::new(reader), Box::new(writer)))
            }
            Endpoint::Serial { path } => {
                info!(%path, "opening serial port");
                let stream = serial::open(path)?;
                let (reader, writer) = tokio::io::split(stream);
                Ok((Box::new(reader), Box::new(writer)))
            }
        }
    }

    //==================================================================================SEND

    /// Encode the message for this gateway's dialect and write every wire
    /// frame in order. Encoder-level errors are reported without touching
    /// the connection; write errors transition to DISCONNECTED and schedule
    /// a reconnect.
    pub async fn send(&self, message: &Message) -> Result<(), SendError> {
        match self.state() {
            GatewayState::Closed => return Err(SendError::Transport(TransportError::Closed)),
            GatewayState::Disconnected => self.connect_boxed().await.map_err(SendError::Transport)?,
            GatewayState::Connected => {}
        }

        let wires: Vec<Vec<u8>> = {
            let mut encoder = self.shared.encoder.lock().await;
            match &self.shared.endpoint {
                Endpoint::Tcp {
                    dialect: TcpDialect::EByte,
                    ..
                } => encoder.encode_binary(message)?,
                Endpoint::Tcp {
                    dialect: TcpDialect::Actisense,
                    ..
                } => {
                    let line = encoder.encode_actisense(message)?;
                    vec![format!("{line}\n").into_bytes()]
                }
                Endpoint::Tcp {
                    dialect: TcpDialect::YachtDevices,
                    ..
                } => encoder
                    .encode_yacht_devices(message)?
                    .into_iter()
                    .map(String::into_bytes)
                    .collect(),
                Endpoint::Serial { .. } => encoder.encode_serial(message)?,
            }
        };

        let mut guard = self.shared.writer.lock().await;
        let Some(writer) = guard.as_mut() else {
            return Err(SendError::Transport(TransportError::Io(
                std::io::Error::from(std::io::ErrorKind::NotConnected),
            )));
        };

        let result: Result<(), std::io::Error> = async {
            for wire in &wires {
                writer.write_all(wire).await?;
            }
            writer.flush().await
        }
        .await;

        if let Err(error) = result {
            drop(guard);
            self.handle_transport_error();
            return Err(SendError::Transport(TransportError::Io(error)));
        }
        debug!(frames = wires.len(), "sent");
        Ok(())
    }

    /// Close the client. Terminal: cancels both background tasks, closes the
    /// writer, and never reconnects again.
    pub async fn close(&self) {
        *lock(&self.shared.state) = GatewayState::Closed;
        for slot in [
            &self.shared.receive_task,
            &self.shared.dispatch_task,
            &self.shared.seed_task,
        ] {
            if let Some(task) = lock(slot).take() {
                task.abort();
            }
        }
        if let Some(mut writer) = self.shared.writer.lock().await.take() {
            if let Err(error) = writer.shutdown().await {
                debug!(%error, "writer shutdown failed");
            }
        }
        info!("connection closed");
    }

    /// Access to the decoder (e.g. to inspect the observed network map).
    pub async fn with_decoder<R>(&self, f: impl FnOnce(&Decoder) -> R) -> R {
        let decoder = self.shared.decoder.lock().await;
        f(&decoder)
    }

    //==================================================================================BACKGROUND_TASKS

    /// Transport error outside CLOSED: drop to DISCONNECTED and schedule a
    /// reconnect.
    fn handle_transport_error(&self) {
        if self.state() == GatewayState::Closed {
            return;
        }
        self.set_state(GatewayState::Disconnected);
        let client = self.clone();
        tokio::spawn(async move {
            if let Err(error) = client.connect().await {
                warn!(%error, "reconnect failed");
            }
        });
    }

    async fn receive_loop(&self, reader: BoxedReader) {
        let result = match &self.shared.endpoint {
            Endpoint::Tcp {
                dialect: TcpDialect::EByte,
                ..
            } => self.binary_receive_loop(reader).await,
            Endpoint::Tcp { dialect, .. } => self.line_receive_loop(reader, *dialect).await,
            Endpoint::Serial { .. } => self.serial_receive_loop(reader).await,
        };

        if let Err(error) = result {
            if self.state() != GatewayState::Closed {
                warn!(%error, "connection lost while reading; reconnecting");
                self.handle_transport_error();
            }
        }
    }

    /// EByte dialect: fixed 13-byte reads. A literal "Sorry,Limited" banner
    /// means the gateway refused the connection: back off and reconnect.
    async fn binary_receive_loop(&self, mut reader: BoxedReader) -> Result<(), TransportError> {
        info!("TCP receive loop started");
        loop {
            let mut packet = [0u8; 13];
            reader.read_exact(&mut packet).await?;
            if &packet == b"Sorry,Limited" {
                warn!("gateway refused the connection; cooling down");
                sleep(REFUSAL_BACKOFF).await;
                return Err(TransportError::Refused);
            }
            let decoded = self.shared.decoder.lock().await.decode_frame_binary(&packet);
            self.handle_decoded(decoded, || hex::encode(packet));
        }
    }

    /// ASCII dialects: newline-terminated lines.
    async fn line_receive_loop(
        &self,
        reader: BoxedReader,
        dialect: TcpDialect,
    ) -> Result<(), TransportError> {
        info!("line receive loop started");
        let mut reader = BufReader::new(reader);
        let mut line = String::new();
        loop {
            line.clear();
            let read = reader.read_line(&mut line).await?;
            if read == 0 {
                return Err(TransportError::Io(std::io::Error::from(
                    std::io::ErrorKind::UnexpectedEof,
                )));
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let decoded = {
                let mut decoder = self.shared.decoder.lock().await;
                match dialect {
                    TcpDialect::Actisense => decoder.decode_actisense(trimmed),
                    _ => decoder.decode_yacht_devices(trimmed),
                }
            };
            self.handle_decoded(decoded, || trimmed.to_string());
        }
    }

    /// Serial dialect: scan the byte stream for 0xAA .. 0x55 windows.
    async fn serial_receive_loop(&self, mut reader: BoxedReader) -> Result<(), TransportError> {
        info!("serial receive loop started");
        let mut buffer: Vec<u8> = Vec::new();
        let mut chunk = [0u8; 256];
        loop {
            let read = reader.read(&mut chunk).await?;
            if read == 0 {
                return Err(TransportError::Io(std::io::Error::from(
                    std::io::ErrorKind::UnexpectedEof,
                )));
            }
            buffer.extend_from_slice(&chunk[..read]);
            for packet in serial::extract_frames(&mut buffer) {
                let decoded = self.shared.decoder.lock().await.decode_frame_serial(&packet);
                self.handle_decoded(decoded, || hex::encode(&packet));
            }
        }
    }

    /// Push a decoded message to the queue; decode failures drop the frame
    /// with a warning and never tear down the connection.
    fn handle_decoded(
        &self,
        decoded: Result<Option<Message>, crate::error::DecodeError>,
        context: impl FnOnce() -> String,
    ) {
        match decoded {
            Ok(Some(message)) => {
                debug!(pgn = message.pgn, id = message.id, "received message");
                // The receiver lives in Shared; a send can only fail after
                // close, where dropping the message is fine.
                let _ = self.shared.queue_tx.send(message);
            }
            Ok(None) => {}
            Err(error) => warn!(%error, frame = %context(), "decoding failed"),
        }
    }

    /// Dispatch loop: pops the queue in order and invokes the callback.
    /// Spawned once; delivery is at-most-once per enqueue.
    fn ensure_dispatch_loop(&self) {
        let mut slot = lock(&self.shared.dispatch_task);
        if slot.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }
        let shared = self.shared.clone();
        *slot = Some(tokio::spawn(async move {
            let receiver = shared.queue_rx.lock().await.take();
            let Some(mut receiver) = receiver else {
                return;
            };
            while let Some(message) = receiver.recv().await {
                let handler = lock(&shared.handler).clone();
                if let Some(handler) = handler {
                    if let Err(error) = handler.on_message(message).await {
                        warn!(%error, "receive callback failed");
                    }
                }
            }
        }));
    }

    /// Seed the network map: shortly after connecting, request address
    /// claims and product/configuration information so devices identify
    /// themselves.
    async fn seed_network_map(&self) {
        for pgn in SEED_PGNS {
            sleep(SEED_SPACING).await;
            let request = messages::iso_request(pgn);
            if let Err(error) = self.send(&request).await {
                warn!(%error, pgn, "network map seed request failed");
                return;
            }
            debug!(pgn, "network map seed request sent");
        }
    }
}

/// Poison-proof std mutex access; the protected values stay usable even if
/// a task panicked while holding the lock.
fn lock<T>(mutex: &StdMutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
