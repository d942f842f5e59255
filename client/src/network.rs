//! Client network layer: a WebSocket connection on a background thread
//!
//! The render loop is synchronous per frame, so the socket lives on its own
//! thread with a current-thread tokio runtime. Intents go out through an
//! unbounded channel; server events come back through a std channel that the
//! render loop drains each frame.

use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use shared::{decode_state, encode_intent, GameState, Intent};
use std::sync::mpsc as std_mpsc;
use std::thread;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Events from the network thread to the render loop
#[derive(Debug)]
pub enum NetworkEvent {
    Connected,
    State(GameState),
    Disconnected { reason: String },
}

pub struct NetworkClient {
    intent_tx: mpsc::UnboundedSender<Intent>,
    event_rx: std_mpsc::Receiver<NetworkEvent>,
    connected: bool,
}

impl NetworkClient {
    /// Starts the network thread and begins connecting to `url`
    pub fn spawn(url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = std_mpsc::channel();
        let url = url.to_string();

        thread::Builder::new()
            .name("network".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        error!("Failed to start network runtime: {}", e);
                        let _ = event_tx.send(NetworkEvent::Disconnected {
                            reason: e.to_string(),
                        });
                        return;
                    }
                };

                runtime.block_on(run_connection(url, intent_rx, event_tx));
            })?;

        Ok(NetworkClient {
            intent_tx,
            event_rx,
            connected: false,
        })
    }

    /// Queues an intent for the server. Returns false if the network thread
    /// has stopped.
    pub fn send(&self, intent: Intent) -> bool {
        self.intent_tx.send(intent).is_ok()
    }

    /// Drains pending events and returns the states received, oldest first
    pub fn poll(&mut self) -> Vec<GameState> {
        let mut states = Vec::new();

        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                NetworkEvent::Connected => self.connected = true,
                NetworkEvent::State(state) => states.push(state),
                NetworkEvent::Disconnected { reason } => {
                    if self.connected {
                        warn!("Disconnected: {}", reason);
                    }
                    self.connected = false;
                }
            }
        }

        states
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

async fn run_connection(
    url: String,
    mut intent_rx: mpsc::UnboundedReceiver<Intent>,
    event_tx: std_mpsc::Sender<NetworkEvent>,
) {
    info!("Connecting to {}", url);

    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            error!("Failed to connect to {}: {}", url, e);
            let _ = event_tx.send(NetworkEvent::Disconnected {
                reason: e.to_string(),
            });
            return;
        }
    };

    info!("Connected to {}", url);
    if event_tx.send(NetworkEvent::Connected).is_err() {
        return;
    }

    let (mut sink, mut source) = stream.split();

    let reason = loop {
        tokio::select! {
            intent = intent_rx.recv() => match intent {
                Some(intent) => {
                    let text = match encode_intent(&intent) {
                        Ok(text) => text,
                        Err(e) => {
                            error!("Failed to encode {:?}: {}", intent, e);
                            continue;
                        }
                    };
                    if let Err(e) = sink.send(Message::text(text)).await {
                        break e.to_string();
                    }
                }
                None => {
                    let _ = sink.close().await;
                    return;
                }
            },

            frame = source.next() => match frame {
                Some(Ok(Message::Text(text))) => match decode_state(text.as_str()) {
                    Ok(state) => {
                        debug!("Server state: {:?}", state);
                        if event_tx.send(NetworkEvent::State(state)).is_err() {
                            return;
                        }
                    }
                    Err(e) => warn!("Ignoring unreadable state: {}", e),
                },
                Some(Ok(Message::Close(_))) | None => break "server closed the connection".to_string(),
                Some(Ok(_)) => {}
                Some(Err(e)) => break e.to_string(),
            },
        }
    };

    let _ = event_tx.send(NetworkEvent::Disconnected { reason });
}
