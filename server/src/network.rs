//! Server network layer: WebSocket transport and the authority event loop

use crate::client_manager::ClientManager;
use crate::game::Authority;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use shared::{decode_intent, encode_state, GameState, Intent};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Messages sent from connection tasks to the main server loop
#[derive(Debug)]
pub enum ServerMessage {
    ClientConnected {
        addr: SocketAddr,
        sender: mpsc::UnboundedSender<String>,
        reply: oneshot::Sender<u32>,
    },
    IntentReceived {
        client_id: u32,
        intent: Intent,
    },
    ClientDisconnected {
        client_id: u32,
    },
    Shutdown,
}

/// Cloneable entry point into the server loop, handed to every connection
#[derive(Debug, Clone)]
pub struct ServerHandle {
    server_tx: mpsc::UnboundedSender<ServerMessage>,
}

impl ServerHandle {
    /// Registers a peer. The current state is queued on `sender` before the
    /// ID comes back. Returns None if the server loop has stopped.
    pub async fn connect(
        &self,
        addr: SocketAddr,
        sender: mpsc::UnboundedSender<String>,
    ) -> Option<u32> {
        let (reply, reply_rx) = oneshot::channel();
        self.server_tx
            .send(ServerMessage::ClientConnected {
                addr,
                sender,
                reply,
            })
            .ok()?;
        reply_rx.await.ok()
    }

    pub fn submit(&self, client_id: u32, intent: Intent) -> bool {
        self.server_tx
            .send(ServerMessage::IntentReceived { client_id, intent })
            .is_ok()
    }

    pub fn disconnect(&self, client_id: u32) {
        if let Err(e) = self
            .server_tx
            .send(ServerMessage::ClientDisconnected { client_id })
        {
            debug!("Server loop gone before disconnect of {}: {}", client_id, e);
        }
    }

    pub fn shutdown(&self) {
        let _ = self.server_tx.send(ServerMessage::Shutdown);
    }
}

/// Owns the game and the peer roster; the only place either is mutated
pub struct Server {
    authority: Authority,
    clients: ClientManager,

    server_tx: mpsc::UnboundedSender<ServerMessage>,
    server_rx: mpsc::UnboundedReceiver<ServerMessage>,
}

impl Server {
    pub fn new() -> Self {
        let (server_tx, server_rx) = mpsc::unbounded_channel();

        Server {
            authority: Authority::new(),
            clients: ClientManager::new(),
            server_tx,
            server_rx,
        }
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            server_tx: self.server_tx.clone(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.authority.state()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Pushes a state snapshot to every connected peer
    fn publish(&mut self, state: &GameState) {
        match encode_state(state) {
            Ok(text) => {
                let delivered = self.clients.broadcast(&text);
                debug!("Broadcast to {} clients: {:?}", delivered, state);
            }
            Err(e) => error!("Failed to encode game state: {}", e),
        }
    }

    /// Applies one message. Returns false when the loop should stop.
    pub fn handle_message(&mut self, message: ServerMessage) -> bool {
        match message {
            ServerMessage::ClientConnected {
                addr,
                sender,
                reply,
            } => {
                let client_id = self.clients.add_client(addr, sender);

                match encode_state(self.authority.state()) {
                    Ok(text) => {
                        self.clients.send_to(client_id, &text);
                    }
                    Err(e) => error!("Failed to encode game state: {}", e),
                }

                if reply.send(client_id).is_err() {
                    warn!("Client {} went away during handshake", client_id);
                    self.clients.remove_client(&client_id);
                }
            }

            ServerMessage::IntentReceived { client_id, intent } => {
                debug!("Client {} sent {:?}", client_id, intent);
                if let Some(state) = self.authority.handle_intent(intent) {
                    self.publish(&state);
                }
            }

            ServerMessage::ClientDisconnected { client_id } => {
                self.clients.remove_client(&client_id);
            }

            ServerMessage::Shutdown => return false,
        }

        true
    }

    /// Main server loop. Messages are applied strictly in arrival order.
    pub async fn run(mut self) {
        info!("Game authority started");

        while let Some(message) = self.server_rx.recv().await {
            if !self.handle_message(message) {
                break;
            }
        }

        info!("Server shutting down");
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP routes: the browser client at `/`, the game socket at `/ws`
pub fn router(handle: ServerHandle) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ws", get(ws_handler))
        .with_state(handle)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(handle): State<ServerHandle>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, addr, handle))
}

/// Drives one peer: a writer task drains its queue into the socket while this
/// task turns inbound text frames into intents.
async fn handle_socket(socket: WebSocket, addr: SocketAddr, handle: ServerHandle) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let Some(client_id) = handle.connect(addr, tx).await else {
        warn!("Rejected connection from {}: server is shutting down", addr);
        return;
    };

    let mut writer = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if let Err(e) = ws_sender.send(Message::Text(text.into())).await {
                debug!("Write to {} failed: {}", addr, e);
                break;
            }
        }
        let _ = ws_sender.close().await;
    });

    loop {
        tokio::select! {
            frame = ws_receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => match decode_intent(text.as_str()) {
                    Ok(intent) => {
                        if !handle.submit(client_id, intent) {
                            break;
                        }
                    }
                    Err(e) => warn!("Ignoring message from client {}: {}", client_id, e),
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("Read from client {} failed: {}", client_id, e);
                    break;
                }
            },
            _ = &mut writer => break,
        }
    }

    handle.disconnect(client_id);
    writer.abort();
}

/// Runs the authority loop and serves HTTP/WebSocket traffic on `listener`
/// until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let server = Server::new();
    let handle = server.handle();
    let game_task = tokio::spawn(server.run());

    info!("Server started on http://{}", listener.local_addr()?);

    let app = router(handle.clone());
    let result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await;

    handle.shutdown();
    if let Err(e) = game_task.await {
        error!("Game loop task panicked: {}", e);
    }

    result
}
