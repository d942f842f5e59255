//! Membership tracking and fan-out for connected peers
//!
//! This module handles the server-side bookkeeping of WebSocket peers:
//! - Peer registration on connect and removal on disconnect
//! - Per-peer outbound queues drained by each connection's writer task
//! - Broadcasting serialized state to every live peer
//!
//! The client manager holds no game state. It is owned by the server event
//! loop, so every membership change and every broadcast happens on one task.

use log::{debug, info};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;

/// Represents a connected peer and its outbound queue
#[derive(Debug)]
pub struct Client {
    /// Unique client identifier assigned by the server
    pub id: u32,
    /// Remote address of the WebSocket connection
    pub addr: SocketAddr,
    /// When the peer joined
    pub connected_at: Instant,
    /// Outbound text frames, forwarded to the socket by the writer task.
    /// Unbounded: a stalled peer's backlog grows until its socket closes, and
    /// a broadcast never waits on a slow reader.
    pub sender: UnboundedSender<String>,
}

impl Client {
    pub fn new(id: u32, addr: SocketAddr, sender: UnboundedSender<String>) -> Self {
        Self {
            id,
            addr,
            connected_at: Instant::now(),
            sender,
        }
    }

    /// Queues a text frame for this peer
    ///
    /// Returns false once the peer's writer task has gone away, which means
    /// the connection is closing and the peer should be dropped.
    pub fn send(&self, text: &str) -> bool {
        self.sender.send(text.to_owned()).is_ok()
    }
}

/// Manages the dynamic set of connected peers
///
/// Every peer is a viewer of the one shared board; there is no capacity
/// limit and no distinction between players and spectators.
pub struct ClientManager {
    /// Connected clients indexed by their unique ID
    clients: HashMap<u32, Client>,
    /// Next available client ID for new connections
    next_client_id: u32,
}

impl ClientManager {
    /// Creates an empty roster. Client IDs start from 1.
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
            next_client_id: 1,
        }
    }

    /// Registers a new peer and returns its ID
    pub fn add_client(&mut self, addr: SocketAddr, sender: UnboundedSender<String>) -> u32 {
        let client_id = self.next_client_id;
        self.next_client_id += 1;

        info!("Client {} connected from {}", client_id, addr);
        self.clients
            .insert(client_id, Client::new(client_id, addr, sender));

        client_id
    }

    /// Removes a peer from the roster
    ///
    /// Returns true if the client was found and removed, false if it was
    /// already gone (for example pruned during a broadcast).
    pub fn remove_client(&mut self, client_id: &u32) -> bool {
        if let Some(client) = self.clients.remove(client_id) {
            info!(
                "Client {} disconnected after {:.1}s",
                client.id,
                client.connected_at.elapsed().as_secs_f32()
            );
            true
        } else {
            false
        }
    }

    /// Sends a text frame to a single peer
    pub fn send_to(&self, client_id: u32, text: &str) -> bool {
        self.clients
            .get(&client_id)
            .map(|client| client.send(text))
            .unwrap_or(false)
    }

    /// Sends a text frame to every connected peer
    ///
    /// Peers whose queue is closed are removed. Returns how many peers the
    /// frame was queued for.
    pub fn broadcast(&mut self, text: &str) -> usize {
        let mut delivered = 0;
        let mut closed = Vec::new();

        for (id, client) in &self.clients {
            if client.send(text) {
                delivered += 1;
            } else {
                closed.push(*id);
            }
        }

        for id in closed {
            debug!("Pruning client {} with closed connection", id);
            self.remove_client(&id);
        }

        delivered
    }

    pub fn client_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.clients.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of currently connected clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns true if no clients are currently connected
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl Default for ClientManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn test_addr() -> SocketAddr {
        "127.0.0.1:3000".parse().unwrap()
    }

    fn test_addr2() -> SocketAddr {
        "127.0.0.1:3001".parse().unwrap()
    }

    fn channel() -> (UnboundedSender<String>, UnboundedReceiver<String>) {
        mpsc::unbounded_channel()
    }

    #[test]
    fn test_client_creation() {
        let (tx, _rx) = channel();
        let client = Client::new(1, test_addr(), tx);

        assert_eq!(client.id, 1);
        assert_eq!(client.addr, test_addr());
    }

    #[test]
    fn test_client_send_after_receiver_dropped() {
        let (tx, rx) = channel();
        let client = Client::new(1, test_addr(), tx);

        assert!(client.send("hello"));
        drop(rx);
        assert!(!client.send("hello"));
    }

    #[test]
    fn test_client_manager_creation() {
        let manager = ClientManager::new();
        assert!(manager.is_empty());
        assert_eq!(manager.len(), 0);
    }

    #[test]
    fn test_add_multiple_clients() {
        let mut manager = ClientManager::new();
        let (tx1, _rx1) = channel();
        let (tx2, _rx2) = channel();

        let client_id1 = manager.add_client(test_addr(), tx1);
        let client_id2 = manager.add_client(test_addr2(), tx2);

        assert_eq!(client_id1, 1);
        assert_eq!(client_id2, 2);
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.client_ids(), vec![1, 2]);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut manager = ClientManager::new();
        let (tx1, _rx1) = channel();
        let (tx2, _rx2) = channel();

        let first = manager.add_client(test_addr(), tx1);
        manager.remove_client(&first);
        let second = manager.add_client(test_addr(), tx2);

        assert_ne!(first, second);
    }

    #[test]
    fn test_remove_client() {
        let mut manager = ClientManager::new();
        let (tx, _rx) = channel();

        let client_id = manager.add_client(test_addr(), tx);
        assert!(manager.remove_client(&client_id));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_remove_nonexistent_client() {
        let mut manager = ClientManager::new();
        assert!(!manager.remove_client(&999));
    }

    #[test]
    fn test_send_to_single_client() {
        let mut manager = ClientManager::new();
        let (tx1, mut rx1) = channel();
        let (tx2, mut rx2) = channel();

        let client_id1 = manager.add_client(test_addr(), tx1);
        manager.add_client(test_addr2(), tx2);

        assert!(manager.send_to(client_id1, "only you"));
        assert_eq!(rx1.try_recv().unwrap(), "only you");
        assert!(rx2.try_recv().is_err());

        assert!(!manager.send_to(999, "nobody"));
    }

    #[test]
    fn test_broadcast_reaches_everyone() {
        let mut manager = ClientManager::new();
        let mut receivers = Vec::new();
        for port in 0..3 {
            let (tx, rx) = channel();
            let addr = SocketAddr::from(([127, 0, 0, 1], 4000 + port));
            manager.add_client(addr, tx);
            receivers.push(rx);
        }

        assert_eq!(manager.broadcast("state"), 3);
        for rx in &mut receivers {
            assert_eq!(rx.try_recv().unwrap(), "state");
        }
    }

    #[test]
    fn test_broadcast_prunes_closed_clients() {
        let mut manager = ClientManager::new();
        let (tx1, mut rx1) = channel();
        let (tx2, rx2) = channel();

        manager.add_client(test_addr(), tx1);
        let gone = manager.add_client(test_addr2(), tx2);
        drop(rx2);

        assert_eq!(manager.broadcast("state"), 1);
        assert_eq!(rx1.try_recv().unwrap(), "state");
        assert_eq!(manager.len(), 1);
        assert!(!manager.client_ids().contains(&gone));
    }

    #[test]
    fn test_broadcast_with_no_clients() {
        let mut manager = ClientManager::new();
        assert_eq!(manager.broadcast("state"), 0);
    }

    #[test]
    fn test_stalled_client_keeps_its_backlog() {
        let mut manager = ClientManager::new();
        let (stalled_tx, mut stalled_rx) = channel();
        let (tx, mut rx) = channel();

        manager.add_client(test_addr(), stalled_tx);
        manager.add_client(test_addr2(), tx);

        for n in 0..500 {
            assert_eq!(manager.broadcast(&format!("state {}", n)), 2);
            assert_eq!(rx.try_recv().unwrap(), format!("state {}", n));
        }

        assert_eq!(manager.len(), 2);
        for n in 0..500 {
            assert_eq!(stalled_rx.try_recv().unwrap(), format!("state {}", n));
        }
        assert!(stalled_rx.try_recv().is_err());
    }
}
