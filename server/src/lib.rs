//! # Game Server Library
//!
//! This library provides the authoritative server for a shared game of
//! noughts and crosses. It owns the one canonical board, arbitrates every move
//! and reset, and pushes the full state to all connected peers whenever it
//! changes.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative State
//! The server holds the definitive game. Clients never decide outcomes; they
//! send intents and conform to whatever state the server broadcasts last.
//!
//! ### Peer Management
//! Every WebSocket connection is registered on connect and dropped on
//! disconnect. All peers see the same board; there is no notion of seats,
//! spectators, or sessions.
//!
//! ### State Broadcasting
//! After every accepted mutation, and once to each newly connected peer, the
//! full state is serialized to JSON and queued for delivery.
//!
//! ## Architecture Design
//!
//! ### Single-Consumer Event Loop
//! Connection tasks only translate frames into [`network::ServerMessage`]s.
//! One loop task applies them in arrival order, so game state and membership
//! are never touched concurrently and need no locks.
//!
//! ### Mutation Separate From Publishing
//! [`game::Authority`] returns a snapshot when something changed;
//! [`network::Server`] decides to broadcast it through
//! [`client_manager::ClientManager`]. Game rules are tested without a
//! transport.
//!
//! ## Module Organization
//!
//! ### Client Manager Module (`client_manager`)
//! Peer roster and per-peer outbound queues, plus fan-out.
//!
//! ### Game Module (`game`)
//! The authority wrapping the shared rules from the `shared` crate.
//!
//! ### Network Module (`network`)
//! The event loop, the axum router (static browser client at `/`, WebSocket
//! upgrade at `/ws`), and per-connection reader/writer tasks.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let listener = TcpListener::bind("127.0.0.1:3000").await?;
//!
//!     // Serves until Ctrl+C
//!     server::network::serve(listener, async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Malformed or out-of-range intents are logged and ignored; the connection
//! stays open. Moves that break the rules are dropped silently. Transport
//! failures end only the affected connection.

pub mod client_manager;
pub mod game;
pub mod network;
