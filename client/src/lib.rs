//! # Game Client Library
//!
//! Native presentation client for the shared noughts and crosses board. It
//! renders whatever the authoritative server last broadcast, turns clicks
//! into intents, and shows each click immediately while the server's answer
//! is in flight.
//!
//! ## Architecture Overview
//!
//! ### Server State Wins
//! Every state broadcast replaces the local view outright. There is no
//! merging and no reconciliation: the next broadcast always overwrites any
//! optimistic change.
//!
//! ### Optimistic Display
//! A click on an empty cell marks it locally and passes the turn before the
//! server confirms. Outcomes are never computed locally; the winner and
//! game-over flags come only from the server.
//!
//! ## Module Organization
//!
//! ### Game Module (`game`)
//! The local view, server-state replacement, and move/reset prediction.
//!
//! ### Input Module (`input`)
//! Board geometry, click hit-testing, and edge-triggered mouse/key handling.
//!
//! ### Network Module (`network`)
//! WebSocket connection on a background thread with its own tokio runtime.
//!
//! ### Rendering Module (`rendering`)
//! Grid, marks, status line, reset button, and connection indicator.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::{game, input, network, rendering};
//! use macroquad::prelude::*;
//!
//! async fn frame_loop() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut game = game::ClientGameState::new();
//!     let mut input_manager = input::InputManager::new();
//!     let mut network = network::NetworkClient::spawn("ws://127.0.0.1:3000/ws")?;
//!     let mut renderer = rendering::Renderer::new(screen_width());
//!
//!     loop {
//!         let layout = input::BoardLayout::new(screen_width(), screen_height());
//!
//!         for state in network.poll() {
//!             game.apply_server_state(state);
//!         }
//!
//!         if let Some(intent) = input_manager.update(&layout) {
//!             network.send(intent);
//!         }
//!
//!         let status = game.status_text();
//!         renderer.render(&layout, rendering::RenderConfig {
//!             view: game.view(),
//!             status: &status,
//!             hovered: None,
//!             connected: network.is_connected(),
//!             server_updates: game.server_updates(),
//!         });
//!
//!         next_frame().await;
//!     }
//! }
//! ```

pub mod game;
pub mod input;
pub mod network;
pub mod rendering;
