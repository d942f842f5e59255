//! JSON wire protocol between peers and the authority.
//!
//! Peers send [`Intent`]s as text frames; the authority answers with the full
//! [`GameState`] after every accepted change and once on connect.

use crate::{GameState, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A request from a peer to mutate the shared game.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Intent {
    Move { index: usize },
    Reset,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("cell index {0} is outside the board")]
    IndexOutOfRange(usize),
}

pub fn decode_intent(text: &str) -> Result<Intent, ProtocolError> {
    let intent: Intent = serde_json::from_str(text)?;
    match intent {
        Intent::Move { index } if index >= BOARD_SIZE => {
            Err(ProtocolError::IndexOutOfRange(index))
        }
        intent => Ok(intent),
    }
}

pub fn encode_intent(intent: &Intent) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(intent)?)
}

pub fn encode_state(state: &GameState) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(state)?)
}

pub fn decode_state(text: &str) -> Result<GameState, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}
