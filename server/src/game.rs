use log::{debug, info};
use shared::{GameState, Intent};

/// Owns the canonical game and arbitrates every state transition.
///
/// Mutations hand back a snapshot of the new state when something changed, so
/// the caller decides how to publish it. Nothing here knows about peers.
#[derive(Debug, Default)]
pub struct Authority {
    state: GameState,
}

impl Authority {
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn handle_intent(&mut self, intent: Intent) -> Option<GameState> {
        match intent {
            Intent::Move { index } => self.apply_move(index),
            Intent::Reset => Some(self.reset()),
        }
    }

    pub fn apply_move(&mut self, index: usize) -> Option<GameState> {
        let mark = self.state.current_player;

        if !self.state.apply_move(index) {
            debug!(
                "Ignored move at {} (game over: {}, cell: {:?})",
                index,
                self.state.game_over,
                self.state.board.get(index)
            );
            return None;
        }

        info!("{} played cell {}", mark, index);

        if let Some(winner) = self.state.winner {
            info!("{} wins", winner);
        } else if self.state.is_draw() {
            info!("Game ended in a draw");
        }

        Some(self.state.clone())
    }

    pub fn reset(&mut self) -> GameState {
        self.state.reset();
        info!("Game reset");
        self.state.clone()
    }
}
