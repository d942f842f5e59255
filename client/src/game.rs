use shared::GameState;

/// The client's local picture of the shared game.
///
/// Server broadcasts overwrite it wholesale. Local clicks update it
/// optimistically until the next broadcast arrives; outcomes (winner, game
/// over) are only ever taken from the server.
#[derive(Debug, Clone)]
pub struct ClientGameState {
    view: GameState,
    server_updates: u32,
}

impl ClientGameState {
    pub fn new() -> Self {
        Self {
            view: GameState::new(),
            server_updates: 0,
        }
    }

    pub fn view(&self) -> &GameState {
        &self.view
    }

    /// Number of authoritative states received so far
    pub fn server_updates(&self) -> u32 {
        self.server_updates
    }

    pub fn apply_server_state(&mut self, state: GameState) {
        self.view = state;
        self.server_updates += 1;
    }

    /// Marks `index` for the current player and passes the turn, if the local
    /// view allows it. Returns whether the move is worth sending.
    pub fn predict_move(&mut self, index: usize) -> bool {
        if self.view.game_over {
            return false;
        }

        match self.view.board.get_mut(index) {
            Some(cell) if cell.is_none() => {
                *cell = Some(self.view.current_player);
                self.view.current_player = self.view.current_player.opponent();
                true
            }
            _ => false,
        }
    }

    pub fn predict_reset(&mut self) {
        self.view = GameState::new();
    }

    pub fn status_text(&self) -> String {
        match (self.view.game_over, self.view.winner) {
            (true, Some(winner)) => format!("Winner: {}", winner),
            (true, None) => "Draw".to_string(),
            (false, _) => format!("Current Player: {}", self.view.current_player),
        }
    }
}

impl Default for ClientGameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Mark;

    fn server_state_after(moves: &[usize]) -> GameState {
        let mut state = GameState::new();
        for &index in moves {
            state.apply_move(index);
        }
        state
    }

    #[test]
    fn test_new_view_is_empty() {
        let game = ClientGameState::new();
        assert_eq!(game.view(), &GameState::new());
        assert_eq!(game.server_updates(), 0);
        assert_eq!(game.status_text(), "Current Player: X");
    }

    #[test]
    fn test_prediction_marks_cell_and_flips_turn() {
        let mut game = ClientGameState::new();
        assert!(game.predict_move(4));
        assert_eq!(game.view().board[4], Some(Mark::X));
        assert_eq!(game.view().current_player, Mark::O);
    }

    #[test]
    fn test_prediction_rejects_taken_and_invalid_cells() {
        let mut game = ClientGameState::new();
        game.predict_move(4);
        let before = game.view().clone();

        assert!(!game.predict_move(4));
        assert!(!game.predict_move(9));
        assert_eq!(game.view(), &before);
    }

    #[test]
    fn test_prediction_never_declares_a_winner() {
        let mut game = ClientGameState::new();
        for index in [0, 3, 1, 4, 2] {
            assert!(game.predict_move(index));
        }

        assert_eq!(game.view().winner, None);
        assert!(!game.view().game_over);
    }

    #[test]
    fn test_server_state_replaces_prediction() {
        let mut game = ClientGameState::new();
        game.predict_move(0);

        // Another peer got there first
        let authoritative = server_state_after(&[8]);
        game.apply_server_state(authoritative.clone());

        assert_eq!(game.view(), &authoritative);
        assert_eq!(game.view().board[0], None);
        assert_eq!(game.server_updates(), 1);
    }

    #[test]
    fn test_outcome_comes_from_server() {
        let mut game = ClientGameState::new();
        game.apply_server_state(server_state_after(&[0, 3, 1, 4, 2]));
        assert_eq!(game.status_text(), "Winner: X");
        assert!(!game.predict_move(8));

        game.apply_server_state(server_state_after(&[0, 1, 2, 4, 3, 5, 7, 6, 8]));
        assert_eq!(game.status_text(), "Draw");
    }

    #[test]
    fn test_predict_reset() {
        let mut game = ClientGameState::new();
        game.apply_server_state(server_state_after(&[0, 3, 1, 4, 2]));
        game.predict_reset();
        assert_eq!(game.view(), &GameState::new());
    }
}
