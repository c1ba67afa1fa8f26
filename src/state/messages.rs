use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use favale_engine::Tournament;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Full snapshot reload; also what the refresher sends.
    LoadTournament,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    TournamentLoaded { tournament: Tournament },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
