use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    if guard.state.searching {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (KeyCode::Enter, _) => guard.finish_search(),
            (KeyCode::Esc, _) => guard.cancel_search(),
            (KeyCode::Backspace, _) => guard.search_pop(),
            (Char(c), _) => guard.search_push(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Standings),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Fixture),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Teams),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Filters
        (MenuItem::Standings | MenuItem::Fixture | MenuItem::Teams, Char('c'), _) => {
            guard.cycle_category()
        }
        (MenuItem::Standings | MenuItem::Fixture | MenuItem::Teams, Char('g'), _) => {
            guard.cycle_gender()
        }
        (MenuItem::Fixture | MenuItem::Teams, Char('/'), _) => guard.start_search(),
        (MenuItem::Fixture | MenuItem::Teams, KeyCode::Esc, _) => guard.cancel_search(),

        // Scrolling and selection
        (MenuItem::Fixture | MenuItem::Teams, Char('j') | KeyCode::Down, _) => guard.move_down(),
        (MenuItem::Fixture | MenuItem::Teams, Char('k') | KeyCode::Up, _) => guard.move_up(),

        // Global
        (_, Char('r'), _) => {
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadTournament).await;
        }
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
