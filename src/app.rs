use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use chrono::Local;
use favale_engine::Tournament;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Standings,
    Fixture,
    Teams,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(source_label: String) -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(source_label),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_tournament_loaded(&mut self, tournament: Tournament) {
        self.state.last_error = None;
        self.state.last_updated = Some(Local::now().format("%H:%M:%S").to_string());
        self.state.tournament = Some(tournament);

        let visible = self.state.teams.visible(self.state.teams_slice()).len();
        self.state.teams.selected = self.state.teams.selected.min(visible.saturating_sub(1));
    }

    /// The previous snapshot stays on screen; only the status line changes.
    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.searching = false;
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Filters and navigation, per tab
    // -----------------------------------------------------------------------

    pub fn cycle_category(&mut self) {
        match self.state.active_tab {
            MenuItem::Standings => self.state.standings.cycle_category(),
            MenuItem::Fixture => self.state.fixture.cycle_category(),
            MenuItem::Teams => self.state.teams.cycle_category(),
            MenuItem::Help => {}
        }
    }

    pub fn cycle_gender(&mut self) {
        match self.state.active_tab {
            MenuItem::Standings => self.state.standings.cycle_gender(),
            MenuItem::Fixture => self.state.fixture.cycle_gender(),
            MenuItem::Teams => self.state.teams.cycle_gender(),
            MenuItem::Help => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.state.active_tab {
            MenuItem::Fixture => self.state.fixture.scroll_down(),
            MenuItem::Teams => {
                let visible = self.state.teams.visible(self.state.teams_slice()).len();
                self.state.teams.select_next(visible);
            }
            MenuItem::Standings | MenuItem::Help => {}
        }
    }

    pub fn move_up(&mut self) {
        match self.state.active_tab {
            MenuItem::Fixture => self.state.fixture.scroll_up(),
            MenuItem::Teams => self.state.teams.select_prev(),
            MenuItem::Standings | MenuItem::Help => {}
        }
    }

    // -----------------------------------------------------------------------
    // Search box (fixture and teams tabs)
    // -----------------------------------------------------------------------

    pub fn start_search(&mut self) {
        self.state.searching = self.state.search_mut().is_some();
    }

    pub fn search_push(&mut self, c: char) {
        if let Some(search) = self.state.search_mut() {
            search.push(c);
        }
        self.reset_position();
    }

    pub fn search_pop(&mut self) {
        if let Some(search) = self.state.search_mut() {
            search.pop();
        }
        self.reset_position();
    }

    pub fn finish_search(&mut self) {
        self.state.searching = false;
    }

    pub fn cancel_search(&mut self) {
        if let Some(search) = self.state.search_mut() {
            search.clear();
        }
        self.state.searching = false;
        self.reset_position();
    }

    fn reset_position(&mut self) {
        match self.state.active_tab {
            MenuItem::Fixture => self.state.fixture.scroll_offset = 0,
            MenuItem::Teams => self.state.teams.selected = 0,
            MenuItem::Standings | MenuItem::Help => {}
        }
    }
}
