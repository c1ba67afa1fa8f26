use crate::app::MenuItem;
use favale_engine::fixture::{MatchFilter, filter_teams};
use favale_engine::{Category, Gender, TableRow, Team, Tournament, cup_standings, standings};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Standings tab
// ---------------------------------------------------------------------------

/// One rendered standings table with its heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitledTable {
    pub title: String,
    pub rows: Vec<TableRow>,
    /// Zone tables colour the cup qualifiers.
    #[serde(skip)]
    pub marks_qualifiers: bool,
}

impl TitledTable {
    fn plain(title: impl Into<String>, rows: Vec<TableRow>) -> Self {
        Self { title: title.into(), rows, marks_qualifiers: false }
    }

    fn zone(title: impl Into<String>, rows: Vec<TableRow>) -> Self {
        Self { title: title.into(), rows, marks_qualifiers: true }
    }
}

/// Tables shown for a category and gender division. The division is applied
/// to the team list before the engine sees it.
pub fn standings_tables(tournament: &Tournament, category: Category, gender: Gender) -> Vec<TitledTable> {
    let teams = tournament.teams_of(gender);
    let matches = tournament.matches.as_slice();

    if category.has_cup_stage() {
        let cups = cup_standings(matches, &teams, category);
        vec![
            TitledTable::zone("Zona A", cups.zone_a),
            TitledTable::zone("Zona B", cups.zone_b),
            TitledTable::plain("Copa Oro", cups.gold),
            TitledTable::plain("Copa Plata", cups.silver),
        ]
    } else {
        vec![TitledTable::plain(
            format!("{} {}", category.label(), gender.label()),
            standings(matches, &teams, category, None),
        )]
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StandingsState {
    pub category: Category,
    pub gender: Gender,
}

impl StandingsState {
    pub fn cycle_category(&mut self) {
        self.category = self.category.next();
    }

    pub fn cycle_gender(&mut self) {
        self.gender = self.gender.next();
    }
}

// ---------------------------------------------------------------------------
// Filters shared by the fixture and teams tabs ("Todas" = None)
// ---------------------------------------------------------------------------

pub fn next_category_filter(current: Option<Category>) -> Option<Category> {
    let first = Category::ALL[0];
    match current {
        None => Some(first),
        Some(c) => Some(c.next()).filter(|next| *next != first),
    }
}

pub fn next_gender_filter(current: Option<Gender>) -> Option<Gender> {
    let first = Gender::ALL[0];
    match current {
        None => Some(first),
        Some(g) => Some(g.next()).filter(|next| *next != first),
    }
}

pub fn filter_label<T>(value: Option<T>, label: impl Fn(&T) -> &'static str) -> &'static str {
    value.as_ref().map(label).unwrap_or("Todas")
}

// ---------------------------------------------------------------------------
// Fixture tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct FixtureState {
    pub category: Option<Category>,
    pub gender: Option<Gender>,
    pub search: String,
    pub scroll_offset: u16,
}

impl FixtureState {
    pub fn filter(&self) -> MatchFilter {
        MatchFilter {
            category: self.category,
            gender: self.gender,
            search: self.search.clone(),
        }
    }

    pub fn cycle_category(&mut self) {
        self.category = next_category_filter(self.category);
        self.scroll_offset = 0;
    }

    pub fn cycle_gender(&mut self) {
        self.gender = next_gender_filter(self.gender);
        self.scroll_offset = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Teams tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct TeamsState {
    pub category: Option<Category>,
    pub gender: Option<Gender>,
    pub search: String,
    pub selected: usize,
}

impl TeamsState {
    pub fn filter(&self) -> MatchFilter {
        MatchFilter {
            category: self.category,
            gender: self.gender,
            search: self.search.clone(),
        }
    }

    pub fn visible<'a>(&self, teams: &'a [Team]) -> Vec<&'a Team> {
        filter_teams(teams, &self.filter())
    }

    pub fn selected_team<'a>(&self, teams: &'a [Team]) -> Option<&'a Team> {
        let visible = self.visible(teams);
        visible.get(self.selected.min(visible.len().saturating_sub(1))).copied()
    }

    pub fn cycle_category(&mut self) {
        self.category = next_category_filter(self.category);
        self.selected = 0;
    }

    pub fn cycle_gender(&mut self) {
        self.gender = next_gender_filter(self.gender);
        self.selected = 0;
    }

    pub fn select_next(&mut self, visible_count: usize) {
        if visible_count == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1).min(visible_count - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Top-level state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    /// Typing into the active tab's search box.
    pub searching: bool,
    pub last_error: Option<String>,
    pub last_updated: Option<String>,
    pub source_label: String,
    pub tournament: Option<Tournament>,
    pub standings: StandingsState,
    pub fixture: FixtureState,
    pub teams: TeamsState,
}

impl AppState {
    pub fn new(source_label: String) -> Self {
        Self { source_label, ..Self::default() }
    }

    /// Search text of the active tab, if that tab has one.
    pub fn search_mut(&mut self) -> Option<&mut String> {
        match self.active_tab {
            MenuItem::Fixture => Some(&mut self.fixture.search),
            MenuItem::Teams => Some(&mut self.teams.search),
            MenuItem::Standings | MenuItem::Help => None,
        }
    }

    pub fn teams_slice(&self) -> &[Team] {
        self.tournament.as_ref().map(|t| t.teams.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use favale_engine::Zone;

    fn team(id: &str, category: Category, gender: Gender, zone: Zone) -> Team {
        Team {
            id: id.into(),
            name: format!("Equipo {id}"),
            category,
            gender,
            zone,
            players: Vec::new(),
        }
    }

    fn tournament() -> Tournament {
        Tournament {
            teams: vec![
                team("a1", Category::Sub13, Gender::Female, Zone::A),
                team("a2", Category::Sub13, Gender::Female, Zone::A),
                team("b1", Category::Sub13, Gender::Female, Zone::B),
                team("m1", Category::Sub13, Gender::Male, Zone::A),
                team("u1", Category::Sub12, Gender::Female, Zone::Unica),
                team("u2", Category::Sub12, Gender::Male, Zone::Unica),
            ],
            matches: Vec::new(),
        }
    }

    #[test]
    fn cup_category_shows_four_tables() {
        let tables = standings_tables(&tournament(), Category::Sub13, Gender::Female);
        let titles: Vec<&str> = tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Zona A", "Zona B", "Copa Oro", "Copa Plata"]);
        assert_eq!(tables[0].rows.len(), 2);
        assert!(tables[0].marks_qualifiers);
        assert!(!tables[2].marks_qualifiers);
        assert_eq!(tables[2].rows.len(), 3);
    }

    #[test]
    fn gender_division_is_applied_before_the_engine() {
        let tables = standings_tables(&tournament(), Category::Sub13, Gender::Male);
        assert_eq!(tables[0].rows.len(), 1);
        assert_eq!(tables[0].rows[0].team_id, "m1");
        assert!(tables[1].rows.is_empty());

        let league = standings_tables(&tournament(), Category::Sub12, Gender::Female);
        assert_eq!(league.len(), 1);
        assert_eq!(league[0].title, "Sub 12 Femenino");
        assert_eq!(league[0].rows[0].team_id, "u1");
    }

    #[test]
    fn filters_cycle_through_todas() {
        let mut c = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            c = next_category_filter(c);
            seen.push(c);
        }
        assert_eq!(
            seen,
            vec![Some(Category::Sub12), Some(Category::Sub13), Some(Category::Sub16), None]
        );
        assert_eq!(next_gender_filter(Some(Gender::Male)), None);
        assert_eq!(filter_label(None::<Gender>, Gender::label), "Todas");
        assert_eq!(filter_label(Some(Category::Sub16), Category::label), "Sub 16");
    }

    #[test]
    fn team_selection_stays_in_bounds() {
        let t = tournament();
        let mut teams = TeamsState { gender: Some(Gender::Female), ..TeamsState::default() };
        let count = teams.visible(&t.teams).len();
        assert_eq!(count, 4);

        for _ in 0..10 {
            teams.select_next(count);
        }
        assert_eq!(teams.selected, 3);
        assert_eq!(teams.selected_team(&t.teams).map(|t| t.id.as_str()), Some("u1"));

        teams.cycle_category();
        assert_eq!(teams.selected, 0);
        assert_eq!(teams.selected_team(&t.teams).map(|t| t.id.as_str()), Some("u1"));

        teams.select_prev();
        assert_eq!(teams.selected, 0);
    }

    #[test]
    fn search_box_follows_the_active_tab() {
        let mut state = AppState::new("embedded seed".into());
        assert!(state.search_mut().is_none());

        state.active_tab = MenuItem::Teams;
        state.search_mut().unwrap().push_str("muni");
        assert_eq!(state.teams.filter().search, "muni");
        assert!(state.fixture.search.is_empty());
    }
}
