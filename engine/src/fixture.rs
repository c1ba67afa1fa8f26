//! Schedule and team queries behind the fixture and team views.

use crate::{Category, Gender, Match, Player, Team};
use chrono::{Datelike, NaiveDate};

const DAY_NAMES: [&str; 7] = [
    "DOMINGO",
    "LUNES",
    "MARTES",
    "MIERCOLES",
    "JUEVES",
    "VIERNES",
    "SABADO",
];

/// `None` on category or gender means "Todas".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilter {
    pub category: Option<Category>,
    pub gender: Option<Gender>,
    pub search: String,
}

impl MatchFilter {
    fn accepts(&self, category: Category, gender: Gender) -> bool {
        self.category.is_none_or(|c| c == category) && self.gender.is_none_or(|g| g == gender)
    }

    fn name_matches(&self, name: &str) -> bool {
        self.search.is_empty() || name.to_lowercase().contains(&self.search.to_lowercase())
    }
}

/// Matches passing the filter, earliest first. The search text is checked
/// against both team names.
pub fn filter_matches<'a>(matches: &'a [Match], teams: &[Team], filter: &MatchFilter) -> Vec<&'a Match> {
    let name_of = |id: &str| {
        teams
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
            .unwrap_or("")
    };

    let mut found: Vec<&Match> = matches
        .iter()
        .filter(|m| filter.accepts(m.category, m.gender))
        .filter(|m| filter.name_matches(name_of(&m.home_team_id)) || filter.name_matches(name_of(&m.away_team_id)))
        .collect();
    sort_by_kickoff(&mut found);
    found
}

pub fn filter_teams<'a>(teams: &'a [Team], filter: &MatchFilter) -> Vec<&'a Team> {
    teams
        .iter()
        .filter(|t| filter.accepts(t.category, t.gender))
        .filter(|t| filter.name_matches(&t.name))
        .collect()
}

/// Consecutive runs of matches on the same date. Expects kickoff order.
pub fn group_by_date<'a>(matches: &[&'a Match]) -> Vec<(NaiveDate, Vec<&'a Match>)> {
    let mut days: Vec<(NaiveDate, Vec<&Match>)> = Vec::new();
    for &m in matches {
        match days.last_mut() {
            Some((date, day)) if *date == m.date => day.push(m),
            _ => days.push((m.date, vec![m])),
        }
    }
    days
}

/// Set score as shown on a scoreboard. Level sets count for nobody here,
/// unlike the standings tally.
pub fn set_score(m: &Match) -> (u8, u8) {
    let count = |won: fn(u32, u32) -> bool| {
        m.sets.iter().filter(|s| won(s.home, s.away)).count().min(u8::MAX as usize) as u8
    };
    (count(|h, a| h > a), count(|h, a| a > h))
}

/// Every match the team takes part in, earliest first.
pub fn team_matches<'a>(matches: &'a [Match], team_id: &str) -> Vec<&'a Match> {
    let mut found: Vec<&Match> = matches.iter().filter(|m| m.involves(team_id)).collect();
    sort_by_kickoff(&mut found);
    found
}

/// MVP mentions for the team's players across finished matches.
pub fn team_mvps<'a>(matches: &'a [Match], team: &'a Team) -> Vec<(&'a Match, &'a Player)> {
    matches
        .iter()
        .filter(|m| m.is_finished)
        .flat_map(|m| {
            [roster_player(team, &m.mvp_home_id), roster_player(team, &m.mvp_away_id)]
                .into_iter()
                .flatten()
                .map(move |p| (m, p))
        })
        .collect()
}

fn roster_player<'a>(team: &'a Team, player_id: &Option<String>) -> Option<&'a Player> {
    let player_id = player_id.as_deref()?;
    team.players.iter().find(|p| p.id == player_id)
}

/// "MARTES 16/12"
pub fn day_label(date: NaiveDate) -> String {
    let day = DAY_NAMES[date.weekday().num_days_from_sunday() as usize];
    format!("{day} {}", date.format("%d/%m"))
}

fn sort_by_kickoff(matches: &mut [&Match]) {
    matches.sort_by(|a, b| (a.date, a.time.as_str()).cmp(&(b.date, b.time.as_str())));
}
