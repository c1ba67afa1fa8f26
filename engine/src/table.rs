use crate::scoring::FormatTable;
use crate::{Category, Match, Team, Zone};
use log::{debug, trace};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One team's line in a standings table. Always derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub team_id: String,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub points: u32,
}

impl TableRow {
    fn new(team: &Team) -> Self {
        Self {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            ..Self::default()
        }
    }

    pub fn set_difference(&self) -> i64 {
        i64::from(self.sets_won) - i64::from(self.sets_lost)
    }

    fn record(&mut self, sets_for: u32, sets_against: u32, won: bool, points: u32) {
        self.played += 1;
        self.sets_won += sets_for;
        self.sets_lost += sets_against;
        if won {
            self.won += 1;
        } else {
            self.lost += 1;
        }
        self.points += points;
    }
}

/// Table order: points, then set difference, then name.
pub fn compare_rows(a: &TableRow, b: &TableRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.set_difference().cmp(&a.set_difference()))
        .then_with(|| a.team_name.cmp(&b.team_name))
}

/// Ranked table for a category, optionally narrowed to one zone.
///
/// The zone only decides which teams get a row. Matches are taken from the
/// whole category and any match with a side that has no row is skipped, which
/// also drops matches against teams deleted after the result was recorded.
pub fn standings(
    matches: &[Match],
    teams: &[Team],
    category: Category,
    zone: Option<Zone>,
) -> Vec<TableRow> {
    standings_with(&FormatTable::default(), matches, teams, category, zone)
}

pub fn standings_with(
    formats: &FormatTable,
    matches: &[Match],
    teams: &[Team],
    category: Category,
    zone: Option<Zone>,
) -> Vec<TableRow> {
    let mut rows: Vec<TableRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for team in teams
        .iter()
        .filter(|t| t.category == category)
        .filter(|t| zone.is_none_or(|z| t.zone == z))
    {
        if index.contains_key(team.id.as_str()) {
            debug!("duplicate team id {} in {}; keeping the first", team.id, category.label());
            continue;
        }
        index.insert(team.id.as_str(), rows.len());
        rows.push(TableRow::new(team));
    }

    let rule = formats.rule(category);
    for m in matches.iter().filter(|m| m.category == category && m.is_finished) {
        let (Some(&home), Some(&away)) = (
            index.get(m.home_team_id.as_str()),
            index.get(m.away_team_id.as_str()),
        ) else {
            trace!("match {} has a side outside this table, skipped", m.id);
            continue;
        };

        let (home_sets, away_sets) = m.set_wins();
        let home_won = home_sets > away_sets;
        let points = rule.points(home_sets, away_sets);

        rows[home].record(home_sets, away_sets, home_won, points.home);
        rows[away].record(away_sets, home_sets, !home_won, points.away);
    }

    // sort_by is stable: full ties keep team-collection order.
    rows.sort_by(compare_rows);
    rows
}
