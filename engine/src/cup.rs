//! Zone stage → Gold / Silver cup split for the two-zone category.
//!
//! The cup tables are ordinary standings over the qualified teams only, fed
//! with every match of the category. Zone-stage results between two teams
//! that end up in the same cup are therefore carried into the cup table.

use crate::scoring::FormatTable;
use crate::table::{TableRow, standings_with};
use crate::{Category, Match, Team, Zone};
use log::debug;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::Range;

/// Zone ranks (0-based) that go to the Gold Cup.
pub const GOLD_RANKS: Range<usize> = 0..2;
/// Zone ranks (0-based) that go to the Silver Cup.
pub const SILVER_RANKS: Range<usize> = 2..4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CupStandings {
    pub zone_a: Vec<TableRow>,
    pub zone_b: Vec<TableRow>,
    pub gold: Vec<TableRow>,
    pub silver: Vec<TableRow>,
}

pub fn cup_standings(matches: &[Match], teams: &[Team], category: Category) -> CupStandings {
    cup_standings_with(&FormatTable::default(), matches, teams, category)
}

pub fn cup_standings_with(
    formats: &FormatTable,
    matches: &[Match],
    teams: &[Team],
    category: Category,
) -> CupStandings {
    let zone_a = standings_with(formats, matches, teams, category, Some(Zone::A));
    let zone_b = standings_with(formats, matches, teams, category, Some(Zone::B));

    let gold_teams = qualified_teams(teams, &zone_a, &zone_b, GOLD_RANKS);
    let silver_teams = qualified_teams(teams, &zone_a, &zone_b, SILVER_RANKS);
    debug!(
        "{} cups: {} gold qualifiers, {} silver qualifiers",
        category.label(),
        gold_teams.len(),
        silver_teams.len()
    );

    let gold = standings_with(formats, matches, &gold_teams, category, None);
    let silver = standings_with(formats, matches, &silver_teams, category, None);

    CupStandings { zone_a, zone_b, gold, silver }
}

/// Teams ranked within `ranks` in either zone, in team-collection order.
fn qualified_teams(
    teams: &[Team],
    zone_a: &[TableRow],
    zone_b: &[TableRow],
    ranks: Range<usize>,
) -> Vec<Team> {
    let ids: HashSet<&str> = [zone_a, zone_b]
        .into_iter()
        .flat_map(|table| ranked(table, ranks.clone()))
        .map(|row| row.team_id.as_str())
        .collect();

    teams
        .iter()
        .filter(|t| ids.contains(t.id.as_str()))
        .cloned()
        .collect()
}

/// The rows at `ranks`, clipped to the table length.
fn ranked(table: &[TableRow], ranks: Range<usize>) -> &[TableRow] {
    let end = ranks.end.min(table.len());
    &table[ranks.start.min(end)..end]
}
