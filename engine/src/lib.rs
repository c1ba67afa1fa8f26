pub mod client;
pub mod cup;
pub mod db;
pub mod fixture;
pub mod scoring;
pub mod table;

pub use cup::{CupStandings, cup_standings};
pub use scoring::{FormatRule, FormatTable, MatchPoints, points_for};
pub use table::{TableRow, standings};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types: snapshot shape shared by the engine and the viewer
// ---------------------------------------------------------------------------

/// A point-in-time copy of everything the standings are computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Tournament {
    pub fn find_team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Display name for a team id, or a dash when the team is gone.
    pub fn team_name(&self, team_id: &str) -> &str {
        self.find_team(team_id).map(|t| t.name.as_str()).unwrap_or("-")
    }

    /// Teams of one gender division, in snapshot order.
    pub fn teams_of(&self, gender: Gender) -> Vec<Team> {
        self.teams
            .iter()
            .filter(|t| t.gender == gender)
            .cloned()
            .collect()
    }
}

/// Age category. Anything the data source sends that isn't one of the known
/// categories lands in `Other` and simply never matches a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Sub 12")]
    Sub12,
    #[serde(rename = "Sub 13")]
    Sub13,
    #[serde(rename = "Sub 16")]
    Sub16,
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Sub12, Category::Sub13, Category::Sub16];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Sub12 => "Sub 12",
            Category::Sub13 => "Sub 13",
            Category::Sub16 => "Sub 16",
            Category::Other => "Otra",
        }
    }

    /// Sub 13 is split into zones A/B and then into Gold and Silver cups.
    pub fn has_cup_stage(&self) -> bool {
        matches!(self, Category::Sub13)
    }

    pub fn next(self) -> Self {
        match self {
            Category::Sub12 => Category::Sub13,
            Category::Sub13 => Category::Sub16,
            Category::Sub16 | Category::Other => Category::Sub12,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "Femenino")]
    Female,
    #[serde(rename = "Masculino")]
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Femenino",
            Gender::Male => "Masculino",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Gender::Female => Gender::Male,
            Gender::Male => Gender::Female,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    A,
    B,
    /// Single group, no subdivision. Unknown zone names end up here too.
    #[default]
    #[serde(other)]
    Unica,
}

impl Zone {
    pub fn label(&self) -> &'static str {
        match self {
            Zone::A => "Zona A",
            Zone::B => "Zona B",
            Zone::Unica => "Zona Unica",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub gender: Gender,
    #[serde(default)]
    pub zone: Zone,
    #[serde(default)]
    pub players: Vec<Player>, // ordered by shirt number
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub number: u32,
    pub name: String,
    #[serde(default)]
    pub position: String,
}

/// Points scored by each side in one played set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetResult {
    pub home: u32,
    pub away: u32,
}

impl SetResult {
    /// Home takes the set only with a strictly higher score; anything else
    /// goes to away.
    pub fn home_won(&self) -> bool {
        self.home > self.away
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub date: NaiveDate,
    pub time: String, // "HH:MM"
    #[serde(default)]
    pub court: String,
    pub category: Category,
    pub gender: Gender,
    pub home_team_id: String,
    pub away_team_id: String,
    pub is_finished: bool,
    #[serde(default)]
    pub sets: Vec<SetResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mvp_home_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mvp_away_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>, // "Clasificatoria", "Copa Oro", ...
}

impl Match {
    /// Sets won by (home, away) under the standings rule: every set that
    /// isn't a strict home win counts for away.
    pub fn set_wins(&self) -> (u32, u32) {
        self.sets.iter().fold((0, 0), |(home, away), set| {
            if set.home_won() {
                (home + 1, away)
            } else {
                (home, away + 1)
            }
        })
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match(sets: Vec<SetResult>) -> Match {
        Match {
            id: "m1".into(),
            date: NaiveDate::from_ymd_opt(2025, 12, 16).unwrap(),
            time: "17:00".into(),
            court: "Cancha 4 (Favale)".into(),
            category: Category::Sub12,
            gender: Gender::Female,
            home_team_id: "t1".into(),
            away_team_id: "t2".into(),
            is_finished: true,
            sets,
            mvp_home_id: None,
            mvp_away_id: None,
            stage: None,
        }
    }

    #[test]
    fn tied_set_counts_for_away() {
        let m = sample_match(vec![
            SetResult { home: 25, away: 20 },
            SetResult { home: 24, away: 24 },
        ]);
        assert_eq!(m.set_wins(), (1, 1));
    }

    #[test]
    fn match_json_uses_camel_case_fields() {
        let json = r#"{
            "id": "m9",
            "date": "2025-12-17",
            "time": "18:30",
            "category": "Sub 13",
            "gender": "Femenino",
            "homeTeamId": "t7",
            "awayTeamId": "t8",
            "isFinished": true,
            "sets": [{"home": 25, "away": 18}, {"home": 25, "away": 22}]
        }"#;
        let m: Match = serde_json::from_str(json).unwrap();
        assert_eq!(m.category, Category::Sub13);
        assert_eq!(m.home_team_id, "t7");
        assert!(m.court.is_empty());
        assert_eq!(m.set_wins(), (2, 0));
    }

    #[test]
    fn unknown_category_deserializes_as_other() {
        let team: Team = serde_json::from_str(
            r#"{"id":"x","name":"Mayores","category":"Sub 18","gender":"Masculino"}"#,
        )
        .unwrap();
        assert_eq!(team.category, Category::Other);
        assert_eq!(team.zone, Zone::Unica);
        assert!(team.players.is_empty());
    }

    #[test]
    fn category_cycle_visits_every_known_category() {
        let mut c = Category::Sub12;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(c);
            c = c.next();
        }
        assert_eq!(seen, Category::ALL.to_vec());
        assert_eq!(c, Category::Sub12);
    }
}
