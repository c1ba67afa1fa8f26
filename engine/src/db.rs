/// Wire types for the tournament's hosted REST database (PostgREST style).
/// Endpoints: {url}/rest/v1/equipos?select=*,jugadores(*)
///            {url}/rest/v1/partidos?select=*
use crate::{Category, Gender, Zone};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize, Debug, Clone)]
pub struct TeamRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub category: Category,
    pub gender: Gender,
    #[serde(default)]
    pub zone: Option<Zone>,
    /// Nested relation; absent unless the select asks for it.
    #[serde(default)]
    pub jugadores: Option<Vec<PlayerRow>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlayerRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MatchRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub date: NaiveDate,
    /// Postgres `time`, i.e. "HH:MM:SS".
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub court: Option<String>,
    pub category: Category,
    pub gender: Gender,
    #[serde(deserialize_with = "id_string")]
    pub home_team_id: String,
    #[serde(deserialize_with = "id_string")]
    pub away_team_id: String,
    #[serde(default)]
    pub is_finished: Option<bool>,
    /// JSONB column: an array of `{home, away}`, null, or the array
    /// serialized as a string by older writers.
    #[serde(default)]
    pub sets: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub mvp_home_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub mvp_away_id: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
}

/// Row ids are uuids in some tables and bigints in others.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn opt_id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let id = Option::<RawId>::deserialize(deserializer)?;
    Ok(id.map(String::from).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_row_with_nested_players() {
        let row: TeamRow = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Muni A",
                "category": "Sub 13",
                "gender": "Femenino",
                "zone": "B",
                "created_at": "2025-12-01T10:00:00+00:00",
                "jugadores": [{"id": "p1", "team_id": 7, "name": "Lola", "number": 4, "position": null}]
            }"#,
        )
        .unwrap();
        assert_eq!(row.id, "7");
        assert_eq!(row.zone, Some(Zone::B));
        let players = row.jugadores.unwrap();
        assert_eq!(players[0].number, Some(4));
        assert!(players[0].position.is_none());
    }

    #[test]
    fn match_row_tolerates_nulls() {
        let row: MatchRow = serde_json::from_str(
            r#"{
                "id": "m1",
                "date": "2025-12-16",
                "time": "17:00:00",
                "court": null,
                "category": "Sub 12",
                "gender": "Femenino",
                "home_team_id": "t1",
                "away_team_id": "t2",
                "is_finished": null,
                "sets": null,
                "mvp_home_id": "",
                "mvp_away_id": null,
                "stage": "Clasificatoria"
            }"#,
        )
        .unwrap();
        assert!(row.sets.is_none());
        assert!(row.is_finished.is_none());
        assert!(row.mvp_home_id.is_none());
        assert_eq!(row.stage.as_deref(), Some("Clasificatoria"));
    }
}
