use crate::db::{MatchRow, PlayerRow, TeamRow};
use crate::{Match, Player, SetResult, Team, Tournament};
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub type SourceResult<T> = Result<T, SourceError>;

const SNAPSHOT_ENV: &str = "FAVALE_SNAPSHOT_JSON";
const DB_URL_ENV: &str = "FAVALE_DB_URL";
const DB_KEY_ENV: &str = "FAVALE_DB_KEY";
const SEED_SNAPSHOT_JSON: &str = include_str!("../seed_snapshot.json");

/// Base URL and anon key of the hosted tournament database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub url: String,
    pub key: String,
}

/// Where tournament snapshots come from. Read-only.
#[derive(Debug, Clone)]
pub struct TournamentSource {
    client: Client,
    timeout: Duration,
    snapshot_path: Option<PathBuf>,
    db: Option<DbConfig>,
}

impl Default for TournamentSource {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("favale/0.1 (terminal standings viewer)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            snapshot_path: None,
            db: None,
        }
    }
}

#[derive(Debug)]
pub enum SourceError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Io(std::io::Error, String),
    Json(serde_json::Error, String),
    NotFound(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            SourceError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            SourceError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            SourceError::Io(e, path) => write!(f, "Could not read {path}: {e}"),
            SourceError::Json(e, what) => write!(f, "Invalid snapshot json in {what}: {e}"),
            SourceError::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Network(e, _) | SourceError::Api(e, _) | SourceError::Parsing(e, _) => Some(e),
            SourceError::Io(e, _) => Some(e),
            SourceError::Json(e, _) => Some(e),
            SourceError::NotFound(_) => None,
        }
    }
}

impl TournamentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source configured from `FAVALE_SNAPSHOT_JSON`, `FAVALE_DB_URL` and
    /// `FAVALE_DB_KEY`. Blank values count as unset.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let mut source = Self::default();
        if let Some(path) = var(SNAPSHOT_ENV) {
            source = source.with_snapshot_path(path);
        }
        if let Some(url) = var(DB_URL_ENV) {
            source = source.with_db(DbConfig {
                url,
                key: var(DB_KEY_ENV).unwrap_or_default(),
            });
        }
        source
    }

    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    pub fn with_db(mut self, db: DbConfig) -> Self {
        self.db = Some(db);
        self
    }

    /// Short description of where snapshots are read from.
    pub fn describe(&self) -> String {
        match (&self.snapshot_path, &self.db) {
            (Some(path), _) => format!("file {}", path.display()),
            (None, Some(db)) => db.url.clone(),
            (None, None) => "embedded seed".into(),
        }
    }

    /// Load the current tournament snapshot.
    ///
    /// Fallback chain:
    /// 1) local snapshot file, when configured.
    /// 2) hosted database, when configured. Failures are returned, not
    ///    papered over with the seed.
    /// 3) embedded seed snapshot (initial teams and fixture).
    pub async fn fetch_tournament(&self) -> SourceResult<Tournament> {
        if let Some(path) = &self.snapshot_path {
            return load_snapshot_file(path);
        }

        if let Some(db) = &self.db {
            return self.fetch_remote(db).await;
        }

        debug!("no snapshot source configured, using the embedded seed");
        load_embedded_seed()
    }

    async fn fetch_remote(&self, db: &DbConfig) -> SourceResult<Tournament> {
        let base = db.url.trim_end_matches('/');
        let teams_url = format!("{base}/rest/v1/equipos?select=*,jugadores(*)");
        let matches_url = format!("{base}/rest/v1/partidos?select=*");

        let team_rows: Vec<TeamRow> = self.get(&teams_url, &db.key).await?;
        if team_rows.is_empty() {
            return Err(SourceError::NotFound(format!("no teams at {teams_url}")));
        }
        let match_rows: Vec<MatchRow> = self.get(&matches_url, &db.key).await?;

        let teams: Vec<Team> = team_rows.into_iter().map(map_team).collect();
        let matches = match_rows
            .into_iter()
            .map(map_match)
            .collect::<SourceResult<Vec<Match>>>()?;
        info!("loaded {} teams and {} matches from {base}", teams.len(), matches.len());

        Ok(Tournament { teams, matches })
    }

    async fn get<T: DeserializeOwned>(&self, url: &str, key: &str) -> SourceResult<T> {
        let response = self
            .client
            .get(url)
            .header("apikey", key)
            .bearer_auth(key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SourceError::Network(e, url.to_owned()))?;

        // Any non-success status is an error here: an empty table would
        // read as a tournament with no results.
        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| SourceError::Parsing(e, url.to_owned())),
            Err(e) => Err(SourceError::Api(e, url.to_owned())),
        }
    }
}

pub fn load_snapshot_file(path: &std::path::Path) -> SourceResult<Tournament> {
    let shown = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| SourceError::Io(e, shown.clone()))?;
    serde_json::from_str(&content).map_err(|e| SourceError::Json(e, shown))
}

pub fn load_embedded_seed() -> SourceResult<Tournament> {
    serde_json::from_str(SEED_SNAPSHOT_JSON)
        .map_err(|e| SourceError::Json(e, "embedded seed snapshot".into()))
}

// ---------------------------------------------------------------------------
// Mapping: database rows → domain types
// ---------------------------------------------------------------------------

fn map_team(row: TeamRow) -> Team {
    let mut players: Vec<Player> = row
        .jugadores
        .unwrap_or_default()
        .into_iter()
        .map(map_player)
        .collect();
    players.sort_by_key(|p| p.number);

    Team {
        id: row.id,
        name: row.name,
        category: row.category,
        gender: row.gender,
        zone: row.zone.unwrap_or_default(),
        players,
    }
}

fn map_player(row: PlayerRow) -> Player {
    Player {
        id: row.id,
        number: row.number.unwrap_or_default(),
        name: row.name,
        position: row.position.unwrap_or_default(),
    }
}

fn map_match(row: MatchRow) -> SourceResult<Match> {
    let sets = parse_sets(row.sets, &row.id)?;
    Ok(Match {
        time: short_time(row.time.as_deref()),
        court: row.court.unwrap_or_default(),
        is_finished: row.is_finished.unwrap_or(false),
        sets,
        id: row.id,
        date: row.date,
        category: row.category,
        gender: row.gender,
        home_team_id: row.home_team_id,
        away_team_id: row.away_team_id,
        mvp_home_id: row.mvp_home_id,
        mvp_away_id: row.mvp_away_id,
        stage: row.stage,
    })
}

/// "17:00:00" → "17:00". Missing times sort first as "00:00".
fn short_time(time: Option<&str>) -> String {
    match time {
        Some(t) => t.chars().take(5).collect(),
        None => "00:00".into(),
    }
}

fn parse_sets(raw: Option<serde_json::Value>, match_id: &str) -> SourceResult<Vec<SetResult>> {
    let what = || format!("sets of match {match_id}");
    match raw {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(serde_json::Value::String(text)) => {
            serde_json::from_str(&text).map_err(|e| SourceError::Json(e, what()))
        }
        Some(value) => serde_json::from_value(value).map_err(|e| SourceError::Json(e, what())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Zone};
    use mockito::Matcher;

    const TEAMS_BODY: &str = r#"[
        {"id": "t7", "name": "Muni A", "category": "Sub 13", "gender": "Femenino", "zone": "B",
         "jugadores": [
            {"id": "p2", "name": "Juana", "number": 11, "position": "Central"},
            {"id": "p1", "name": "Lola", "number": 4, "position": null}
         ]},
        {"id": "t8", "name": "Tolke", "category": "Sub 13", "gender": "Femenino", "zone": "B", "jugadores": []}
    ]"#;

    const MATCHES_BODY: &str = r#"[
        {"id": "m2", "date": "2025-12-16", "time": "18:30:00", "court": "Cancha 4 (Favale)",
         "category": "Sub 13", "gender": "Femenino", "home_team_id": "t7", "away_team_id": "t8",
         "is_finished": true, "sets": [{"home": 25, "away": 19}, {"home": 25, "away": 21}],
         "mvp_home_id": "p2", "mvp_away_id": null, "stage": "Grupo B"}
    ]"#;

    fn db(url: String) -> DbConfig {
        DbConfig { url, key: "anon-key".into() }
    }

    #[tokio::test]
    async fn remote_snapshot_is_mapped_to_domain() {
        let mut server = mockito::Server::new_async().await;
        let teams = server
            .mock("GET", "/rest/v1/equipos")
            .match_query(Matcher::UrlEncoded("select".into(), "*,jugadores(*)".into()))
            .match_header("apikey", "anon-key")
            .match_header("authorization", "Bearer anon-key")
            .with_header("content-type", "application/json")
            .with_body(TEAMS_BODY)
            .create_async()
            .await;
        let matches = server
            .mock("GET", "/rest/v1/partidos")
            .match_query(Matcher::UrlEncoded("select".into(), "*".into()))
            .with_header("content-type", "application/json")
            .with_body(MATCHES_BODY)
            .create_async()
            .await;

        let source = TournamentSource::new().with_db(db(format!("{}/", server.url())));
        let tournament = source.fetch_tournament().await.unwrap();
        teams.assert_async().await;
        matches.assert_async().await;

        let muni = tournament.find_team("t7").unwrap();
        assert_eq!(muni.zone, Zone::B);
        let numbers: Vec<u32> = muni.players.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![4, 11]);

        let m = &tournament.matches[0];
        assert_eq!(m.time, "18:30");
        assert_eq!(m.category, Category::Sub13);
        assert_eq!(m.set_wins(), (2, 0));
        assert_eq!(m.mvp_home_id.as_deref(), Some("p2"));
    }

    #[tokio::test]
    async fn client_error_from_database_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/equipos")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"message":"Invalid API key"}"#)
            .create_async()
            .await;

        let source = TournamentSource::new().with_db(db(server.url()));
        let err = source.fetch_tournament().await.unwrap_err();
        assert!(matches!(err, SourceError::Api(_, _)), "got {err}");
    }

    #[tokio::test]
    async fn empty_team_table_is_not_a_tournament() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/equipos")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let source = TournamentSource::new().with_db(db(server.url()));
        let err = source.fetch_tournament().await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn snapshot_file_wins_over_database() {
        let path = std::env::temp_dir().join(format!("favale-snapshot-{}.json", std::process::id()));
        std::fs::write(&path, SEED_SNAPSHOT_JSON).unwrap();

        let source = TournamentSource::new()
            .with_db(db("http://127.0.0.1:9".into()))
            .with_snapshot_path(&path);
        let tournament = source.fetch_tournament().await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(tournament.teams.len(), 20);
    }

    #[tokio::test]
    async fn missing_snapshot_file_is_an_io_error() {
        let source = TournamentSource::new().with_snapshot_path("/nonexistent/favale.json");
        let err = source.fetch_tournament().await.unwrap_err();
        assert!(matches!(err, SourceError::Io(_, _)));
    }

    #[test]
    fn embedded_seed_parses() {
        let seed = load_embedded_seed().unwrap();
        assert_eq!(seed.teams.len(), 20);
        assert_eq!(seed.matches.len(), 3);
        assert_eq!(seed.teams_of(crate::Gender::Female).len(), 20);
        assert!(seed.matches.iter().all(|m| !m.is_finished));
    }

    #[test]
    fn sets_may_arrive_as_a_json_string() {
        let raw = Some(serde_json::Value::String(r#"[{"home":25,"away":23}]"#.into()));
        let sets = parse_sets(raw, "m1").unwrap();
        assert_eq!(sets, vec![SetResult { home: 25, away: 23 }]);

        assert!(parse_sets(None, "m1").unwrap().is_empty());
        assert!(parse_sets(Some(serde_json::Value::Bool(true)), "m1").is_err());
    }

    #[test]
    fn times_are_cut_to_minutes() {
        assert_eq!(short_time(Some("09:05:00")), "09:05");
        assert_eq!(short_time(Some("20:00")), "20:00");
        assert_eq!(short_time(None), "00:00");
    }

    #[test]
    fn describe_names_the_active_source() {
        assert_eq!(TournamentSource::new().describe(), "embedded seed");
        let source = TournamentSource::new().with_db(db("https://example.test".into()));
        assert_eq!(source.describe(), "https://example.test");
    }
}
