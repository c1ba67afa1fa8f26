use log::LevelFilter;
use std::str::FromStr;
use std::time::Duration;

const LOG_ENV: &str = "FAVALE_LOG";
const REFRESH_ENV: &str = "FAVALE_REFRESH_SECS";
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(30);
const MIN_REFRESH: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub refresh_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { full_screen: false, log_level: None, refresh_interval: DEFAULT_REFRESH }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_vars(
            std::env::var(LOG_ENV).ok().as_deref(),
            std::env::var(REFRESH_ENV).ok().as_deref(),
        )
    }

    /// Unparseable values are ignored and the default kept.
    fn from_vars(log_level: Option<&str>, refresh_secs: Option<&str>) -> Self {
        let log_level = log_level.and_then(|v| LevelFilter::from_str(v.trim()).ok());
        let refresh_interval = refresh_secs
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| Duration::from_secs(secs).max(MIN_REFRESH))
            .unwrap_or(DEFAULT_REFRESH);

        Self { log_level, refresh_interval, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let settings = AppSettings::from_vars(None, None);
        assert_eq!(settings.log_level, None);
        assert_eq!(settings.refresh_interval, DEFAULT_REFRESH);
        assert!(!settings.full_screen);
    }

    #[test]
    fn reads_level_and_interval() {
        let settings = AppSettings::from_vars(Some("debug"), Some(" 60 "));
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
        assert_eq!(settings.refresh_interval, Duration::from_secs(60));
    }

    #[test]
    fn interval_has_a_floor_and_ignores_garbage() {
        assert_eq!(AppSettings::from_vars(None, Some("1")).refresh_interval, MIN_REFRESH);
        assert_eq!(AppSettings::from_vars(Some("loud"), Some("soon")).log_level, None);
        assert_eq!(AppSettings::from_vars(None, Some("soon")).refresh_interval, DEFAULT_REFRESH);
    }
}
