//! Client configuration
//!
//! Built from defaults, then environment variables (a `.env` file is loaded
//! by the binary), then command-line overrides.

use std::env;
use std::time::Duration;

use chrono::NaiveDate;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/wordhunt";
pub const DEFAULT_USERNAME: &str = "guest";
pub const DEFAULT_GRID_SIZE: usize = 4;
pub const MIN_GRID_SIZE: usize = 3;
pub const MAX_GRID_SIZE: usize = 6;
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 50;

/// Settings shared by every front-end mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the word hunt API, without trailing slash
    pub api_url: String,
    pub username: String,
    pub grid_size: usize,
    pub leaderboard_limit: usize,
    pub timeout: Duration,
    /// Puzzle date; `None` means today (local time)
    pub date: Option<NaiveDate>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            grid_size: DEFAULT_GRID_SIZE,
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            timeout: Duration::from_secs(10),
            date: None,
        }
    }
}

/// Command-line values that take precedence over the environment
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub username: Option<String>,
    pub grid_size: Option<usize>,
    pub date: Option<NaiveDate>,
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `WORD_HUNT_API_URL` - API base URL
    /// - `WORD_HUNT_USERNAME` - Player name (default: guest)
    /// - `WORD_HUNT_GRID_SIZE` - Grid size 3-6 (default: 4)
    /// - `WORD_HUNT_LEADERBOARD_LIMIT` - Leaderboard rows (default: 50)
    /// - `WORD_HUNT_TIMEOUT_SECS` - HTTP timeout (default: 10)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("WORD_HUNT_API_URL") {
            config.set_api_url(&url);
        }
        if let Some(name) = lookup("WORD_HUNT_USERNAME") {
            config.set_username(&name);
        }
        if let Some(size) = parse_var::<usize, _>(&lookup, "WORD_HUNT_GRID_SIZE") {
            config.grid_size = clamp_grid_size(size);
        }
        if let Some(limit) = parse_var::<usize, _>(&lookup, "WORD_HUNT_LEADERBOARD_LIMIT") {
            config.leaderboard_limit = limit.clamp(1, 200);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "WORD_HUNT_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(secs.max(1));
        }

        config
    }

    /// Apply command-line overrides on top of this configuration
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.api_url {
            self.set_api_url(&url);
        }
        if let Some(name) = overrides.username {
            self.set_username(&name);
        }
        if let Some(size) = overrides.grid_size {
            self.grid_size = clamp_grid_size(size);
        }
        if overrides.date.is_some() {
            self.date = overrides.date;
        }
        self
    }

    /// Date to play: the configured one or today
    #[must_use]
    pub fn puzzle_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(today)
    }

    fn set_api_url(&mut self, url: &str) {
        let trimmed = url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.api_url = trimmed.to_string();
        }
    }

    fn set_username(&mut self, name: &str) {
        self.username = normalize_username(name);
    }
}

/// Trimmed player name, falling back to `guest` when blank
#[must_use]
pub fn normalize_username(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_USERNAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Clamp a requested size into the range the server generates
#[must_use]
pub fn clamp_grid_size(size: usize) -> usize {
    size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
}

#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.username, "guest");
        assert_eq!(config.grid_size, 4);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("WORD_HUNT_API_URL", "https://example.test/api/wordhunt/"),
            ("WORD_HUNT_USERNAME", "  ana  "),
            ("WORD_HUNT_GRID_SIZE", "5"),
            ("WORD_HUNT_TIMEOUT_SECS", "3"),
        ]));

        assert_eq!(config.api_url, "https://example.test/api/wordhunt");
        assert_eq!(config.username, "ana");
        assert_eq!(config.grid_size, 5);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_numbers_are_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("WORD_HUNT_GRID_SIZE", "huge"),
            ("WORD_HUNT_LEADERBOARD_LIMIT", "-4"),
        ]));
        assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
        assert_eq!(config.leaderboard_limit, DEFAULT_LEADERBOARD_LIMIT);
    }

    #[test]
    fn grid_size_is_clamped() {
        let small = ClientConfig::from_lookup(lookup(&[("WORD_HUNT_GRID_SIZE", "1")]));
        let large = ClientConfig::from_lookup(lookup(&[("WORD_HUNT_GRID_SIZE", "12")]));
        assert_eq!(small.grid_size, 3);
        assert_eq!(large.grid_size, 6);
    }

    #[test]
    fn command_line_beats_environment() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let config = ClientConfig::from_lookup(lookup(&[
            ("WORD_HUNT_USERNAME", "env-user"),
            ("WORD_HUNT_GRID_SIZE", "5"),
        ]))
        .with_overrides(Overrides {
            username: Some("cli-user".to_string()),
            grid_size: Some(3),
            date: Some(date),
            ..Overrides::default()
        });

        assert_eq!(config.username, "cli-user");
        assert_eq!(config.grid_size, 3);
        assert_eq!(config.puzzle_date(), date);
    }

    #[test]
    fn blank_username_falls_back_to_guest() {
        assert_eq!(normalize_username("   "), "guest");
        assert_eq!(normalize_username(" bo "), "bo");
    }
}
