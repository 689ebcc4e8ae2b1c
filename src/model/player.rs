use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::aggregate;
use crate::error::{Result, StatsError};
use crate::format;
use crate::model::RankInfo;

const MAX_USERNAME_LEN: usize = 16;

/// A validated Minecraft username: 1 to 16 characters of `[A-Za-z0-9_]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Trim and validate user input.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let reason = if trimmed.is_empty() {
            "username is empty"
        } else if trimmed.chars().count() > MAX_USERNAME_LEN {
            "username is longer than 16 characters"
        } else if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            "username may only contain letters, digits and underscores"
        } else {
            return Ok(Self(trimmed.to_string()));
        };
        Err(StatsError::MalformedInput {
            input: input.to_string(),
            reason,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who a player is, as reported by the player-data API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerIdentity {
    pub username: String,
    pub uuid: Uuid,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub rank: RankInfo,
}

impl PlayerIdentity {
    /// Full-body skin render of this player at `size` pixels.
    pub fn avatar_url(&self, size: u32) -> String {
        format::avatar_url(&self.username, size)
    }
}

/// Total time a player has spent on the server.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Playtime {
    pub total_minutes: u64,
}

impl Playtime {
    /// Human-readable rendering such as `207h 25m`.
    pub fn pretty(&self) -> String {
        format::pretty_playtime(self.total_minutes)
    }
}

impl Serialize for Playtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Playtime", 2)?;
        state.serialize_field("total_minutes", &self.total_minutes)?;
        state.serialize_field("pretty", &self.pretty())?;
        state.end()
    }
}

/// The server's two currencies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub pixels: u64,
    pub shards: u64,
}

/// BedWars counters. Rates are derived on access and never stored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BedwarsStats {
    pub wins: u64,
    pub losses: u64,
    pub kills: u64,
    pub deaths: u64,
    pub beds_destroyed: u64,
}

impl BedwarsStats {
    pub fn games_played(&self) -> u64 {
        self.wins.saturating_add(self.losses)
    }

    /// Fraction of games won, in `[0, 1]`; `0` without any games.
    pub fn win_rate(&self) -> f64 {
        aggregate::win_rate(self.wins, self.losses)
    }

    pub fn win_rate_percent(&self) -> f64 {
        self.win_rate() * 100.0
    }

    /// Kills per death, counting zero deaths as one.
    pub fn kdr(&self) -> f64 {
        aggregate::kdr(self.kills, self.deaths)
    }
}

impl Serialize for BedwarsStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BedwarsStats", 8)?;
        state.serialize_field("wins", &self.wins)?;
        state.serialize_field("losses", &self.losses)?;
        state.serialize_field("kills", &self.kills)?;
        state.serialize_field("deaths", &self.deaths)?;
        state.serialize_field("beds_destroyed", &self.beds_destroyed)?;
        state.serialize_field("games_played", &self.games_played())?;
        state.serialize_field("win_rate", &self.win_rate())?;
        state.serialize_field("kdr", &self.kdr())?;
        state.end()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParkourStats {
    pub completions: u64,
    /// `None` until the player finishes a course.
    pub best_time: Option<Duration>,
    pub checkpoints: u64,
}

impl Serialize for ParkourStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ParkourStats", 4)?;
        state.serialize_field("completions", &self.completions)?;
        state.serialize_field(
            "best_time_ms",
            &self
                .best_time
                .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        )?;
        state.serialize_field(
            "best_time",
            &self.best_time.map(format::pretty_duration),
        )?;
        state.serialize_field("checkpoints", &self.checkpoints)?;
        state.end()
    }
}

/// Everything shown on a player's statistics page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStatistics {
    pub identity: PlayerIdentity,
    pub playtime: Playtime,
    pub balance: Balance,
    pub bedwars: BedwarsStats,
    pub parkour: ParkourStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_parse_trims() {
        let username = Username::parse("  Notch \n").unwrap();
        assert_eq!(username.as_str(), "Notch");
    }

    #[test]
    fn test_username_rejects_bad_input() {
        for input in ["", "   ", "seventeen_chars__", "bad name", "ümlaut"] {
            assert!(
                matches!(
                    Username::parse(input),
                    Err(StatsError::MalformedInput { .. })
                ),
                "{input:?} should be rejected"
            );
        }
        assert!(Username::parse("sixteen_chars___").is_ok());
    }

    #[test]
    fn test_bedwars_derived_values() {
        let stats = BedwarsStats {
            wins: 47,
            losses: 53,
            kills: 182,
            deaths: 0,
            beds_destroyed: 35,
        };
        assert_eq!(stats.games_played(), 100);
        assert!((stats.win_rate() - 0.47).abs() < f64::EPSILON);
        assert!((stats.win_rate_percent() - 47.0).abs() < 1e-9);
        assert!((stats.kdr() - 182.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serialized_stats_include_derived_fields() {
        let bedwars = BedwarsStats {
            wins: 1,
            losses: 3,
            kills: 10,
            deaths: 4,
            beds_destroyed: 0,
        };
        let json = serde_json::to_value(bedwars).unwrap();
        assert_eq!(json["games_played"], 4);
        assert_eq!(json["win_rate"], 0.25);
        assert_eq!(json["kdr"], 2.5);

        let playtime = serde_json::to_value(Playtime { total_minutes: 12445 }).unwrap();
        assert_eq!(playtime["pretty"], "207h 25m");

        let parkour = ParkourStats {
            completions: 8,
            best_time: Some(Duration::from_secs(105)),
            checkpoints: 12,
        };
        let json = serde_json::to_value(parkour).unwrap();
        assert_eq!(json["best_time_ms"], 105_000);
        assert_eq!(json["best_time"], "1m 45s");
    }

    #[test]
    fn test_huge_best_time_saturates() {
        let parkour = ParkourStats {
            completions: 1,
            best_time: Some(Duration::MAX),
            checkpoints: 0,
        };
        let json = serde_json::to_value(parkour).unwrap();
        assert_eq!(json["best_time_ms"], u64::MAX);
    }
}
