//! Wire shapes returned by the player-data API.
//!
//! Only the fields we consume are modelled. Derived values the API may
//! also send (`pretty`, `kdr`, `winRate`, `gamesPlayed`) are ignored and
//! recomputed from the counters.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::format;

/// Body of `GET /stats/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawPlayerRecord {
    #[serde(rename = "playerinfo", alias = "playerInfo")]
    pub player_info: RawPlayerInfo,
    #[serde(default)]
    pub stats: RawStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayerInfo {
    pub username: String,
    pub uuid: Uuid,
    #[serde(deserialize_with = "timestamp")]
    pub first_login: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp")]
    pub last_login: DateTime<Utc>,
    /// Formatting-coded rank such as `&6VIP+`.
    #[serde(default)]
    pub rank: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawStats {
    pub playtime: RawPlaytime,
    pub balance: RawBalance,
    pub bedwars: RawBedwars,
    pub parkour: RawParkour,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawPlaytime {
    /// Minutes.
    pub total: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawBalance {
    pub pixels: u64,
    pub shards: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawBedwars {
    pub wins: u64,
    #[serde(alias = "loses")]
    pub losses: u64,
    pub kills: u64,
    pub deaths: u64,
    #[serde(alias = "destroyedBeds")]
    pub beds_destroyed: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawParkour {
    pub completions: u64,
    #[serde(deserialize_with = "best_time")]
    pub best_time: Option<Duration>,
    #[serde(alias = "checkpoints")]
    pub checkpoint: u64,
}

/// Body of `GET /stats/luckperms/rank/{uuid}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRank {
    pub uuid: Uuid,
    pub rank: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Millis(i64),
    Text(String),
}

fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    match TimestampRepr::deserialize(deserializer)? {
        TimestampRepr::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
            .ok_or_else(|| de::Error::custom(format!("timestamp {ms} is out of range"))),
        TimestampRepr::Text(text) => format::parse_timestamp(&text)
            .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp {text:?}"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DurationRepr {
    Millis(u64),
    Text(String),
}

fn best_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
    let best_time = match Option::<DurationRepr>::deserialize(deserializer)? {
        None => None,
        Some(DurationRepr::Millis(ms)) => Some(Duration::from_millis(ms)),
        Some(DurationRepr::Text(text)) => {
            let parsed = format::parse_pretty_duration(&text);
            if parsed.is_none() && !text.trim().is_empty() {
                warn!(text = %text, "ignoring unparseable parkour best time");
            }
            parsed
        }
    };
    Ok(best_time)
}
