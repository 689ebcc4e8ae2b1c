use tracing::debug;

use crate::model::raw::RawPlayerRecord;
use crate::model::{
    Balance, BedwarsStats, ParkourStats, PlayerIdentity, PlayerStatistics, Playtime, RankInfo,
};
use crate::rank_code;

/// Result of assembling a player's statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(PlayerStatistics),
    /// The API has no record for this player.
    NotFound,
}

/// Assemble [`PlayerStatistics`] from a raw API record.
///
/// `raw_rank` takes precedence over the rank embedded in the record. With
/// neither present the player gets [`RankInfo::member`]. An absent record
/// is [`LookupOutcome::NotFound`].
pub fn build_from(raw: Option<RawPlayerRecord>, raw_rank: Option<&str>) -> LookupOutcome {
    let Some(RawPlayerRecord { player_info, stats }) = raw else {
        return LookupOutcome::NotFound;
    };

    let rank = raw_rank
        .or(player_info.rank.as_deref())
        .map_or_else(RankInfo::member, rank_code::decode);
    debug!(username = %player_info.username, rank = %rank.label, "assembled player statistics");

    let identity = PlayerIdentity {
        username: player_info.username,
        uuid: player_info.uuid,
        first_seen: player_info.first_login,
        last_seen: player_info.last_login,
        rank,
    };

    LookupOutcome::Found(PlayerStatistics {
        identity,
        playtime: Playtime {
            total_minutes: stats.playtime.total,
        },
        balance: Balance {
            pixels: stats.balance.pixels,
            shards: stats.balance.shards,
        },
        bedwars: BedwarsStats {
            wins: stats.bedwars.wins,
            losses: stats.bedwars.losses,
            kills: stats.bedwars.kills,
            deaths: stats.bedwars.deaths,
            beds_destroyed: stats.bedwars.beds_destroyed,
        },
        parkour: ParkourStats {
            completions: stats.parkour.completions,
            // a best time without a completion is stale data
            best_time: stats
                .parkour
                .best_time
                .filter(|_| stats.parkour.completions > 0),
            checkpoints: stats.parkour.checkpoint,
        },
    })
}

/// `wins / (wins + losses)` clamped to `[0, 1]`; `0` when no games were
/// played.
pub fn win_rate(wins: u64, losses: u64) -> f64 {
    let games = wins.saturating_add(losses);
    if games == 0 {
        return 0.0;
    }
    (wins as f64 / games as f64).clamp(0.0, 1.0)
}

/// `kills / max(deaths, 1)`.
///
/// Zero deaths is treated as one death so a flawless player shows their
/// kill count. This is a display convention only.
pub fn kdr(kills: u64, deaths: u64) -> f64 {
    kills as f64 / deaths.max(1) as f64
}
