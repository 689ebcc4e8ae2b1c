use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::aggregate::{self, LookupOutcome};
use crate::error::Result;
use crate::model::raw::{RawPlayerRecord, RawRank};
use crate::model::Username;

/// Where raw player data comes from.
///
/// [`StatsClient`](crate::StatsClient) talks to the real API; tests and
/// offline tools can plug in their own implementation.
#[async_trait]
pub trait PlayerDataSource: Send + Sync {
    /// Fetch a player's record. `Ok(None)` means the player does not exist.
    async fn fetch_player(&self, username: &Username) -> Result<Option<RawPlayerRecord>>;

    /// Resolve a player's rank string by UUID. `Ok(None)` means no rank is
    /// assigned.
    async fn fetch_rank(&self, uuid: Uuid) -> Result<Option<RawRank>>;
}

#[async_trait]
impl<T: PlayerDataSource + ?Sized> PlayerDataSource for Arc<T> {
    async fn fetch_player(&self, username: &Username) -> Result<Option<RawPlayerRecord>> {
        (**self).fetch_player(username).await
    }

    async fn fetch_rank(&self, uuid: Uuid) -> Result<Option<RawRank>> {
        (**self).fetch_rank(uuid).await
    }
}

/// Fetch a player and assemble their statistics.
///
/// When the record carries no rank, the rank is resolved by UUID in a
/// second call. Failure of that call is logged and the default rank is
/// kept; only failure of the player fetch itself is an error.
#[instrument(skip(source, username), fields(username = %username))]
pub async fn lookup_player<S>(source: &S, username: &Username) -> Result<LookupOutcome>
where
    S: PlayerDataSource + ?Sized,
{
    let Some(record) = source.fetch_player(username).await? else {
        debug!("player not found");
        return Ok(LookupOutcome::NotFound);
    };

    let rank = if record.player_info.rank.is_some() {
        None
    } else {
        let uuid = record.player_info.uuid;
        match source.fetch_rank(uuid).await {
            Ok(rank) => rank.map(|r| r.rank),
            Err(err) => {
                warn!(%uuid, error = %err, "rank lookup failed, keeping default rank");
                None
            }
        }
    };

    Ok(aggregate::build_from(Some(record), rank.as_deref()))
}
