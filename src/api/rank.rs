use tracing::{debug, instrument};
use uuid::Uuid;

use crate::api;
use crate::error::Result;
use crate::model::raw::RawRank;

#[instrument(skip(client, base_url))]
pub(crate) async fn get_rank(
    client: &reqwest::Client,
    base_url: &str,
    uuid: Uuid,
) -> Result<Option<RawRank>> {
    let url = format!("{base_url}/stats/luckperms/rank/{uuid}");
    let rank = api::get_json::<RawRank>(client, &url).await?;
    debug!(rank = ?rank.as_ref().map(|r| &r.rank), "fetched rank");
    Ok(rank)
}
