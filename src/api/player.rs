use tracing::{debug, instrument};

use crate::api;
use crate::error::Result;
use crate::model::raw::RawPlayerRecord;
use crate::model::Username;

#[instrument(skip(client, base_url))]
pub(crate) async fn get_player_record(
    client: &reqwest::Client,
    base_url: &str,
    username: &Username,
) -> Result<Option<RawPlayerRecord>> {
    let url = format!("{base_url}/stats/{username}");
    let record = api::get_json::<RawPlayerRecord>(client, &url).await?;
    debug!(found = record.is_some(), "fetched player record");
    Ok(record)
}
