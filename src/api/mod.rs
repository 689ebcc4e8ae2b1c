pub(crate) mod player;
pub(crate) mod rank;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, StatsError};

/// Fetch a URL and decode the JSON body.
///
/// A 404 and a literal `null` body both mean "no such resource" and yield
/// `Ok(None)`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<Option<T>> {
    debug!(url, "fetching json");

    let response = client.get(url).send().await.map_err(|e| StatsError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        debug!(url, "resource not found");
        return Ok(None);
    }
    if !status.is_success() {
        return Err(StatsError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| StatsError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    serde_json::from_str(&body).map_err(|e| StatsError::Decode {
        url: url.to_owned(),
        source: e,
    })
}
