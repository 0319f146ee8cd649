use std::collections::HashMap;

use serde::Deserialize;

use crate::client::{evaluate_response, BaseClient};
use crate::error::CatalogError;
use crate::lenient::null_as_default;
use crate::search_api::query::SearchParams;
use crate::search_api::survey::Survey;

/// Body returned by the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: SearchResults,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<Survey>,
}

/// Searches the catalog for surveys matching the given filters.
///
/// Sends a GET request to `<catalog>/search` with the non-zero fields of
/// `params` as query parameters and decodes every row of `result.rows` into a
/// [`Survey`].
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `params` - The search filters.
///
/// # Returns
///
/// The surveys in the order returned by the catalog.
///
/// # Errors
///
/// Returns a [`CatalogError::Fetch`] for non-2xx responses and a
/// [`CatalogError::App`] if the request fails or a row cannot be decoded.
pub async fn search(
    client: &BaseClient,
    params: &SearchParams,
) -> Result<Vec<Survey>, CatalogError> {
    let params: HashMap<String, String> = params.into();
    let response = client.get(&["search"], Some(params)).await;

    let body = evaluate_response::<SearchResponse>(response).await?;

    Ok(body.result.rows)
}
