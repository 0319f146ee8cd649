use std::collections::HashMap;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::error::CatalogError;

/// Catalog API of the International Household Survey Network.
pub const IHSN_CATALOG: &str = "https://catalog.ihsn.org/index.php/api/catalog";

/// Catalog API of the World Bank Microdata Library.
pub const WORLD_BANK_CATALOG: &str = "https://microdata.worldbank.org/index.php/api/catalog";

/// Catalog API of the ILO Microdata Repository.
pub const ILO_CATALOG: &str = "https://www.ilo.org/surveyLib/index.php/api/catalog";

/// Public NADA catalogs known to serve the catalog API.
pub const KNOWN_CATALOGS: [&str; 3] = [IHSN_CATALOG, WORLD_BANK_CATALOG, ILO_CATALOG];

#[derive(Debug, Clone)]
pub struct BaseClient {
    api_url: String,
    client: Client,
}

// This is the base client that will be used to make requests to the catalog.
// It wraps a reqwest::Client and joins endpoint paths onto the catalog URL.
impl BaseClient {
    /// Creates a client for the given catalog URL using a default transport.
    ///
    /// The default transport imposes no timeout. Use [`BaseClient::builder`] to
    /// supply a configured `reqwest::Client` or query-string credentials.
    pub fn new(base_url: &str) -> Self {
        Self::builder(base_url).build()
    }

    pub fn builder(base_url: &str) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Get the API URL of the client
    ///
    /// # Returns
    ///
    /// The catalog URL, including credentials appended by [`ClientBuilder::url_auth`]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Sends a GET request to the endpoint addressed by `segments`.
    ///
    /// # Arguments
    /// * `segments` - Path segments appended to the catalog URL. Each segment is percent-encoded.
    /// * `parameters` - Optional query parameters.
    ///
    /// # Returns
    /// The raw response, or an application error if the URL could not be built
    /// or the transport failed.
    pub async fn get(
        &self,
        segments: &[&str],
        parameters: Option<HashMap<String, String>>,
    ) -> Result<reqwest::Response, CatalogError> {
        let url = self.endpoint_url(segments)?;

        // The query string may carry credentials, so only the path is logged
        debug!(path = url.path(), "Calling catalog endpoint");

        let request = self.client.get(url);
        let request = match parameters {
            Some(parameters) => request.query(&parameters),
            None => request,
        };

        request.send().await.map_err(|err| {
            CatalogError::app(format!("failed to complete http request. {err}"))
        })
    }

    /// Builds the request URL for the given path segments.
    ///
    /// Segments are appended to the path of the catalog URL, so a query string
    /// added by [`ClientBuilder::url_auth`] stays in the query.
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|err| CatalogError::app(format!("invalid URL format: {err}")))?;

        url.path_segments_mut()
            .map_err(|_| {
                CatalogError::app(format!(
                    "failed to generate http request. {} cannot be a base URL",
                    self.api_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

/// Builder for [`BaseClient`].
///
/// ```no_run
/// use nada::client::{BaseClient, IHSN_CATALOG};
///
/// let transport = reqwest::Client::builder()
///     .timeout(std::time::Duration::from_secs(30))
///     .build()
///     .unwrap();
///
/// let client = BaseClient::builder(IHSN_CATALOG)
///     .http_client(transport)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_url: String,
    client: Option<Client>,
}

impl ClientBuilder {
    fn new(base_url: &str) -> Self {
        ClientBuilder {
            api_url: base_url.to_string(),
            client: None,
        }
    }

    /// Uses the given transport instead of a default `reqwest::Client`.
    pub fn http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Appends `?username=...&password=...` to the catalog URL.
    ///
    /// Both values are URL-escaped. The catalog reads credentials from the
    /// query string only, so they travel in every request URL and may end up
    /// in server or proxy logs.
    pub fn url_auth(mut self, username: &str, password: &str) -> Self {
        self.api_url.push_str(&format!(
            "?username={}&password={}",
            query_escape(username),
            query_escape(password)
        ));
        self
    }

    pub fn build(self) -> BaseClient {
        BaseClient {
            api_url: self.api_url,
            client: self.client.unwrap_or_default(),
        }
    }
}

fn query_escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

// Helper function to evaluate a response
//
// Non-2xx responses become fetch errors without looking at the body. Any
// other failure, including a body that does not decode into `T`, becomes an
// application error.
pub async fn evaluate_response<T>(
    response: Result<reqwest::Response, CatalogError>,
) -> Result<T, CatalogError>
where
    T: DeserializeOwned,
{
    let response = response?;
    let status = response.status();

    if !status.is_success() {
        warn!(status = status.as_u16(), "Catalog returned a non-success status");
        return Err(CatalogError::fetch(status.as_u16()));
    }

    debug!(status = status.as_u16(), "Received catalog response");

    let raw_content = response
        .text()
        .await
        .map_err(|err| CatalogError::app(format!("failed to read response. {err}")))?;

    serde_json::from_str::<T>(&raw_content)
        .map_err(|err| CatalogError::app(format!("failed to unmarshal response. {err}")))
}
