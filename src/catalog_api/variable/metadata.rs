use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{evaluate_response, BaseClient};
use crate::error::CatalogError;

/// Metadata of a single variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub idno: String,
    pub vid: String,
    /// The `variable` document as returned by the catalog.
    pub data: Value,
}

#[derive(Debug, Deserialize)]
struct VariableResponse {
    #[serde(default)]
    variable: Value,
}

/// Retrieves the metadata of variable `vid` in survey `idno`.
///
/// Sends a GET request to `<catalog>/{idno}/variables/{vid}` and keeps the
/// `variable` field of the response as an untyped JSON document.
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `idno` - Identifier of the survey.
/// * `vid` - Identifier of the variable, e.g. taken from `Variables::vids`.
///
/// # Returns
///
/// A `Result` wrapping the `Variable` on success, or a `CatalogError` on failure.
pub async fn get_variable_meta(
    client: &BaseClient,
    idno: &str,
    vid: &str,
) -> Result<Variable, CatalogError> {
    let response = client.get(&[idno, "variables", vid], None).await;
    let body = evaluate_response::<VariableResponse>(response).await?;

    Ok(Variable {
        idno: idno.to_string(),
        vid: vid.to_string(),
        data: body.variable,
    })
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use crate::error::APP_ERROR_CODE;

    use super::*;

    const IDNO: &str = "ARG_2021_HFS-Q1Q2_v01_M";
    const VID: &str = "V2";
    const VARIABLE_RESPONSE: &str = include_str!("../../../tests/fixtures/variable.json");

    #[tokio::test]
    async fn test_get_variable_meta() {
        // Arrange
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/api/catalog/{IDNO}/variables/{VID}"));
                then.status(200).body(VARIABLE_RESPONSE);
            })
            .await;

        let client = BaseClient::new(&server.url("/api/catalog"));

        // Act
        let variable = get_variable_meta(&client, IDNO, VID)
            .await
            .expect("Could not get variable metadata");

        // Assert
        mock.assert_async().await;
        assert_eq!(variable.idno, IDNO);
        assert_eq!(variable.vid, VID);
        assert_eq!(variable.data["name"], "country");
        assert_eq!(variable.data["metadata"]["var_catgry"][0]["labl"], "Argentina");
    }

    #[tokio::test]
    async fn test_get_variable_meta_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/{IDNO}/variables/{VID}"));
                then.status(404).body("404 page not found");
            })
            .await;

        let client = BaseClient::new(&server.base_url());
        let err = get_variable_meta(&client, IDNO, VID).await.unwrap_err();

        assert_eq!(err, CatalogError::fetch(404));
    }

    #[tokio::test]
    async fn test_get_variable_meta_invalid_json() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/{IDNO}/variables/{VID}"));
                then.status(200).body("invalid json");
            })
            .await;

        let client = BaseClient::new(&server.base_url());
        let err = get_variable_meta(&client, IDNO, VID).await.unwrap_err();

        assert!(err.is_app());
    }

    #[tokio::test]
    async fn test_get_variable_meta_transport_failure() {
        let client = BaseClient::new("http://127.0.0.1:1");
        let err = get_variable_meta(&client, IDNO, VID).await.unwrap_err();

        assert!(err.is_app());
        assert_eq!(err.status_code(), APP_ERROR_CODE);
    }
}
