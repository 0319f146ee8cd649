use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{evaluate_response, BaseClient};
use crate::error::CatalogError;

/// Metadata of a single survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyMeta {
    pub idno: String,
    /// The `dataset` document as returned by the catalog.
    pub data: Value,
}

#[derive(Debug, Deserialize)]
struct SurveyMetaResponse {
    #[serde(default)]
    dataset: Value,
}

/// Retrieves the metadata of the survey identified by `idno`.
///
/// Sends a GET request to `<catalog>/{idno}` and keeps the `dataset` field of
/// the response as an untyped JSON document. Its shape depends on the
/// metadata schema of the survey (DDI, geospatial, time series, ...).
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `idno` - Identifier of the survey, as found in [`crate::search_api::survey::Survey::idno`].
///
/// # Returns
///
/// A `Result` wrapping the `SurveyMeta` on success, or a `CatalogError` on failure.
pub async fn get_survey_meta(client: &BaseClient, idno: &str) -> Result<SurveyMeta, CatalogError> {
    let response = client.get(&[idno], None).await;
    let body = evaluate_response::<SurveyMetaResponse>(response).await?;

    Ok(SurveyMeta {
        idno: idno.to_string(),
        data: body.dataset,
    })
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use crate::error::APP_ERROR_CODE;

    use super::*;

    const IDNO: &str = "ARG_2021_HFS-Q1Q2_v01_M";
    const SURVEY_META_RESPONSE: &str = include_str!("../../../tests/fixtures/survey_meta.json");

    #[tokio::test]
    async fn test_get_survey_meta() {
        // Arrange
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/api/catalog/{IDNO}"));
                then.status(200).body(SURVEY_META_RESPONSE);
            })
            .await;

        let client = BaseClient::new(&server.url("/api/catalog"));

        // Act
        let meta = get_survey_meta(&client, IDNO)
            .await
            .expect("Could not get survey metadata");

        // Assert
        mock.assert_async().await;
        assert_eq!(meta.idno, IDNO);
        assert_eq!(meta.data["idno"], IDNO);
        assert_eq!(
            meta.data["metadata"]["study_desc"]["title_statement"]["alt_title"],
            "HFS-Q1Q2 2021"
        );
    }

    #[tokio::test]
    async fn test_get_survey_meta_without_dataset() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/{IDNO}"));
                then.status(200).body(r#"{"status": "success"}"#);
            })
            .await;

        let client = BaseClient::new(&server.base_url());
        let meta = get_survey_meta(&client, IDNO).await.unwrap();

        assert_eq!(meta.idno, IDNO);
        assert!(meta.data.is_null());
    }

    #[tokio::test]
    async fn test_get_survey_meta_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/{IDNO}"));
                then.status(404).body("404 page not found");
            })
            .await;

        let client = BaseClient::new(&server.base_url());
        let err = get_survey_meta(&client, IDNO).await.unwrap_err();

        assert_eq!(err, CatalogError::fetch(404));
    }

    #[tokio::test]
    async fn test_get_survey_meta_invalid_json() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/{IDNO}"));
                then.status(200).body("invalid json");
            })
            .await;

        let client = BaseClient::new(&server.base_url());
        let err = get_survey_meta(&client, IDNO).await.unwrap_err();

        assert!(err.is_app());
    }

    #[tokio::test]
    async fn test_get_survey_meta_transport_failure() {
        let client = BaseClient::new("http://127.0.0.1:1");
        let err = get_survey_meta(&client, IDNO).await.unwrap_err();

        assert!(err.is_app());
        assert_eq!(err.status_code(), APP_ERROR_CODE);
    }
}
