use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{evaluate_response, BaseClient};
use crate::error::CatalogError;
use crate::lenient::null_as_default;

/// The variables documented for a survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variables {
    pub idno: String,
    /// Variable entries as returned by the catalog.
    pub variables: Vec<Map<String, Value>>,
    /// The `vid` of every entry in `variables`, in the same order.
    pub vids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VariablesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    variables: Vec<Map<String, Value>>,
}

/// Lists the variables of the survey identified by `idno`.
///
/// Sends a GET request to `<catalog>/{idno}/variables`. Besides the raw entries,
/// the identifiers of all variables are collected into [`Variables::vids`] so
/// they can be passed to
/// [`get_variable_meta`](crate::catalog_api::variable::metadata::get_variable_meta).
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `idno` - Identifier of the survey.
///
/// # Errors
///
/// Besides the usual fetch and application errors, the whole call fails with an
/// application error if any entry lacks a string `vid`.
pub async fn get_survey_variables(
    client: &BaseClient,
    idno: &str,
) -> Result<Variables, CatalogError> {
    let response = client.get(&[idno, "variables"], None).await;
    let body = evaluate_response::<VariablesResponse>(response).await?;

    let vids = extract_vids(&body.variables)?;

    Ok(Variables {
        idno: idno.to_string(),
        variables: body.variables,
        vids,
    })
}

/// Collects the `vid` of each variable entry, preserving order.
pub(crate) fn extract_vids(variables: &[Map<String, Value>]) -> Result<Vec<String>, CatalogError> {
    variables
        .iter()
        .enumerate()
        .map(|(index, variable)| match variable.get("vid") {
            Some(Value::String(vid)) => Ok(vid.clone()),
            _ => Err(CatalogError::app(format!(
                "failed to unmarshal response. vid field not found in variable {index}"
            ))),
        })
        .collect()
}
