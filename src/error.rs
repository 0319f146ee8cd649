use thiserror::Error;

/// Status code carried by errors that originate on the client side.
///
/// Real HTTP status codes never exceed 599, so this value cannot be mistaken
/// for a code received from the catalog.
pub const APP_ERROR_CODE: u16 = 1001;

/// Message attached to every [`CatalogError::Fetch`].
pub const NON_SUCCESS_MESSAGE: &str = "non-success status code from the API";

/// Errors returned by every catalog operation.
///
/// A request either fails locally ([`CatalogError::App`]) because the URL could
/// not be built, the transport failed or the body could not be decoded, or the
/// catalog answered with a non-2xx status ([`CatalogError::Fetch`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Request construction, transport or decode failure.
    #[error("application side error: {message} with statuscode: {status_code}")]
    App { message: String, status_code: u16 },

    /// The catalog responded with a non-2xx status.
    #[error("failed to fetch response: {message} with statuscode: {status_code}")]
    Fetch { message: String, status_code: u16 },
}

impl CatalogError {
    /// Creates an application error carrying [`APP_ERROR_CODE`].
    pub fn app(message: impl Into<String>) -> Self {
        CatalogError::App {
            message: message.into(),
            status_code: APP_ERROR_CODE,
        }
    }

    /// Creates a fetch error for the status code received from the catalog.
    pub fn fetch(status_code: u16) -> Self {
        CatalogError::Fetch {
            message: NON_SUCCESS_MESSAGE.to_string(),
            status_code,
        }
    }

    /// Returns the HTTP status received, or [`APP_ERROR_CODE`] for local failures.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::App { status_code, .. } | CatalogError::Fetch { status_code, .. } => {
                *status_code
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CatalogError::App { message, .. } | CatalogError::Fetch { message, .. } => message,
        }
    }

    /// Returns true if the error originated on the client side.
    pub fn is_app(&self) -> bool {
        matches!(self, CatalogError::App { .. })
    }

    /// Returns true if the catalog answered with a non-2xx status.
    pub fn is_fetch(&self) -> bool {
        matches!(self, CatalogError::Fetch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_carries_sentinel() {
        let err = CatalogError::app("failed to complete http request");

        assert!(err.is_app());
        assert!(!err.is_fetch());
        assert_eq!(err.status_code(), APP_ERROR_CODE);
        assert_eq!(err.message(), "failed to complete http request");
    }

    #[test]
    fn test_fetch_error_carries_received_status() {
        let err = CatalogError::fetch(404);

        assert!(err.is_fetch());
        assert_eq!(
            err,
            CatalogError::Fetch {
                message: NON_SUCCESS_MESSAGE.to_string(),
                status_code: 404,
            }
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CatalogError::fetch(503).to_string(),
            "failed to fetch response: non-success status code from the API with statuscode: 503"
        );
        assert_eq!(
            CatalogError::app("boom").to_string(),
            "application side error: boom with statuscode: 1001"
        );
    }
}
