//! A Rust client for the NADA microdata catalog API.
//!
//! NADA powers the survey catalogs of the IHSN, the World Bank Microdata
//! Library, the ILO and many national statistical offices. This library
//! searches such a catalog and fetches survey metadata, variable lists and
//! per-variable metadata.
//!
//! ```no_run
//! use nada::prelude::*;
//!
//! # async fn run() -> Result<(), CatalogError> {
//! let client = BaseClient::new(IHSN_CATALOG);
//!
//! let params = SearchParams {
//!     country: "ALB".to_string(),
//!     from_year: 2020,
//!     to_year: 2020,
//!     page_size: 2,
//!     ..Default::default()
//! };
//!
//! let surveys = search(&client, &params).await?;
//! let variables = survey::variables::get_survey_variables(&client, &surveys[0].idno).await?;
//! let meta = variable::metadata::get_variable_meta(&client, &surveys[0].idno, &variables.vids[0]).await?;
//! # Ok(())
//! # }
//! ```

#![warn(unused_crate_dependencies)]

/// Client functionality for interacting with catalog APIs
pub mod client;

/// Error types shared by all catalog operations
pub mod error;

/// Lenient decoding of loosely typed fields
pub mod lenient;

/// Search API functionality
pub mod search_api {
    pub use search::search;
    pub use survey::Survey;

    /// Search query building
    pub mod query;
    /// Search execution
    pub mod search;
    /// Survey records
    pub mod survey;
}

/// Catalog endpoints addressed by survey and variable identifiers
pub mod catalog_api {
    /// Survey operations
    pub mod survey {
        pub use metadata::get_survey_meta;
        pub use variables::get_survey_variables;

        /// Survey metadata
        pub mod metadata;
        /// Survey variable listing
        pub mod variables;
    }

    /// Variable operations
    pub mod variable {
        pub use metadata::get_variable_meta;

        /// Variable metadata
        pub mod metadata;
    }
}

/// Commonly used types and functions
pub mod prelude {
    pub use super::catalog_api::survey;
    pub use super::catalog_api::survey::metadata::SurveyMeta;
    pub use super::catalog_api::survey::variables::Variables;
    pub use super::catalog_api::variable;
    pub use super::catalog_api::variable::metadata::Variable;
    pub use super::client::{BaseClient, ClientBuilder, IHSN_CATALOG, ILO_CATALOG, WORLD_BANK_CATALOG};
    pub use super::error::CatalogError;
    pub use super::search_api::query::SearchParams;
    pub use super::search_api::{search, Survey};
}

/// Command-line interface functionality
pub mod cli {
    /// Base CLI functionality
    pub mod base;
    /// Connection settings
    pub mod config;
    /// Survey commands
    pub mod survey;
    /// Variable commands
    pub mod variable;
}
