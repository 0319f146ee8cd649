use std::collections::HashMap;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use structopt::StructOpt;

use crate::cli::base::{block_on, evaluate_and_print_response, Matcher};
use crate::client::BaseClient;
use crate::search_api;

lazy_static! {
    /// A static mapping of field names to their corresponding query parameter names.
    /// Fields that are missing here are sent under their own name.
    static ref KEY_MAPPINGS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("keywords", "sk");
        m.insert("from_year", "from");
        m.insert("to_year", "to");
        m.insert("page_size", "ps");
        m
    };
}

/// Sort directions accepted by the catalog.
pub const SORT_ORDERS: [&str; 2] = ["asc", "desc"];

/// A value that can be sent as a query parameter.
///
/// Zero values (`0`, `""`, `false`) map to `None` and are left out of
/// the request, so the catalog falls back to its own defaults for them.
pub trait QueryValue {
    fn to_query_value(&self) -> Option<String>;
}

impl QueryValue for String {
    fn to_query_value(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.clone())
    }
}

impl QueryValue for u32 {
    fn to_query_value(&self) -> Option<String> {
        (*self != 0).then(|| self.to_string())
    }
}

impl QueryValue for bool {
    fn to_query_value(&self) -> Option<String> {
        self.then(|| "true".to_string())
    }
}

/// Macro to insert a field into the parameters map if it holds a non-zero value.
///
/// # Arguments
///
/// * `$obj` - The object containing the field
/// * `$field` - The field name to check and insert
/// * `$params` - The parameters map to insert into
macro_rules! insert_if_set {
    ($obj:expr, $field:ident, $params:expr) => {
        if let Some(value) = QueryValue::to_query_value(&$obj.$field) {
            let key = KEY_MAPPINGS
                .get(stringify!($field))
                .unwrap_or(&stringify!($field))
                .to_string();
            $params.insert(key, value);
        }
    };
}

/// Filters accepted by the catalog search endpoint.
///
/// `Default` yields the catalog's usual first page: 30 results sorted by year
/// in ascending order, returned as JSON, with ISO country codes included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, StructOpt)]
#[structopt(about = "Search the survey catalog")]
pub struct SearchParams {
    /// Keywords to search for.
    #[structopt(short = "k", long = "keywords", default_value = "")]
    pub keywords: String,

    /// Earliest collection year.
    #[structopt(long = "from", default_value = "0")]
    pub from_year: u32,

    /// Latest collection year.
    #[structopt(long = "to", default_value = "0")]
    pub to_year: u32,

    /// Country name or ISO code.
    #[structopt(short, long, default_value = "")]
    pub country: String,

    /// Whether country filters match ISO codes.
    #[structopt(long, parse(try_from_str), default_value = "true")]
    pub inc_iso: bool,

    /// Only return surveys created on or after this date.
    #[structopt(long, default_value = "")]
    pub created: String,

    /// Dataset type, e.g. `survey`, `geospatial` or `timeseries`.
    #[structopt(long, default_value = "")]
    pub dtype: String,

    /// Number of results per page.
    #[structopt(long = "page-size", default_value = "30")]
    pub page_size: u32,

    /// Page number, starting at 1.
    #[structopt(long, default_value = "1")]
    pub page: u32,

    /// Field to sort results by.
    #[structopt(long = "sort-by", default_value = "year")]
    pub sort_by: String,

    /// Sort direction, `asc` or `desc`.
    #[structopt(
        long = "sort-order",
        default_value = "asc",
        possible_values = &SORT_ORDERS,
        case_insensitive = true
    )]
    pub sort_order: String,

    /// Response format requested from the catalog.
    #[structopt(long, default_value = "json")]
    pub format: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            keywords: String::new(),
            from_year: 0,
            to_year: 0,
            country: String::new(),
            inc_iso: true,
            created: String::new(),
            dtype: String::new(),
            page_size: 30,
            page: 1,
            sort_by: "year".to_string(),
            sort_order: "asc".to_string(),
            format: "json".to_string(),
        }
    }
}

impl SearchParams {
    /// Converts the `SearchParams` instance into a map of query parameters.
    ///
    /// Fields holding a zero value are omitted. Field names are translated to
    /// the parameter names the catalog expects through `KEY_MAPPINGS`.
    ///
    /// # Returns
    /// A `HashMap` containing the query parameters as key-value pairs.
    pub fn to_query_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();

        insert_if_set!(self, keywords, params);
        insert_if_set!(self, from_year, params);
        insert_if_set!(self, to_year, params);
        insert_if_set!(self, country, params);
        insert_if_set!(self, inc_iso, params);
        insert_if_set!(self, created, params);
        insert_if_set!(self, dtype, params);
        insert_if_set!(self, page_size, params);
        insert_if_set!(self, page, params);
        insert_if_set!(self, sort_by, params);
        insert_if_set!(self, sort_order, params);
        insert_if_set!(self, format, params);

        params
    }
}

impl From<&SearchParams> for HashMap<String, String> {
    fn from(params: &SearchParams) -> Self {
        params.to_query_params()
    }
}

/// Creates default search parameters with the given keywords.
impl FromStr for SearchParams {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SearchParams {
            keywords: s.to_string(),
            ..Default::default()
        })
    }
}

/// Runs the search from the command line and prints the matching surveys.
impl Matcher for SearchParams {
    fn process(self, client: &BaseClient) {
        let response = block_on(search_api::search(client, &self));
        evaluate_and_print_response(response);
    }
}
