use chrono::{DateTime, FixedOffset};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::lenient::{normalize_int_fields, null_as_default, LenientError};

/// Fields that catalogs return either as numbers or as strings.
const LENIENT_INT_FIELDS: [&str; 3] = ["year_start", "year_end", "varcount"];

/// A survey record as returned by the catalog search endpoint.
///
/// Only the commonly used fields are modeled. The full row, as received, is
/// kept in `data` so that catalog-specific fields stay reachable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Survey {
    /// Stable identifier used to address the survey's metadata and variables.
    pub idno: String,
    pub title: String,
    pub nation: String,
    pub year_start: i64,
    pub year_end: i64,
    pub created: Option<DateTime<FixedOffset>>,
    pub changed: Option<DateTime<FixedOffset>>,
    /// Canonical catalog page of the survey.
    pub url: String,
    /// Number of variables documented for the survey.
    pub varcount: i64,
    /// The raw search row.
    pub data: Map<String, Value>,
}

// Typed view of a row after its loosely typed fields were normalized
#[derive(Deserialize)]
struct SurveyRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    idno: String,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    nation: String,
    year_start: i64,
    year_end: i64,
    #[serde(default)]
    created: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    changed: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "null_as_default")]
    url: String,
    varcount: i64,
}

impl Survey {
    /// Decodes a raw search row.
    ///
    /// `year_start`, `year_end` and `varcount` are coerced to integers first,
    /// the remaining fields are decoded as usual. The row itself is retained
    /// unchanged in [`Survey::data`].
    pub fn from_row(row: Map<String, Value>) -> Result<Self, LenientError> {
        let mut normalized = row.clone();
        normalize_int_fields(&mut normalized, &LENIENT_INT_FIELDS)?;

        let record: SurveyRecord = serde_json::from_value(Value::Object(normalized))?;

        Ok(Survey {
            idno: record.idno,
            title: record.title,
            nation: record.nation,
            year_start: record.year_start,
            year_end: record.year_end,
            created: record.created,
            changed: record.changed,
            url: record.url,
            varcount: record.varcount,
            data: row,
        })
    }

    /// Returns a field of the raw search row.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

impl<'de> Deserialize<'de> for Survey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let row = Map::<String, Value>::deserialize(deserializer)?;
        Survey::from_row(row).map_err(de::Error::custom)
    }
}
