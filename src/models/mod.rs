use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// External identifier for a catalog entry as it appears at the API boundary.
///
/// The trained model knows integer ids, but HTTP clients routinely send them
/// as strings (query parameters and form fields are always text). Keeping
/// both shapes explicit lets the resolver decide when a string may be retried
/// as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Numeric id (e.g., a MovieLens `movieId`)
    Int(i64),
    /// Id that arrived as text and has not been coerced
    Text(String),
}

impl RawId {
    /// Returns the id as an integer if it already is one.
    ///
    /// Text ids are not parsed here: lookups treat the id exactly as given,
    /// and any string-to-integer retry is the caller's decision.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawId::Int(id) => Some(*id),
            RawId::Text(_) => None,
        }
    }
}

impl Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Int(id) => write!(f, "{}", id),
            RawId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for RawId {
    fn from(id: i64) -> Self {
        RawId::Int(id)
    }
}

/// One row of the catalog dataset.
///
/// Column names follow the MovieLens CSV header; extra columns (genres etc.)
/// are ignored at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "movieId")]
    pub id: i64,
    pub title: String,
}

/// Result of a title-based recommendation lookup.
///
/// `resolved_title` is the catalog title the query matched, absent when the
/// query matched nothing. `recommendations` holds the neighbor titles in
/// model distance order; neighbors without a catalog entry are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TitleRecommendations {
    pub resolved_title: Option<String>,
    pub recommendations: Vec<String>,
}
