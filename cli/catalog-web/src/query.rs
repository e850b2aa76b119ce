//! Deriving request parameters from URL state.
//!
//! Nothing here trims or bounds values beyond what the types require:
//! out-of-range pages are left for the catalog to answer with an empty page.

use std::num::NonZeroU32;

use thiserror::Error;
use url::Url;
use url::form_urlencoded;

pub const NAME_PARAM: &str = "name";
pub const PAGE_PARAM: &str = "page";

/// Decoded query parameters in their original order.
///
/// Repeated keys are kept; lookups return the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams(Vec<(String, String)>);

impl RawParams {
    /// Decode an `application/x-www-form-urlencoded` query string.
    pub fn from_query(query: &str) -> Self {
        Self(form_urlencoded::parse(query.as_bytes()).into_owned().collect())
    }

    pub fn from_url(url: &Url) -> Self {
        Self(url.query_pairs().into_owned().collect())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for RawParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// The canonical `{search term, page}` pair of a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// Raw `name` parameter, possibly empty, never trimmed.
    pub search_term: String,
    pub page_number: NonZeroU32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            page_number: NonZeroU32::MIN,
        }
    }
}

/// Resolve the list query from the `name` and `page` parameters.
///
/// A missing `page`, or one that is not a positive base-10 integer,
/// resolves to page 1.
pub fn resolve_list_query(params: &RawParams) -> QueryState {
    let search_term = params.get(NAME_PARAM).unwrap_or_default().to_string();
    let page_number = params
        .get(PAGE_PARAM)
        .and_then(|page| page.parse::<NonZeroU32>().ok())
        .unwrap_or(NonZeroU32::MIN);

    QueryState {
        search_term,
        page_number,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid id '{0}'")]
pub struct InvalidId(pub String);

/// Resolve the entity id of a detail request from its path segment.
pub fn resolve_detail_query(raw_id: &str) -> Result<i64, InvalidId> {
    match raw_id.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(InvalidId(raw_id.to_string())),
    }
}
