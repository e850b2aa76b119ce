//! Encoding navigation back into URL state.
//!
//! Every link and redirect the server produces goes through [navigate],
//! so the rendered page stays a function of its URL.

use std::num::NonZeroU32;

use url::Url;

use crate::query::{NAME_PARAM, PAGE_PARAM};

/// A change to the query state of the list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Search for a term, an empty term clears the search.
    SetSearchTerm(String),
    ClearSearchTerm,
    GoToPage(NonZeroU32),
}

/// Apply `action` to `current`, returning the URL to navigate to.
///
/// - Changing the search term drops the `page` parameter.
/// - [NavigationAction::GoToPage] keeps `name` only when it is non-empty.
/// - Unrelated parameters are left as they are.
pub fn navigate(current: &Url, action: &NavigationAction) -> Url {
    let pairs: Vec<(String, String)> = current.query_pairs().into_owned().collect();

    let pairs = match action {
        NavigationAction::SetSearchTerm(term) if !term.is_empty() => {
            let mut pairs = without(pairs, &[NAME_PARAM, PAGE_PARAM]);
            pairs.push((NAME_PARAM.to_string(), term.clone()));
            pairs
        },
        NavigationAction::SetSearchTerm(_) | NavigationAction::ClearSearchTerm => {
            without(pairs, &[NAME_PARAM, PAGE_PARAM])
        },
        NavigationAction::GoToPage(page) => {
            let has_term = pairs
                .iter()
                .find(|(k, _)| k == NAME_PARAM)
                .is_some_and(|(_, v)| !v.is_empty());
            let mut pairs = if has_term {
                without(pairs, &[PAGE_PARAM])
            } else {
                without(pairs, &[NAME_PARAM, PAGE_PARAM])
            };
            pairs.push((PAGE_PARAM.to_string(), page.to_string()));
            pairs
        },
    };

    let mut next = current.clone();
    next.set_fragment(None);
    if pairs.is_empty() {
        next.set_query(None);
    } else {
        next.query_pairs_mut().clear().extend_pairs(pairs);
    }
    next
}

fn without(pairs: Vec<(String, String)>, keys: &[&str]) -> Vec<(String, String)> {
    pairs
        .into_iter()
        .filter(|(k, _)| !keys.contains(&k.as_str()))
        .collect()
}

/// The origin-relative form of `url`, for links and redirects.
pub fn relative(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}
