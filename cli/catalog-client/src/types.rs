//! Catalog interaction types.
//!
//! Records are decoded strictly: every field listed here must be present
//! with the right type, anything else the API sends is ignored.

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A place referenced by a record, only its name is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedLocation {
    pub name: String,
}

/// One catalog item, as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub gender: String,
    pub image: Url,
    pub origin: NamedLocation,
    pub location: NamedLocation,
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Pagination metadata of a [CatalogPage].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page_count: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub results: Vec<EntityRecord>,
    pub info: PageInfo,
}

impl CatalogPage {
    /// The page rendered when nothing matched or the catalog failed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Result of a list search.
///
/// [SearchOutcome::Degraded] carries no payload, callers are expected to
/// collapse it with [SearchOutcome::into_page],
/// which makes a failed search indistinguishable from an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Found(CatalogPage),
    Degraded,
}

impl SearchOutcome {
    pub fn into_page(self) -> CatalogPage {
        match self {
            SearchOutcome::Found(page) => page,
            SearchOutcome::Degraded => CatalogPage::empty(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SearchOutcome::Degraded)
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// `info` object of the `/character` list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiPageInfo {
    pub pages: u32,
    #[serde(deserialize_with = "required_nullable")]
    pub next: Option<String>,
    #[serde(deserialize_with = "required_nullable")]
    pub prev: Option<String>,
}

/// Body of the `/character` list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiCharacterPage {
    pub info: ApiPageInfo,
    pub results: Vec<EntityRecord>,
}

impl From<ApiCharacterPage> for CatalogPage {
    fn from(page: ApiCharacterPage) -> Self {
        CatalogPage {
            results: page.results,
            info: PageInfo {
                page_count: page.info.pages,
                has_next: page.info.next.is_some(),
                has_prev: page.info.prev.is_some(),
            },
        }
    }
}

/// Accept `null` but reject a missing key.
///
/// Plain `Option` fields silently default to `None` when absent.
fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn rick_json() -> serde_json::Value {
        json!({
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": { "name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1" },
            "location": { "name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3" },
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "episode": ["https://rickandmortyapi.com/api/episode/1"],
            "url": "https://rickandmortyapi.com/api/character/1",
            "created": "2017-11-04T18:48:46.250Z"
        })
    }

    #[test]
    fn record_ignores_unknown_fields() {
        let record: EntityRecord = serde_json::from_value(rick_json()).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Rick Sanchez");
        assert_eq!(record.origin.name, "Earth (C-137)");
        assert_eq!(record.location.name, "Citadel of Ricks");
    }

    #[test]
    fn record_with_missing_field_is_rejected() {
        let mut value = rick_json();
        value.as_object_mut().unwrap().remove("species");
        assert!(serde_json::from_value::<EntityRecord>(value).is_err());
    }

    #[test]
    fn record_with_mistyped_field_is_rejected() {
        let mut value = rick_json();
        value["id"] = json!("one");
        assert!(serde_json::from_value::<EntityRecord>(value).is_err());

        let mut value = rick_json();
        value["image"] = json!("not a url");
        assert!(serde_json::from_value::<EntityRecord>(value).is_err());
    }

    #[test]
    fn page_info_requires_next_and_prev_keys() {
        let missing_prev = json!({ "info": { "pages": 2, "next": null }, "results": [] });
        assert!(serde_json::from_value::<ApiCharacterPage>(missing_prev).is_err());

        let null_links = json!({ "info": { "pages": 1, "next": null, "prev": null }, "results": [] });
        let page: CatalogPage = serde_json::from_value::<ApiCharacterPage>(null_links)
            .unwrap()
            .into();
        assert_eq!(page.info, PageInfo {
            page_count: 1,
            has_next: false,
            has_prev: false,
        });
    }

    #[test]
    fn degraded_outcome_collapses_to_empty_page() {
        assert_eq!(SearchOutcome::Degraded.into_page(), CatalogPage {
            results: vec![],
            info: PageInfo {
                page_count: 0,
                has_next: false,
                has_prev: false,
            },
        });
    }
}
