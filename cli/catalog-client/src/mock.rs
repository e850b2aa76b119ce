//! A catalog client replaying canned responses.
//!
//! Used by tests of the web layer and, when [CATALOG_MOCK_DATA_VAR] is set,
//! to run the server without reaching the remote catalog.

use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::client::ClientTrait;
use crate::error::{GatewayError, LookupError};
use crate::types::{CatalogPage, EntityRecord, SearchOutcome};

/// Path to a JSON file of mock responses.
pub const CATALOG_MOCK_DATA_VAR: &str = "_CATALOG_WEB_USE_CATALOG_MOCK";

// Arc allows you to push things into the client from outside the client if necessary
// Mutex allows you to share across threads (necessary because of tokio)
type MockField<T> = Arc<Mutex<T>>;

/// A canned response, consumed by the next matching call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Search(CatalogPage),
    Entity(EntityRecord),
    /// The remote answered with a non-OK status.
    Failure { status: u16 },
}

#[derive(Debug, Error)]
pub enum MockDataError {
    #[error("couldn't read mock data file")]
    ReadMockFile(#[source] std::io::Error),
    #[error("couldn't parse mock data")]
    ParseJson(#[source] serde_json::Error),
}

/// Reads a list of mock responses from disk.
fn read_mock_responses(path: impl AsRef<Path>) -> Result<VecDeque<Response>, MockDataError> {
    let contents = std::fs::read_to_string(path).map_err(MockDataError::ReadMockFile)?;
    let deserialized: Vec<Response> =
        serde_json::from_str(&contents).map_err(MockDataError::ParseJson)?;
    Ok(deserialized.into())
}

/// A catalog client that can be seeded with mock responses
#[derive(Debug, Default)]
pub struct MockClient {
    pub mock_responses: MockField<VecDeque<Response>>,
}

impl MockClient {
    /// Create a new mock client, potentially reading mock responses from disk
    pub fn new(mock_data_path: Option<impl AsRef<Path>>) -> Result<Self, MockDataError> {
        let mock_responses = match mock_data_path {
            Some(path) => read_mock_responses(path)?,
            None => VecDeque::new(),
        };
        debug!(n_responses = mock_responses.len(), "created mock catalog client");
        Ok(Self {
            mock_responses: Arc::new(Mutex::new(mock_responses)),
        })
    }

    /// Push a new search response into the list of mock responses
    pub fn push_search_response(&mut self, page: CatalogPage) {
        self.push(Response::Search(page));
    }

    /// Push a new entity response into the list of mock responses
    pub fn push_entity_response(&mut self, record: EntityRecord) {
        self.push(Response::Entity(record));
    }

    /// Push a failed response with the given status code
    pub fn push_failure_response(&mut self, status: u16) {
        self.push(Response::Failure { status });
    }

    /// Number of responses not consumed yet.
    pub fn remaining(&self) -> usize {
        self.mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .len()
    }

    fn push(&mut self, response: Response) {
        self.mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .push_back(response);
    }

    fn pop(&self) -> Option<Response> {
        self.mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .pop_front()
    }
}

fn rejection(status: u16) -> GatewayError {
    GatewayError::RemoteRejection(
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    )
}

impl ClientTrait for MockClient {
    async fn search_entities(&self, search_term: &str, page_number: NonZeroU32) -> SearchOutcome {
        debug!(search_term, %page_number, "replaying mock search");
        match self.pop() {
            Some(Response::Search(page)) => SearchOutcome::Found(page),
            Some(Response::Failure { status }) => {
                let err = rejection(status);
                warn!(kind = err.kind(), error = %err, "catalog search degraded to an empty page");
                SearchOutcome::Degraded
            },
            other => {
                warn!(?other, "expected a mock search response");
                SearchOutcome::Degraded
            },
        }
    }

    async fn fetch_entity_by_id(&self, id: i64) -> Result<EntityRecord, LookupError> {
        if id <= 0 {
            return Err(LookupError::InvalidRequest(id));
        }
        debug!(id, "replaying mock lookup");
        match self.pop() {
            Some(Response::Entity(record)) => Ok(record),
            Some(Response::Failure { status }) => Err(LookupError::NotFound(rejection(status))),
            other => {
                warn!(?other, "expected a mock entity response");
                Err(LookupError::NotFound(rejection(404)))
            },
        }
    }
}
