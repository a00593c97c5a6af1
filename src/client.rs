//! HTTP client for the remote catalog service.
//!
//! `CatalogClient` wraps a `ureq` agent and the resolved base URL from
//! [`ApiConfig`]. The [`Catalog`] trait is the seam the dispatcher works
//! against, so tests can substitute a stub backend.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::book::{
    GenresEnvelope, RandomEnvelope, RecommendEnvelope, RecommendRequest, SearchCriteria,
    SearchEnvelope,
};
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// Per-request timeout. The catalog has no long-running endpoints; anything
/// slower than this is treated as a transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Operations the dispatcher needs from a catalog backend.
pub trait Catalog {
    fn genres(&self) -> ClientResult<GenresEnvelope>;
    fn search(&self, criteria: &SearchCriteria) -> ClientResult<SearchEnvelope>;
    fn recommend(&self, request: &RecommendRequest) -> ClientResult<RecommendEnvelope>;
    fn random(&self, count: usize) -> ClientResult<RandomEnvelope>;
}

/// HTTP implementation of [`Catalog`].
pub struct CatalogClient {
    base_url: String,
    http: ureq::Agent,
}

impl CatalogClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            http: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.get(&url);
        for (name, value) in query {
            request = request.query(name, value);
        }
        parse_response(request.call())
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let url = format!("{}{path}", self.base_url);
        parse_response(self.http.post(&url).send_json(body))
    }
}

/// Interpret a ureq response as a JSON envelope.
///
/// The catalog reports failures inside the envelope body, with non-2xx
/// status codes. Those bodies are still decoded (success defaults to false);
/// only genuine transport errors become [`ClientError::Request`].
fn parse_response<T: DeserializeOwned>(
    result: Result<ureq::Response, ureq::Error>,
) -> ClientResult<T> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_code, response)) => response,
        Err(e) => {
            return Err(ClientError::Request {
                message: e.to_string(),
            });
        }
    };
    response.into_json().map_err(|e| ClientError::Response {
        message: format!("failed to parse JSON: {e}"),
    })
}

impl Catalog for CatalogClient {
    fn genres(&self) -> ClientResult<GenresEnvelope> {
        self.get_json("/api/genres", &[])
    }

    fn search(&self, criteria: &SearchCriteria) -> ClientResult<SearchEnvelope> {
        let mut query = Vec::new();
        if let Some(q) = criteria.query() {
            query.push(("q", q));
        }
        if let Some(genre) = criteria.genre() {
            query.push(("genre", genre));
        }
        self.get_json("/api/search", &query)
    }

    fn recommend(&self, request: &RecommendRequest) -> ClientResult<RecommendEnvelope> {
        self.post_json("/api/recommend", request)
    }

    fn random(&self, count: usize) -> ClientResult<RandomEnvelope> {
        let count = count.to_string();
        self.get_json("/api/random", &[("count", &count)])
    }
}
