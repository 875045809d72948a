//! HTTP-like bulk data endpoint: `type=initial&count=N` or `type=new`.

use crate::data_types::Sample;
use crate::error::EndpointError;
use crate::producer::SampleProducer;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_INITIAL_COUNT: usize = 1000;
/// Largest batch a single request may ask for.
pub const MAX_INITIAL_COUNT: usize = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Initial,
    New,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataRequest {
    pub kind: RequestKind,
    /// Batch size for `initial`; ignored for `new`.
    pub count: Option<usize>,
}

impl DataRequest {
    pub fn initial(count: Option<usize>) -> Self {
        Self {
            kind: RequestKind::Initial,
            count,
        }
    }

    pub fn new_sample() -> Self {
        Self {
            kind: RequestKind::New,
            count: None,
        }
    }

    /// Parses a query string such as `type=initial&count=500`. A leading `?`
    /// is accepted. `count` is only read for `initial` requests.
    pub fn from_query(query: &str) -> Result<Self, EndpointError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let param = |name: &str| {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value)
        };

        match param("type") {
            Some("initial") => {
                let count = match param("count") {
                    None | Some("") => None,
                    Some(raw) => Some(parse_count(raw)?),
                };
                Ok(Self::initial(count))
            }
            Some("new") => Ok(Self::new_sample()),
            _ => Err(EndpointError::InvalidType),
        }
    }
}

fn parse_count(raw: &str) -> Result<usize, EndpointError> {
    match raw.trim().parse::<usize>() {
        Ok(count) if count <= MAX_INITIAL_COUNT => Ok(count),
        _ => Err(EndpointError::InvalidCount),
    }
}

/// Status code plus JSON body, `{ "data": [...] }` or `{ "error": "..." }`.
#[derive(Clone, Debug, PartialEq)]
pub struct EndpointResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl EndpointResponse {
    pub fn ok(data: &[Sample]) -> Self {
        Self {
            status: 200,
            body: json!({ "data": data }),
        }
    }

    pub fn error(err: &EndpointError) -> Self {
        Self {
            status: err.status(),
            body: json!({ "error": err.to_string() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Samples carried by a success body.
    pub fn data(&self) -> Option<Vec<Sample>> {
        serde_json::from_value(self.body.get("data")?.clone()).ok()
    }
}

/// Serves producer output to bulk clients. The producer is shared so the
/// same source can also feed a live stream.
pub struct BulkEndpoint<P: SampleProducer> {
    producer: Arc<Mutex<P>>,
}

impl<P: SampleProducer> Clone for BulkEndpoint<P> {
    fn clone(&self) -> Self {
        Self {
            producer: self.producer.clone(),
        }
    }
}

impl<P: SampleProducer> BulkEndpoint<P> {
    pub fn new(producer: P) -> Self {
        Self::from_shared(Arc::new(Mutex::new(producer)))
    }

    pub fn from_shared(producer: Arc<Mutex<P>>) -> Self {
        Self { producer }
    }

    pub fn producer(&self) -> &Arc<Mutex<P>> {
        &self.producer
    }

    pub fn handle(&self, request: DataRequest) -> Result<Vec<Sample>, EndpointError> {
        let mut producer = self.producer.lock();
        let data = match request.kind {
            RequestKind::Initial => {
                let count = request.count.unwrap_or(DEFAULT_INITIAL_COUNT);
                producer.generate_initial_batch(count)?
            }
            RequestKind::New => vec![producer.generate_one()?],
        };
        debug!(kind = ?request.kind, returned = data.len(), "bulk request served");
        Ok(data)
    }

    pub fn respond(&self, request: DataRequest) -> EndpointResponse {
        match self.handle(request) {
            Ok(data) => EndpointResponse::ok(&data),
            Err(err) => {
                warn!(error = %err, "bulk request failed");
                EndpointResponse::error(&err)
            }
        }
    }

    pub fn handle_query(&self, query: &str) -> EndpointResponse {
        match DataRequest::from_query(query) {
            Ok(request) => self.respond(request),
            Err(err) => {
                debug!(query, error = %err, "rejected bulk query");
                EndpointResponse::error(&err)
            }
        }
    }
}
