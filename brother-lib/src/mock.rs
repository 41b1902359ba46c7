//! In-memory transport that replays queued answers.

use crate::error::BrotherError;
use crate::transport::{FetchResponse, RawData, Transport};
use std::collections::VecDeque;

/// A [`Transport`] that answers from a queue and records every request.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: VecDeque<Result<FetchResponse, BrotherError>>,
    requests: Vec<Vec<String>>,
    close_count: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_values(&mut self, values: RawData) -> &mut Self {
        self.responses.push_back(Ok(FetchResponse::Values(values)));
        self
    }

    pub fn queue_rejection(&mut self, index: usize) -> &mut Self {
        self.responses.push_back(Ok(FetchResponse::Rejected { index }));
        self
    }

    pub fn queue_error(&mut self, error: BrotherError) -> &mut Self {
        self.responses.push_back(Err(error));
        self
    }

    /// OIDs of every fetch so far, oldest first.
    pub fn requests(&self) -> &[Vec<String>] {
        &self.requests
    }

    pub fn close_count(&self) -> usize {
        self.close_count
    }

    pub fn pending(&self) -> usize {
        self.responses.len()
    }
}

impl Transport for MockTransport {
    async fn fetch(&mut self, oids: &[&str]) -> Result<FetchResponse, BrotherError> {
        self.requests.push(oids.iter().map(|oid| oid.to_string()).collect());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(BrotherError::Connection("no response queued".to_string())))
    }

    fn close(&mut self) {
        self.close_count += 1;
    }
}
