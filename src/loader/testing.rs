// In-memory doubles shared by the loader and engine tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::report::Report;

use super::fetcher::{Fetch, FetchError};
use super::resource_path::ResourcePath;

#[derive(Clone)]
enum StubOutcome {
    Payload(String),
    Status(u16),
    Transport,
}

/// Canned `Fetch` implementation: fixed outcomes per identifier, an
/// optional per-identifier delay, and a record of every call made.
/// Unknown identifiers answer 404.
#[derive(Clone, Default)]
pub struct StubFetcher {
    outcomes: HashMap<String, StubOutcome>,
    delays: HashMap<String, u64>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(mut self, id: &str, body: &str) -> Self {
        self.outcomes
            .insert(id.to_string(), StubOutcome::Payload(body.to_string()));
        self
    }

    pub fn status(mut self, id: &str, code: u16) -> Self {
        self.outcomes.insert(id.to_string(), StubOutcome::Status(code));
        self
    }

    pub fn transport_failure(mut self, id: &str) -> Self {
        self.outcomes.insert(id.to_string(), StubOutcome::Transport);
        self
    }

    pub fn delay_ms(mut self, id: &str, millis: u64) -> Self {
        self.delays.insert(id.to_string(), millis);
        self
    }

    /// Every `(identifier, mime)` pair fetched so far, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetch for StubFetcher {
    fn fetch(
        &self,
        path: &ResourcePath,
        mime: &str,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        let id = match path {
            ResourcePath::Local(local) => local.display().to_string(),
            ResourcePath::Url(url) => url.clone(),
        };
        let mime = mime.to_string();
        let this = self.clone();

        async move {
            this.calls.lock().unwrap().push((id.clone(), mime));

            if let Some(millis) = this.delays.get(&id) {
                tokio::time::sleep(Duration::from_millis(*millis)).await;
            }

            match this.outcomes.get(&id) {
                Some(StubOutcome::Payload(body)) => Ok(body.clone()),
                Some(StubOutcome::Status(code)) => Err(FetchError::Status(
                    reqwest::StatusCode::from_u16(*code).unwrap(),
                )),
                Some(StubOutcome::Transport) => {
                    Err(FetchError::Transport("connection refused".to_string()))
                }
                None => Err(FetchError::Status(reqwest::StatusCode::NOT_FOUND)),
            }
        }
    }
}

/// Records reports so tests can assert at-most-once behavior.
#[derive(Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Report for RecordingReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
