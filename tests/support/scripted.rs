// ABOUTME: In-memory Transport that answers from a script and journals every call.
// ABOUTME: Notices from the recording progress sink land in the same journal.

use apiruns::engine::{EngineClient, EngineSettings};
use apiruns::http::{ApiRequest, ApiResponse, Transport, TransportError};
use apiruns::orchestrate::Orchestrator;
use apiruns::output::Progress;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Something the code under test did, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Request {
        method: String,
        path: String,
        body: Option<Value>,
    },
    Notice(String),
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    fn push(&self, event: Event) {
        self.0.lock().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().clone()
    }

    /// `"METHOD path"` for every request, notices skipped.
    pub fn requests(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Request { method, path, .. } => Some(format!("{method} {path}")),
                Event::Notice(_) => None,
            })
            .collect()
    }

    /// Body of the first request sent to `path`.
    pub fn body_of(&self, path: &str) -> Option<Value> {
        self.events().into_iter().find_map(|event| match event {
            Event::Request { path: p, body, .. } if p == path => body,
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Notice(message) => Some(message),
                Event::Request { .. } => None,
            })
            .collect()
    }
}

/// One scripted answer.
pub enum Reply {
    Response(ApiResponse),
    Unreachable,
}

impl Reply {
    pub fn status(status: u16) -> Self {
        Reply::Response(ApiResponse::empty(status))
    }

    pub fn json(status: u16, body: Value) -> Self {
        Reply::Response(ApiResponse::json_body(status, &body))
    }

    pub fn text(status: u16, body: &str) -> Self {
        Reply::Response(ApiResponse::new(status, body.to_string()))
    }
}

pub fn unreachable_error() -> TransportError {
    TransportError::Connect {
        endpoint: "unix:///test/engine.sock".to_string(),
        source: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
    }
}

/// Answers requests from a fixed script, in order.
///
/// Panics when the code under test sends more requests than were scripted.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    journal: Journal,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>, journal: Journal) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            journal,
        }
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.journal.push(Event::Request {
            method: request.method.to_string(),
            path: request.path.clone(),
            body: request.body.clone(),
        });

        let reply = self.replies.lock().pop_front();
        match reply {
            Some(Reply::Response(resp)) => Ok(resp),
            Some(Reply::Unreachable) => Err(unreachable_error()),
            None => panic!("unscripted request: {} {}", request.method, request.path),
        }
    }
}

/// Progress sink writing into a journal.
pub struct RecordingProgress(pub Journal);

impl Progress for RecordingProgress {
    fn notice(&self, message: &str) {
        self.0.push(Event::Notice(message.to_string()));
    }
}

/// Engine settings that never sleep between polls.
pub fn fast_settings() -> EngineSettings {
    EngineSettings {
        poll_interval: Duration::ZERO,
        ..EngineSettings::default()
    }
}

pub fn engine(replies: Vec<Reply>) -> (EngineClient<ScriptedTransport>, Journal) {
    engine_with(replies, fast_settings())
}

pub fn engine_with(
    replies: Vec<Reply>,
    settings: EngineSettings,
) -> (EngineClient<ScriptedTransport>, Journal) {
    let journal = Journal::default();
    let transport = ScriptedTransport::new(replies, journal.clone());
    let progress = Arc::new(RecordingProgress(journal.clone()));
    (EngineClient::new(transport, &settings, progress), journal)
}

pub fn orchestrator(replies: Vec<Reply>) -> (Orchestrator<ScriptedTransport>, Journal) {
    let journal = Journal::default();
    let transport = ScriptedTransport::new(replies, journal.clone());
    let progress = Arc::new(RecordingProgress(journal.clone()));
    let engine = EngineClient::new(transport, &fast_settings(), progress.clone());
    (Orchestrator::new(engine, progress), journal)
}
