//! Test doubles for the transport seam.

use std::sync::Mutex;

use super::client::EchoTransport;
use super::types::{ApiError, EchoResponse};
use super::validation::Message;

/// Records every message it receives and answers with a canned result.
pub struct RecordingTransport {
    calls: Mutex<Vec<String>>,
    reply: Result<EchoResponse, ApiError>,
}

impl RecordingTransport {
    pub fn replying(reply: Result<EchoResponse, ApiError>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl EchoTransport for &RecordingTransport {
    async fn send(&self, message: &Message) -> Result<EchoResponse, ApiError> {
        self.calls.lock().unwrap().push(message.as_str().to_string());
        self.reply.clone()
    }
}

pub fn echo(text: &str) -> EchoResponse {
    EchoResponse {
        echo: text.into(),
        timestamp: "2024-05-01T12:30:00Z".into(),
    }
}
