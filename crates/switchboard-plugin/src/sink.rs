//! The staged response sink.

use std::sync::Mutex;

use serde_json::Value;

use switchboard_core::types::StagedBody;

/// Two-step response contract for handlers.
///
/// A write stages the body; nothing reaches the wire until the dispatcher
/// has run the after-chain and finalizes the staged body. A later write
/// replaces an earlier one, so the last write wins.
#[derive(Debug, Default)]
pub struct ResponseSink {
    staged: Mutex<Option<StagedBody>>,
}

impl ResponseSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a structured-data body.
    pub fn json(&self, value: Value) {
        let mut staged = self.staged.lock().expect("sink lock poisoned");
        *staged = Some(StagedBody::Json(value));
    }

    /// Stage a plain-text body, sent verbatim.
    pub fn text(&self, text: impl Into<String>) {
        let mut staged = self.staged.lock().expect("sink lock poisoned");
        *staged = Some(StagedBody::Text(text.into()));
    }

    /// Take the staged body, leaving the sink empty.
    pub fn take(&self) -> Option<StagedBody> {
        self.staged.lock().expect("sink lock poisoned").take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn last_write_wins() {
        let sink = ResponseSink::new();
        sink.json(json!({"a": 1}));
        sink.text("plain");
        assert_eq!(sink.take(), Some(StagedBody::Text("plain".to_string())));
        assert_eq!(sink.take(), None);
    }
}
