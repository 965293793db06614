//! History domain types

use serde::{Deserialize, Serialize};

/// Lightweight projection of a persisted [`WorkflowResult`](super::workflow::WorkflowResult)
///
/// Derived from the stored document at read time. Fields other than the
/// filename are optional because older or hand-edited documents may lack them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub filename: String,
    pub timestamp: Option<String>,
    pub topic: Option<String>,
    pub final_post: Option<String>,
}

impl HistoryEntry {
    /// Projects a stored JSON document, substituting `None` for missing fields
    pub fn from_document(filename: impl Into<String>, doc: &serde_json::Value) -> Self {
        let text = |v: Option<&serde_json::Value>| v.and_then(|v| v.as_str()).map(String::from);

        Self {
            filename: filename.into(),
            timestamp: text(doc.get("timestamp")),
            topic: text(doc.get("metadata").and_then(|m| m.get("topic"))),
            final_post: text(doc.get("final_post")),
        }
    }
}
