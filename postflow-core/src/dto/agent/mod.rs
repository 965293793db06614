//! Agent DTOs
//!
//! Request and response bodies of the external generation agents. Field
//! names must match the agents exactly.

use serde::{Deserialize, Serialize};

/// Style sent with every image-description request
pub const IMAGE_STYLE: &str = "realistic";

/// Body of `POST /api/tools/generate_draft`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRequest {
    pub topic: String,
    pub style: String,
    pub tone: String,
}

/// A `{type, text}` block inside the draft envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// The draft `content` envelope
///
/// The draft agent has been observed answering both with a list of blocks
/// and with a single block, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DraftContent {
    Blocks(Vec<TextBlock>),
    Block(TextBlock),
}

impl DraftContent {
    /// Text of the first block, or an empty string if there is none
    pub fn text(&self) -> &str {
        match self {
            DraftContent::Blocks(blocks) => blocks.first().map(|b| b.text.as_str()).unwrap_or(""),
            DraftContent::Block(block) => &block.text,
        }
    }
}

/// Response of `POST /api/tools/generate_draft`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResponse {
    pub content: DraftContent,
    /// Set by the agent when generation failed but it still answered 200
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /improve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImproveRequest {
    pub draft_text: String,
    pub target_audience: String,
}

/// Response of `POST /improve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImproveResponse {
    #[serde(default)]
    pub improved_text: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Body of `POST /generate-image`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub style: String,
}

/// Response of `POST /generate-image`
///
/// Despite its name, `image_path` carries a textual image description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub prompt_used: Option<String>,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}
