//! Chat request and reply types for the inference endpoint.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default MIME type assumed when an image payload carries none.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Role in a chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a chat conversation. Constructed fresh per pipeline call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

/// Message content: plain text, or a mixed sequence of text and image parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One part of a multimodal message, in the OpenRouter wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ChatMessage {
    /// A plain-text user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(content.into()),
        }
    }

    /// A user message pairing prompt text with one inline image.
    pub fn user_with_image(text: impl Into<String>, image: &ImageData) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image.to_data_uri(),
                    },
                },
            ]),
        }
    }
}

/// A base64-encoded image payload plus its MIME type.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub base64: String,
    pub mime_type: String,
}

impl ImageData {
    pub fn new(base64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            base64: base64.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Encode raw image bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            base64: BASE64.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URI.
    ///
    /// Inputs without a comma are treated as a bare base64 payload; a
    /// missing or unparseable MIME header falls back to `image/jpeg`.
    pub fn from_data_uri(uri: &str) -> Self {
        match uri.split_once(',') {
            Some((header, payload)) => {
                let mime_type = header
                    .strip_prefix("data:")
                    .and_then(|rest| rest.split(';').next())
                    .filter(|mime| !mime.is_empty())
                    .unwrap_or(DEFAULT_MIME_TYPE);
                Self::new(payload, mime_type)
            }
            None => Self::new(uri, DEFAULT_MIME_TYPE),
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// Successful transport payload: the generated text.
#[derive(Debug, Clone)]
pub struct ModelReply {
    pub content: String,
}

/// Normalized transport failure.
///
/// `code` carries the remote error code when one was present. A 429 is
/// model-specific and transient; any other code aborts the fallback loop.
/// Codeless errors (network failures, malformed bodies) are retryable.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ModelError {
    pub code: Option<i64>,
    pub message: String,
}

impl ModelError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// True when the fallback loop may try the next candidate.
    pub fn is_retryable(&self) -> bool {
        matches!(self.code, None | Some(429))
    }
}
