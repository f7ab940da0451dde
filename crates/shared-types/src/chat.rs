//! Chat endpoint payloads and transcript messages

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Placeholder shown while a reply is pending
pub const THINKING_TEXT: &str = "AI is thinking...";
/// Used when the backend answers without a `response`
pub const FALLBACK_ANSWER: &str = "I'm not sure how to respond to that.";
pub const CONNECTION_ERROR_TEXT: &str =
    "Sorry, I'm having trouble connecting right now. Please try again.";

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ChatRequest {
    /// Blank context is dropped rather than sent
    pub fn new(question: impl Into<String>, context: Option<String>) -> Self {
        Self {
            question: question.into(),
            context: context.filter(|c| !c.trim().is_empty()),
        }
    }

    pub fn to_json(&self) -> Result<String, ApiError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Raw chat response envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A successful chat answer with de-duplicated sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub answer: String,
    pub sources: Vec<String>,
}

impl ChatResponse {
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn into_reply(self) -> Result<ChatReply, ApiError> {
        if let Some(message) = self.error.filter(|e| !e.is_empty()) {
            return Err(ApiError::Server(message));
        }

        let answer = self
            .response
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

        Ok(ChatReply {
            answer,
            sources: dedupe_sources(self.sources.unwrap_or_default()),
        })
    }
}

impl ChatReply {
    /// `Sources: A, B`, or `None` when there are no sources
    pub fn sources_line(&self) -> Option<String> {
        if self.sources.is_empty() {
            None
        } else {
            Some(format!("Sources: {}", self.sources.join(", ")))
        }
    }
}

/// Remove repeated sources, keeping first-seen order
pub fn dedupe_sources<I>(sources: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    sources
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// Visual treatment of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStyle {
    Plain,
    Thinking,
    Sources,
    Error,
}

/// One entry of the chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub style: MessageStyle,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            style: MessageStyle::Plain,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            style: MessageStyle::Plain,
        }
    }

    pub fn thinking() -> Self {
        Self {
            text: THINKING_TEXT.to_string(),
            sender: Sender::Bot,
            style: MessageStyle::Thinking,
        }
    }

    pub fn sources(line: impl Into<String>) -> Self {
        Self {
            text: line.into(),
            sender: Sender::Bot,
            style: MessageStyle::Sources,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            style: MessageStyle::Error,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.style == MessageStyle::Thinking
    }

    /// Bot messages that replace the placeholder once a request resolves
    pub fn from_outcome(outcome: Result<ChatReply, ApiError>) -> Vec<Self> {
        match outcome {
            Ok(reply) => {
                let mut messages = vec![Self::bot(reply.answer.clone())];
                if let Some(line) = reply.sources_line() {
                    messages.push(Self::sources(line));
                }
                messages
            }
            Err(ApiError::Server(message)) => vec![Self::error(format!(
                "Sorry, I encountered an error: {}",
                message
            ))],
            Err(_) => vec![Self::error(CONNECTION_ERROR_TEXT)],
        }
    }
}
