//! View layer for the LegalEase browser client
//!
//! Panels are built as [`ViewNode`] trees instead of HTML strings. The wasm
//! crate turns them into DOM nodes with `create_element` and
//! `set_text_content`, so text coming from the backend is never parsed as
//! markup.

pub mod analysis;
pub mod chat;
pub mod node;

pub use analysis::{render_analysis, render_error_notice, render_list, render_simplified_text};
pub use chat::{message_classes, render_chat_message, render_tooltip};
pub use node::{el, ElementNode, ViewNode};

/// Class marking annotated legal terms in the simplified text
pub const LEGAL_TERM_CLASS: &str = "legal-term";
/// Class of the hover tooltip appended to a legal term
pub const TOOLTIP_CLASS: &str = "tooltip";
