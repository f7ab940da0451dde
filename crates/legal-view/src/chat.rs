//! Chat transcript and tooltip nodes

use shared_types::{ChatMessage, MessageStyle, Sender};

use crate::node::{el, ViewNode};
use crate::TOOLTIP_CLASS;

/// Class list for a chat bubble: sender alignment plus style accents
pub fn message_classes(message: &ChatMessage) -> String {
    let side = match message.sender {
        Sender::User => "ml-auto",
        Sender::Bot => "mr-auto",
    };
    let accent = match message.style {
        MessageStyle::Plain => "",
        MessageStyle::Thinking => " text-gray-500 italic",
        MessageStyle::Sources => " text-sm text-gray-500 mt-1",
        MessageStyle::Error => " text-red-500",
    };

    format!(
        "chat-message {} p-3 mb-2 rounded-lg max-w-4xl {}{}",
        message.sender.as_str(),
        side,
        accent
    )
}

pub fn render_chat_message(message: &ChatMessage) -> ViewNode {
    el("div")
        .class(message_classes(message))
        .child(el("p").text(message.text.as_str()))
        .into()
}

/// Hidden tooltip appended to a legal term on first hover
pub fn render_tooltip(definition: &str) -> ViewNode {
    el("div")
        .class(format!(
            "{} absolute bg-gray-800 text-white text-xs rounded py-1 px-2 z-10 -top-8 left-1/2 transform -translate-x-1/2 opacity-0 transition-opacity duration-300",
            TOOLTIP_CLASS
        ))
        .text(definition)
        .into()
}
