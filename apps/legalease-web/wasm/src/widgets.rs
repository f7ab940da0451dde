//! The widget surface the controller drives
//!
//! `Widgets` is everything the controller needs from the page. `DomWidgets`
//! holds typed handles to the real elements; tests use a recording double.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use legal_view::{render_chat_message, ViewNode};
use shared_types::ChatMessage;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, Node};

use crate::config::ElementIds;
use crate::dom::{element_by_id, materialize, replace_children};
use crate::error::AppError;
use crate::transcript::{Entry, MessageId};

const HIDDEN_CLASS: &str = "hidden";
const DRAG_HIGHLIGHT_CLASS: &str = "bg-indigo-100";

#[allow(async_fn_in_trait)]
pub trait Widgets {
    /// Show the selected document's name
    fn show_file_name(&self, name: &str);

    fn set_analyze_enabled(&self, enabled: bool);

    /// Toggle the processing indicator
    fn set_busy(&self, busy: bool);

    /// Replace the preview pane contents
    fn show_preview(&self, view: &ViewNode);

    fn chat_input(&self) -> String;

    fn clear_chat_input(&self);

    fn append_message(&self, id: MessageId, message: &ChatMessage);

    /// Swap message `id` for `replacements`, in place
    fn replace_message(&self, id: MessageId, replacements: &[Entry]);

    /// Give the page time to settle before continuing
    async fn settle(&self, delay: Duration);
}

/// Typed handles to the page's widgets
pub struct DomWidgets {
    document: Document,
    drop_area: HtmlElement,
    file_input: HtmlInputElement,
    analyze_button: HtmlButtonElement,
    preview: HtmlElement,
    busy_indicator: HtmlElement,
    doc_name: HtmlElement,
    chat_container: HtmlElement,
    chat_input: HtmlInputElement,
    send_button: HtmlButtonElement,
    messages: RefCell<HashMap<MessageId, Element>>,
}

impl DomWidgets {
    /// Resolve every widget by id, failing on the first missing one
    pub fn from_document(document: Document, ids: &ElementIds) -> Result<Self, AppError> {
        Ok(Self {
            drop_area: element_by_id(&document, &ids.drop_area, "HtmlElement")?,
            file_input: element_by_id(&document, &ids.file_input, "HtmlInputElement")?,
            analyze_button: element_by_id(&document, &ids.analyze_button, "HtmlButtonElement")?,
            preview: element_by_id(&document, &ids.preview, "HtmlElement")?,
            busy_indicator: element_by_id(&document, &ids.busy_indicator, "HtmlElement")?,
            doc_name: element_by_id(&document, &ids.doc_name, "HtmlElement")?,
            chat_container: element_by_id(&document, &ids.chat_container, "HtmlElement")?,
            chat_input: element_by_id(&document, &ids.chat_input, "HtmlInputElement")?,
            send_button: element_by_id(&document, &ids.send_button, "HtmlButtonElement")?,
            messages: RefCell::new(HashMap::new()),
            document,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn drop_area(&self) -> &HtmlElement {
        &self.drop_area
    }

    pub fn file_input(&self) -> &HtmlInputElement {
        &self.file_input
    }

    pub fn analyze_button(&self) -> &HtmlButtonElement {
        &self.analyze_button
    }

    pub fn preview(&self) -> &HtmlElement {
        &self.preview
    }

    pub fn chat_input_element(&self) -> &HtmlInputElement {
        &self.chat_input
    }

    pub fn send_button(&self) -> &HtmlButtonElement {
        &self.send_button
    }

    pub fn set_drag_highlight(&self, on: bool) {
        let classes = self.drop_area.class_list();
        let result = if on {
            classes.add_1(DRAG_HIGHLIGHT_CLASS)
        } else {
            classes.remove_1(DRAG_HIGHLIGHT_CLASS)
        };
        warn_on_err("drag highlight", result);
    }

    fn build_message(&self, message: &ChatMessage) -> Result<Element, JsValue> {
        let node = materialize(&self.document, &render_chat_message(message))?;
        node.dyn_into::<Element>().map_err(JsValue::from)
    }

    fn scroll_chat_to_bottom(&self) {
        self.chat_container
            .set_scroll_top(self.chat_container.scroll_height());
    }

    fn try_append(&self, id: MessageId, message: &ChatMessage) -> Result<(), JsValue> {
        let element = self.build_message(message)?;
        self.chat_container.append_child(&element)?;
        self.messages.borrow_mut().insert(id, element);
        Ok(())
    }

    /// The placeholder leaves the DOM even when placing a reply fails
    fn try_replace(&self, id: MessageId, replacements: &[Entry]) -> Result<(), JsValue> {
        let built: Result<Vec<Element>, JsValue> = replacements
            .iter()
            .map(|entry| self.build_message(&entry.message))
            .collect();

        let anchor = self.messages.borrow_mut().remove(&id);
        let placed = built.and_then(|elements| self.place(anchor.as_ref(), replacements, elements));
        if let Some(anchor) = anchor {
            anchor.remove();
        }
        placed
    }

    fn place(
        &self,
        anchor: Option<&Element>,
        replacements: &[Entry],
        elements: Vec<Element>,
    ) -> Result<(), JsValue> {
        // Replies to a placeholder no longer in the chat are appended
        let anchor = anchor.filter(|a| self.chat_container.is_same_node(a.parent_node().as_ref()));
        for (entry, element) in replacements.iter().zip(elements) {
            match anchor {
                Some(anchor) => {
                    let anchor: &Node = anchor;
                    self.chat_container.insert_before(&element, Some(anchor))?;
                }
                None => {
                    self.chat_container.append_child(&element)?;
                }
            }
            self.messages.borrow_mut().insert(entry.id, element);
        }
        Ok(())
    }
}

impl Widgets for DomWidgets {
    fn show_file_name(&self, name: &str) {
        self.doc_name.set_text_content(Some(name));
    }

    fn set_analyze_enabled(&self, enabled: bool) {
        self.analyze_button.set_disabled(!enabled);
    }

    fn set_busy(&self, busy: bool) {
        let classes = self.busy_indicator.class_list();
        let result = if busy {
            classes.remove_1(HIDDEN_CLASS)
        } else {
            classes.add_1(HIDDEN_CLASS)
        };
        warn_on_err("busy indicator", result);
    }

    fn show_preview(&self, view: &ViewNode) {
        warn_on_err(
            "preview render",
            replace_children(&self.document, &self.preview, view),
        );
    }

    fn chat_input(&self) -> String {
        self.chat_input.value()
    }

    fn clear_chat_input(&self) {
        self.chat_input.set_value("");
    }

    fn append_message(&self, id: MessageId, message: &ChatMessage) {
        warn_on_err("chat append", self.try_append(id, message));
        self.scroll_chat_to_bottom();
    }

    fn replace_message(&self, id: MessageId, replacements: &[Entry]) {
        warn_on_err("chat replace", self.try_replace(id, replacements));
        self.scroll_chat_to_bottom();
    }

    async fn settle(&self, delay: Duration) {
        gloo_timers::future::sleep(delay).await;
    }
}

fn warn_on_err(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("{} failed: {:?}", what, err);
    }
}
