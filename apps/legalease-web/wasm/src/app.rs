//! The LegalEase UI controller
//!
//! One `LegalEaseApp` owns the widget handles, the API client and all
//! session state (selected file, rendered analysis, chat transcript). Event
//! handlers share it through an `Rc` and call the flows below.

use std::cell::{Cell, RefCell};

use legal_view::{render_analysis, render_error_notice};
use shared_types::{ApiError, ChatMessage, ChatRequest};

use crate::api::{DocumentFile, HttpApi, LegalApi};
use crate::config::AppConfig;
use crate::transcript::{MessageId, Transcript};
use crate::widgets::{DomWidgets, Widgets};

pub const UPLOAD_FAILED: &str = "Failed to upload file. Please try again.";
pub const SAMPLE_NOT_FOUND: &str = "Error loading sample document.";
pub const SAMPLE_FAILED: &str = "Sorry, couldn't load the sample document.";

/// The controller as wired into the browser page
pub type BrowserApp = LegalEaseApp<HttpApi, DomWidgets>;

pub struct LegalEaseApp<A: LegalApi, W: Widgets> {
    api: A,
    widgets: W,
    config: AppConfig,
    selected: RefCell<Option<A::File>>,
    analyzing: Cell<bool>,
    /// Text of the analysis currently in the preview, sent as chat context
    rendered_text: RefCell<Option<String>>,
    transcript: RefCell<Transcript>,
}

/// Restores the analyze controls when an upload finishes, however it ends
struct BusyGuard<'a, W: Widgets> {
    widgets: &'a W,
    analyzing: &'a Cell<bool>,
}

impl<'a, W: Widgets> BusyGuard<'a, W> {
    fn engage(widgets: &'a W, analyzing: &'a Cell<bool>) -> Self {
        analyzing.set(true);
        widgets.set_analyze_enabled(false);
        widgets.set_busy(true);
        Self { widgets, analyzing }
    }
}

impl<W: Widgets> Drop for BusyGuard<'_, W> {
    fn drop(&mut self) {
        self.widgets.set_busy(false);
        self.widgets.set_analyze_enabled(true);
        self.analyzing.set(false);
    }
}

impl<A: LegalApi, W: Widgets> LegalEaseApp<A, W> {
    pub fn new(api: A, widgets: W, config: AppConfig) -> Self {
        widgets.set_analyze_enabled(false);
        Self {
            api,
            widgets,
            config,
            selected: RefCell::new(None),
            analyzing: Cell::new(false),
            rendered_text: RefCell::new(None),
            transcript: RefCell::new(Transcript::new()),
        }
    }

    pub fn widgets(&self) -> &W {
        &self.widgets
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn has_selection(&self) -> bool {
        self.selected.borrow().is_some()
    }

    pub fn selected_name(&self) -> Option<String> {
        self.selected.borrow().as_ref().map(DocumentFile::file_name)
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing.get()
    }

    pub fn transcript_json(&self) -> String {
        self.transcript.borrow().to_json()
    }

    pub fn message_count(&self) -> usize {
        self.transcript.borrow().entries().len()
    }

    /// Chat requests still showing their placeholder
    pub fn pending_replies(&self) -> usize {
        self.transcript.borrow().pending()
    }

    /// Take the first file of a picked or dropped list as the selection.
    ///
    /// Returns `false` and changes nothing when the list is empty.
    pub fn select_file<I>(&self, files: I) -> bool
    where
        I: IntoIterator<Item = A::File>,
    {
        let Some(file) = files.into_iter().next() else {
            return false;
        };

        let name = file.file_name();
        log::debug!("selected {}", name);

        self.widgets.show_file_name(&name);
        *self.selected.borrow_mut() = Some(file);
        self.widgets.set_analyze_enabled(!self.analyzing.get());
        true
    }

    /// Upload the selected file and render the analysis or an error notice
    pub async fn analyze(&self) {
        let Some(file) = self.selected.borrow().clone() else {
            log::debug!("analyze ignored: no file selected");
            return;
        };
        if self.analyzing.get() {
            log::debug!("analyze ignored: upload already in flight");
            return;
        }

        let _guard = BusyGuard::engage(&self.widgets, &self.analyzing);
        log::info!("uploading {}", file.file_name());

        match self.api.upload(&file).await {
            Ok(result) => {
                let view = render_analysis(&result);
                *self.rendered_text.borrow_mut() = Some(view.readable_text());
                self.widgets.show_preview(&view);
            }
            Err(err) => {
                let message = match err {
                    ApiError::Server(message) => message,
                    other => {
                        log::error!("upload failed: {}", other);
                        UPLOAD_FAILED.to_string()
                    }
                };
                *self.rendered_text.borrow_mut() = None;
                self.widgets.show_preview(&render_error_notice(&message));
            }
        }
    }

    /// Send the chat input as a question and append the answer
    pub async fn send_message(&self) {
        let question = self.widgets.chat_input().trim().to_string();
        if question.is_empty() {
            return;
        }

        self.append(ChatMessage::user(question.as_str()));
        self.widgets.clear_chat_input();
        let placeholder = self.append(ChatMessage::thinking());

        let request = ChatRequest::new(question, self.rendered_text.borrow().clone());
        let outcome = self.api.chat(&request).await;
        if let Err(err) = &outcome {
            log::error!("chat request failed: {}", err);
        }

        let replies = ChatMessage::from_outcome(outcome);
        let inserted = self.transcript.borrow_mut().resolve(placeholder, replies);
        self.widgets.replace_message(placeholder, &inserted);
    }

    /// Load a canned document, select it and analyze it after the settle delay
    pub async fn load_sample(&self, filename: &str) {
        match self.api.fetch_sample(filename).await {
            Ok(file) => {
                self.select_file([file]);
                self.widgets.settle(self.config.settle_delay()).await;
                self.analyze().await;
            }
            Err(ApiError::Status(status)) => {
                log::warn!("sample {} returned {}", filename, status);
                self.append(ChatMessage::error(SAMPLE_NOT_FOUND));
            }
            Err(err) => {
                log::error!("sample {} failed: {}", filename, err);
                self.append(ChatMessage::error(SAMPLE_FAILED));
            }
        }
    }

    fn append(&self, message: ChatMessage) -> MessageId {
        let id = self.transcript.borrow_mut().push(message.clone());
        self.widgets.append_message(id, &message);
        id
    }
}
