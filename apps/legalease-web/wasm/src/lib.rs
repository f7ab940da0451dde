//! LegalEase - browser front end for the legal document assistant
//!
//! Uploads a document for analysis, renders the summary, findings and
//! annotated plain-language text, and runs a chat about the document.

use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

pub mod api;
pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod transcript;
pub mod widgets;

pub use api::{DocumentFile, HttpApi, LegalApi};
pub use app::{BrowserApp, LegalEaseApp};
pub use config::{AppConfig, ElementIds};
pub use error::AppError;
pub use transcript::{Entry, MessageId, Transcript};
pub use widgets::{DomWidgets, Widgets};

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"LegalEase logger already initialized".into());
    }
    log::info!("LegalEase WASM initialized");
}

/// Wire the page using the default configuration plus `data-*` overrides on
/// `<body>`.
#[wasm_bindgen]
pub fn mount() -> Result<LegalEase, JsValue> {
    LegalEase::mount(AppConfig::default())
}

#[wasm_bindgen(js_name = mountWithConfig)]
pub fn mount_with_config(config_json: &str) -> Result<LegalEase, JsValue> {
    LegalEase::mount(AppConfig::from_json(config_json)?)
}

/// Handle to a mounted page
#[wasm_bindgen]
pub struct LegalEase {
    app: Rc<BrowserApp>,
}

impl LegalEase {
    fn mount(config: AppConfig) -> Result<LegalEase, JsValue> {
        let window = web_sys::window().ok_or(AppError::NoWindow)?;
        let document = window.document().ok_or(AppError::NoDocument)?;

        let config = match document.body() {
            Some(body) => {
                let dataset = body.dataset();
                config.with_dataset(|key| dataset.get(key))?
            }
            None => config,
        };

        let widgets = DomWidgets::from_document(document, &config.ids)?;
        let api = HttpApi::new(&config);
        let app = Rc::new(LegalEaseApp::new(api, widgets, config));

        events::wire(&app)?;
        log::info!("mounted against {}", app.config().api_base);
        Ok(LegalEase { app })
    }
}

#[wasm_bindgen]
impl LegalEase {
    /// Analyze the selected document; resolves when rendering is done
    pub fn analyze(&self) -> Promise {
        let app = Rc::clone(&self.app);
        future_to_promise(async move {
            app.analyze().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self) -> Promise {
        let app = Rc::clone(&self.app);
        future_to_promise(async move {
            app.send_message().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = loadSample)]
    pub fn load_sample(&self, filename: String) -> Promise {
        let app = Rc::clone(&self.app);
        future_to_promise(async move {
            app.load_sample(&filename).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = hasSelection)]
    pub fn has_selection(&self) -> bool {
        self.app.has_selection()
    }

    #[wasm_bindgen(js_name = selectedName)]
    pub fn selected_name(&self) -> Option<String> {
        self.app.selected_name()
    }

    #[wasm_bindgen(js_name = isAnalyzing)]
    pub fn is_analyzing(&self) -> bool {
        self.app.is_analyzing()
    }

    #[wasm_bindgen(js_name = messageCount)]
    pub fn message_count(&self) -> usize {
        self.app.message_count()
    }

    #[wasm_bindgen(js_name = pendingReplies)]
    pub fn pending_replies(&self) -> usize {
        self.app.pending_replies()
    }

    /// The chat transcript as a JSON array of `{id, text, sender, style}`
    #[wasm_bindgen(js_name = transcriptJson)]
    pub fn transcript_json(&self) -> String {
        self.app.transcript_json()
    }
}
