//! HTTP client for the analysis backend
//!
//! `LegalApi` is the seam between the controller and the network: the browser
//! build uses `HttpApi` (fetch via web-sys), tests plug in an in-memory fake.

use js_sys::Array;
use shared_types::{
    AnalysisResult, ApiError, ChatReply, ChatRequest, ChatResponse, UploadResponse,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FilePropertyBag, FormData, Request, RequestInit, RequestMode, Response};

use crate::config::AppConfig;

/// A document the user picked, dropped or loaded as a sample
pub trait DocumentFile: Clone {
    fn file_name(&self) -> String;
}

impl DocumentFile for File {
    fn file_name(&self) -> String {
        self.name()
    }
}

/// Remote operations the controller depends on
#[allow(async_fn_in_trait)]
pub trait LegalApi {
    type File: DocumentFile;

    /// `POST /api/upload` with the file as multipart field `file`
    async fn upload(&self, file: &Self::File) -> Result<AnalysisResult, ApiError>;

    /// `POST /api/chat`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;

    /// Fetch a sample document and wrap it as a `text/plain` file
    async fn fetch_sample(&self, filename: &str) -> Result<Self::File, ApiError>;
}

/// fetch-based implementation used in the browser
pub struct HttpApi {
    config: AppConfig,
}

impl HttpApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl LegalApi for HttpApi {
    type File = File;

    async fn upload(&self, file: &File) -> Result<AnalysisResult, ApiError> {
        let form = FormData::new().map_err(transport)?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(transport)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from(form));

        let request = Request::new_with_str_and_init(&self.config.upload_url(), &opts)
            .map_err(transport)?;

        // The backend reports failures as `{error}` with a 4xx/5xx status,
        // so the body is decoded whatever the status.
        let response = send(&request).await?;
        let body = read_text(&response).await?;
        UploadResponse::from_json(&body)?.into_result()
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&request.to_json()?));

        let http_request = Request::new_with_str_and_init(&self.config.chat_url(), &opts)
            .map_err(transport)?;
        http_request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(transport)?;

        let response = send(&http_request).await?;
        let body = read_text(&response).await?;
        ChatResponse::from_json(&body)?.into_reply()
    }

    async fn fetch_sample(&self, filename: &str) -> Result<File, ApiError> {
        let url = self.config.sample_url(filename);
        let request = Request::new_with_str(&url).map_err(transport)?;

        let response = send(&request).await?;
        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }
        let content = read_text(&response).await?;

        let parts = Array::of1(&JsValue::from_str(&content));
        let options = FilePropertyBag::new();
        options.set_type("text/plain");
        File::new_with_str_sequence_and_options(&parts, filename, &options).map_err(decode)
    }
}

async fn send(request: &Request) -> Result<Response, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Transport("No window".to_string()))?;
    let value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(transport)?;
    value
        .dyn_into::<Response>()
        .map_err(|_| ApiError::Decode("fetch did not resolve to a Response".to_string()))
}

async fn read_text(response: &Response) -> Result<String, ApiError> {
    let text = JsFuture::from(response.text().map_err(decode)?)
        .await
        .map_err(decode)?;
    text.as_string()
        .ok_or_else(|| ApiError::Decode("response body is not text".to_string()))
}

fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{:?}", value),
    }
}

fn transport(value: JsValue) -> ApiError {
    ApiError::Transport(js_message(&value))
}

fn decode(value: JsValue) -> ApiError {
    ApiError::Decode(js_message(&value))
}
