//! Event wiring for the browser page
//!
//! Each listener is a long-lived closure that holds an `Rc` of the app and is
//! leaked with `forget`, since the page never tears the widgets down.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, Element, Event, EventTarget, KeyboardEvent, MouseEvent, Node};

use crate::app::BrowserApp;
use crate::dom::{files_of, hide_tooltip, show_tooltip, term_at};

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Attach every page listener to `app`
pub fn wire(app: &Rc<BrowserApp>) -> Result<(), JsValue> {
    wire_file_selection(app)?;
    wire_drag_and_drop(app)?;
    wire_analyze(app)?;
    wire_chat(app)?;
    wire_samples(app)?;
    wire_tooltips(app)?;
    log::debug!("event listeners attached");
    Ok(())
}

fn wire_file_selection(app: &Rc<BrowserApp>) -> Result<(), JsValue> {
    let widgets = app.widgets();

    let input = widgets.file_input().clone();
    listen(widgets.drop_area(), "click", move |_| input.click())?;

    let handle = Rc::clone(app);
    listen(widgets.file_input(), "change", move |_| {
        let files = files_of(handle.widgets().file_input().files());
        handle.select_file(files);
    })
}

fn wire_drag_and_drop(app: &Rc<BrowserApp>) -> Result<(), JsValue> {
    let area = app.widgets().drop_area();

    for (event, highlight) in [("dragenter", true), ("dragover", true), ("dragleave", false)] {
        let handle = Rc::clone(app);
        listen(area, event, move |e| {
            e.prevent_default();
            e.stop_propagation();
            handle.widgets().set_drag_highlight(highlight);
        })?;
    }

    let handle = Rc::clone(app);
    listen(area, "drop", move |e| {
        e.prevent_default();
        e.stop_propagation();
        handle.widgets().set_drag_highlight(false);

        let files = e
            .dyn_ref::<DragEvent>()
            .and_then(DragEvent::data_transfer)
            .map(|transfer| files_of(transfer.files()))
            .unwrap_or_default();
        handle.select_file(files);
    })
}

fn wire_analyze(app: &Rc<BrowserApp>) -> Result<(), JsValue> {
    let handle = Rc::clone(app);
    listen(app.widgets().analyze_button(), "click", move |_| {
        let app = Rc::clone(&handle);
        spawn_local(async move { app.analyze().await });
    })
}

fn wire_chat(app: &Rc<BrowserApp>) -> Result<(), JsValue> {
    let handle = Rc::clone(app);
    listen(app.widgets().send_button(), "click", move |_| {
        let app = Rc::clone(&handle);
        spawn_local(async move { app.send_message().await });
    })?;

    let handle = Rc::clone(app);
    listen(app.widgets().chat_input_element(), "keypress", move |e| {
        let enter = e
            .dyn_ref::<KeyboardEvent>()
            .map(|k| k.key() == "Enter")
            .unwrap_or(false);
        if enter {
            let app = Rc::clone(&handle);
            spawn_local(async move { app.send_message().await });
        }
    })
}

fn wire_samples(app: &Rc<BrowserApp>) -> Result<(), JsValue> {
    let selector = &app.config().sample_button_selector;
    let buttons = app.widgets().document().query_selector_all(selector)?;

    for i in 0..buttons.length() {
        let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(filename) = button.get_attribute("data-file") else {
            log::warn!("sample button {} has no data-file", i);
            continue;
        };

        let handle = Rc::clone(app);
        listen(&button, "click", move |_| {
            let app = Rc::clone(&handle);
            let filename = filename.clone();
            spawn_local(async move { app.load_sample(&filename).await });
        })?;
    }

    log::debug!("{} sample buttons wired", buttons.length());
    Ok(())
}

/// Tooltips are delegated from the preview pane, which is re-rendered after
/// every analysis.
fn wire_tooltips(app: &Rc<BrowserApp>) -> Result<(), JsValue> {
    let preview = app.widgets().preview();

    let handle = Rc::clone(app);
    listen(preview, "mouseover", move |e| {
        if let Some(term) = term_at(e.target()) {
            if let Err(err) = show_tooltip(handle.widgets().document(), &term) {
                log::warn!("tooltip: {:?}", err);
            }
        }
    })?;

    listen(preview, "mouseout", move |e| {
        let Some(term) = term_at(e.target()) else {
            return;
        };
        // Moving between a term's own children is not leaving it
        let into = e
            .dyn_ref::<MouseEvent>()
            .and_then(MouseEvent::related_target)
            .and_then(|t| t.dyn_into::<Node>().ok());
        if into.is_some_and(|node| term.contains(Some(&node))) {
            return;
        }
        if let Err(err) = hide_tooltip(&term) {
            log::warn!("tooltip: {:?}", err);
        }
    })
}
